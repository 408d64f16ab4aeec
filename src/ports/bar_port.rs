//! Bar acquisition port trait.

use crate::domain::bar::IntradayBar;
use crate::domain::error::SweepscanError;
use chrono::NaiveDate;

pub trait BarPort {
    fn fetch_bars(&self) -> Result<Vec<IntradayBar>, SweepscanError>;

    /// (first date, last date, bar count) of the dataset, or `None` when it
    /// holds no bars. Default implementation derives the answer from
    /// `fetch_bars`.
    fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SweepscanError> {
        let bars = self.fetch_bars()?;
        let first = bars.iter().map(|b| b.date).min();
        let last = bars.iter().map(|b| b.date).max();
        match (first, last) {
            (Some(first), Some(last)) => Ok(Some((first, last, bars.len()))),
            _ => Ok(None),
        }
    }
}
