//! Session range sweep classification.
//!
//! For each calendar date, the bars falling inside a reference window
//! establish a high/low range; the bars inside a later comparison window are
//! checked against it. A date classifies into exactly one [`SweepOutcome`].

use crate::domain::bar::IntradayBar;
use crate::domain::error::SweepscanError;
use crate::domain::window::SessionWindow;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// Four-way classification of a day's comparison session against the
/// reference range. Derived from the two sweep flags with fixed precedence:
/// both, then high, then low, then none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepOutcome {
    BothSwept,
    HighSwept,
    LowSwept,
    NoneSwept,
}

impl SweepOutcome {
    pub const ALL: [SweepOutcome; 4] = [
        SweepOutcome::BothSwept,
        SweepOutcome::HighSwept,
        SweepOutcome::LowSwept,
        SweepOutcome::NoneSwept,
    ];

    pub fn from_flags(high_swept: bool, low_swept: bool) -> Self {
        match (high_swept, low_swept) {
            (true, true) => SweepOutcome::BothSwept,
            (true, false) => SweepOutcome::HighSwept,
            (false, true) => SweepOutcome::LowSwept,
            (false, false) => SweepOutcome::NoneSwept,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SweepOutcome::BothSwept => "Both swept",
            SweepOutcome::HighSwept => "High swept",
            SweepOutcome::LowSwept => "Low swept",
            SweepOutcome::NoneSwept => "None swept",
        }
    }
}

impl fmt::Display for SweepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutcome {
    pub date: NaiveDate,
    pub reference_high: f64,
    pub reference_low: f64,
    pub high_swept: bool,
    pub low_swept: bool,
    pub outcome: SweepOutcome,
}

/// Reject inverted windows and reference/comparison overlap before any
/// per-date work.
pub fn validate_windows(
    reference: &SessionWindow,
    comparison: &SessionWindow,
) -> Result<(), SweepscanError> {
    if reference.is_inverted() {
        return Err(SweepscanError::WindowInverted {
            window: "reference",
            start: reference.start,
            end: reference.end,
        });
    }
    if comparison.is_inverted() {
        return Err(SweepscanError::WindowInverted {
            window: "comparison",
            start: comparison.start,
            end: comparison.end,
        });
    }
    if reference.overlaps(comparison) {
        return Err(SweepscanError::WindowOverlap {
            reference_end: reference.end,
            comparison_start: comparison.start,
        });
    }
    Ok(())
}

/// Classify every calendar date in `bars`.
///
/// Grouping is order-insensitive; output is in ascending date order. Dates
/// lacking bars in either window are omitted, by design, rather than
/// reported as errors. A bar with `high < low` fails the whole run.
pub fn analyze(
    bars: &[IntradayBar],
    reference: &SessionWindow,
    comparison: &SessionWindow,
) -> Result<Vec<DayOutcome>, SweepscanError> {
    validate_windows(reference, comparison)?;

    for bar in bars {
        if !bar.is_coherent() {
            return Err(SweepscanError::DataFault {
                date: bar.date,
                time: bar.time,
                high: bar.high,
                low: bar.low,
            });
        }
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<&IntradayBar>> = BTreeMap::new();
    for bar in bars {
        by_date.entry(bar.date).or_default().push(bar);
    }

    let mut outcomes = Vec::new();
    for (date, group) in by_date {
        let Some((reference_high, reference_low)) = window_extremes(&group, reference) else {
            continue;
        };
        let Some((comparison_high, comparison_low)) = window_extremes(&group, comparison) else {
            continue;
        };

        let high_swept = comparison_high > reference_high;
        let low_swept = comparison_low < reference_low;

        outcomes.push(DayOutcome {
            date,
            reference_high,
            reference_low,
            high_swept,
            low_swept,
            outcome: SweepOutcome::from_flags(high_swept, low_swept),
        });
    }

    Ok(outcomes)
}

/// (max high, min low) over the bars inside `window`, or `None` when the
/// window holds no bars for this date.
fn window_extremes(bars: &[&IntradayBar], window: &SessionWindow) -> Option<(f64, f64)> {
    let mut extremes: Option<(f64, f64)> = None;
    for bar in bars.iter().filter(|b| window.contains(b.time)) {
        extremes = Some(match extremes {
            Some((high, low)) => (high.max(bar.high), low.min(bar.low)),
            None => (bar.high, bar.low),
        });
    }
    extremes
}
