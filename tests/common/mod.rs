#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use sweepscan::domain::bar::IntradayBar;
use sweepscan::domain::error::SweepscanError;
use sweepscan::domain::window::SessionWindow;
use sweepscan::ports::bar_port::BarPort;

pub struct MockBarPort {
    pub bars: Vec<IntradayBar>,
    pub error: Option<String>,
}

impl MockBarPort {
    pub fn new() -> Self {
        Self {
            bars: Vec::new(),
            error: None,
        }
    }

    pub fn with_bars(mut self, bars: Vec<IntradayBar>) -> Self {
        self.bars = bars;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl BarPort for MockBarPort {
    fn fetch_bars(&self) -> Result<Vec<IntradayBar>, SweepscanError> {
        if let Some(reason) = &self.error {
            return Err(SweepscanError::Csv {
                reason: reason.clone(),
            });
        }
        Ok(self.bars.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn make_bar(d: NaiveDate, h: u32, min: u32, high: f64, low: f64) -> IntradayBar {
    IntradayBar {
        date: d,
        time: time(h, min),
        high,
        low,
    }
}

/// Morning reference window and afternoon comparison window.
pub fn rth_windows() -> (SessionWindow, SessionWindow) {
    (
        SessionWindow::new(time(9, 0), time(9, 30)),
        SessionWindow::new(time(9, 31), time(16, 0)),
    )
}
