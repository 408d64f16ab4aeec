//! Intraday bar representation.

use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, PartialEq)]
pub struct IntradayBar {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub high: f64,
    pub low: f64,
}

impl IntradayBar {
    /// high - low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// A bar is coherent when its high is at or above its low.
    pub fn is_coherent(&self) -> bool {
        self.high >= self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> IntradayBar {
        IntradayBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            high: 110.0,
            low: 90.0,
        }
    }

    #[test]
    fn range() {
        let bar = sample_bar();
        assert!((bar.range() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn coherent_bar() {
        assert!(sample_bar().is_coherent());
    }

    #[test]
    fn flat_bar_is_coherent() {
        let bar = IntradayBar {
            high: 100.0,
            low: 100.0,
            ..sample_bar()
        };
        assert!(bar.is_coherent());
        assert!(bar.range().abs() < f64::EPSILON);
    }

    #[test]
    fn inverted_bar_is_not_coherent() {
        let bar = IntradayBar {
            high: 90.0,
            low: 110.0,
            ..sample_bar()
        };
        assert!(!bar.is_coherent());
    }
}
