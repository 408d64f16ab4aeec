//! Outcome frequency aggregation and day-of-week filtering.

use crate::domain::sweep::{DayOutcome, SweepOutcome};
use chrono::{Datelike, Weekday};

/// Counts of each sweep outcome over a set of classified days.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutcomeBreakdown {
    pub both_swept: usize,
    pub high_swept: usize,
    pub low_swept: usize,
    pub none_swept: usize,
}

impl OutcomeBreakdown {
    pub fn from_outcomes(outcomes: &[DayOutcome]) -> Self {
        let mut breakdown = OutcomeBreakdown::default();
        for day in outcomes {
            match day.outcome {
                SweepOutcome::BothSwept => breakdown.both_swept += 1,
                SweepOutcome::HighSwept => breakdown.high_swept += 1,
                SweepOutcome::LowSwept => breakdown.low_swept += 1,
                SweepOutcome::NoneSwept => breakdown.none_swept += 1,
            }
        }
        breakdown
    }

    pub fn total(&self) -> usize {
        self.both_swept + self.high_swept + self.low_swept + self.none_swept
    }

    pub fn count(&self, outcome: SweepOutcome) -> usize {
        match outcome {
            SweepOutcome::BothSwept => self.both_swept,
            SweepOutcome::HighSwept => self.high_swept,
            SweepOutcome::LowSwept => self.low_swept,
            SweepOutcome::NoneSwept => self.none_swept,
        }
    }

    /// Normalized frequency in `[0, 100]`. Zero for an empty breakdown.
    pub fn percentage(&self, outcome: SweepOutcome) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(outcome) as f64 / total as f64 * 100.0
    }
}

/// Restrict outcomes to those whose date falls on `weekday`.
pub fn filter_by_weekday(outcomes: &[DayOutcome], weekday: Weekday) -> Vec<DayOutcome> {
    outcomes
        .iter()
        .filter(|day| day.date.weekday() == weekday)
        .cloned()
        .collect()
}
