//! Domain error types.

use chrono::{NaiveDate, NaiveTime};

/// Top-level error type for sweepscan.
#[derive(Debug, thiserror::Error)]
pub enum SweepscanError {
    #[error("bar on {date} at {time} has high {high} below low {low}")]
    DataFault {
        date: NaiveDate,
        time: NaiveTime,
        high: f64,
        low: f64,
    },

    #[error("{window} window is inverted: starts {start}, ends {end}")]
    WindowInverted {
        window: &'static str,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error(
        "session windows overlap: reference ends {reference_end}, comparison starts {comparison_start}"
    )]
    WindowOverlap {
        reference_end: NaiveTime,
        comparison_start: NaiveTime,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("CSV error: {reason}")]
    Csv { reason: String },

    #[error("no bars found in {path}")]
    NoData { path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SweepscanError> for std::process::ExitCode {
    fn from(err: &SweepscanError) -> Self {
        let code: u8 = match err {
            SweepscanError::Io(_) => 1,
            SweepscanError::ConfigParse { .. }
            | SweepscanError::ConfigMissing { .. }
            | SweepscanError::ConfigInvalid { .. }
            | SweepscanError::WindowInverted { .. }
            | SweepscanError::WindowOverlap { .. } => 2,
            SweepscanError::DataFault { .. } | SweepscanError::Csv { .. } => 3,
            SweepscanError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
