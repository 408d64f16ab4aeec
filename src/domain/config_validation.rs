//! Configuration validation.
//!
//! Validates all config fields before any data is read.

use crate::domain::error::SweepscanError;
use crate::domain::window::{parse_session_time, SessionWindow};
use crate::ports::config_port::ConfigPort;
use chrono::{NaiveTime, Weekday};

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), SweepscanError> {
    validate_data_path(config)?;
    validate_delimiter(config)?;
    let reference = validate_window_section(config, "reference")?;
    let comparison = validate_window_section(config, "comparison")?;
    validate_window_order(&reference, &comparison)?;
    validate_day_of_week(config)?;
    Ok(())
}

/// Build the two session windows from validated config.
pub fn build_windows(
    config: &dyn ConfigPort,
) -> Result<(SessionWindow, SessionWindow), SweepscanError> {
    let reference = validate_window_section(config, "reference")?;
    let comparison = validate_window_section(config, "comparison")?;
    validate_window_order(&reference, &comparison)?;
    Ok((reference, comparison))
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), SweepscanError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(SweepscanError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_delimiter(config: &dyn ConfigPort) -> Result<(), SweepscanError> {
    match config.get_string("data", "delimiter") {
        None => Ok(()),
        Some(s) if s.is_empty() => Ok(()),
        Some(s) if s.chars().count() == 1 && s.is_ascii() => Ok(()),
        Some(s) => Err(SweepscanError::ConfigInvalid {
            section: "data".to_string(),
            key: "delimiter".to_string(),
            reason: format!("expected a single ASCII character, got {:?}", s),
        }),
    }
}

fn validate_window_section(
    config: &dyn ConfigPort,
    section: &str,
) -> Result<SessionWindow, SweepscanError> {
    let start = parse_time_key(config, section, "start")?;
    let end = parse_time_key(config, section, "end")?;

    let window = SessionWindow::new(start, end);
    if window.is_inverted() {
        return Err(SweepscanError::ConfigInvalid {
            section: section.to_string(),
            key: "start".to_string(),
            reason: format!("start {} is after end {}", start, end),
        });
    }
    Ok(window)
}

fn parse_time_key(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<NaiveTime, SweepscanError> {
    let value = config
        .get_string(section, key)
        .ok_or_else(|| SweepscanError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })?;

    parse_session_time(&value).ok_or_else(|| SweepscanError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("invalid time {:?} (expected HH:MM or HH:MM:SS)", value),
    })
}

fn validate_window_order(
    reference: &SessionWindow,
    comparison: &SessionWindow,
) -> Result<(), SweepscanError> {
    if reference.overlaps(comparison) {
        return Err(SweepscanError::WindowOverlap {
            reference_end: reference.end,
            comparison_start: comparison.start,
        });
    }
    Ok(())
}

fn validate_day_of_week(config: &dyn ConfigPort) -> Result<(), SweepscanError> {
    match config.get_string("report", "day_of_week") {
        None => Ok(()),
        Some(s) if s.trim().is_empty() => Ok(()),
        Some(s) => {
            parse_weekday(&s).map(|_| ()).ok_or_else(|| SweepscanError::ConfigInvalid {
                section: "report".to_string(),
                key: "day_of_week".to_string(),
                reason: format!("unrecognized weekday {:?}", s),
            })
        }
    }
}

/// Parse a weekday name such as "Monday" or "mon".
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    value.trim().parse::<Weekday>().ok()
}
