//! Report generation port trait.

use crate::domain::error::SweepscanError;
use crate::domain::sweep::DayOutcome;
use std::path::Path;

/// Port for writing per-day sweep results.
pub trait ReportPort {
    fn write(&self, outcomes: &[DayOutcome], output_path: &Path) -> Result<(), SweepscanError>;
}
