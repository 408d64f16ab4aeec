//! CSV report adapter: one row per classified day.

use crate::domain::error::SweepscanError;
use crate::domain::sweep::DayOutcome;
use crate::ports::report_port::ReportPort;
use std::path::Path;

const HEADERS: [&str; 6] = [
    "date",
    "reference_high",
    "reference_low",
    "high_swept",
    "low_swept",
    "outcome",
];

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, outcomes: &[DayOutcome], output_path: &Path) -> Result<(), SweepscanError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| SweepscanError::Csv {
            reason: format!("failed to open {}: {}", output_path.display(), e),
        })?;

        wtr.write_record(HEADERS).map_err(|e| SweepscanError::Csv {
            reason: format!("failed to write header: {}", e),
        })?;

        for day in outcomes {
            wtr.write_record([
                day.date.to_string(),
                day.reference_high.to_string(),
                day.reference_low.to_string(),
                day.high_swept.to_string(),
                day.low_swept.to_string(),
                day.outcome.to_string(),
            ])
            .map_err(|e| SweepscanError::Csv {
                reason: format!("failed to write row for {}: {}", day.date, e),
            })?;
        }

        wtr.flush()?;
        Ok(())
    }
}
