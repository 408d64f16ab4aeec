//! CSV file bar adapter.
//!
//! Reads MetaTrader-style delimited exports: `;`-separated by default, with
//! bracketed headers such as `<DATE>`, `<TIME>`, `<HIGH>`, `<LOW>`. Headers
//! are matched after trimming whitespace and stripping the brackets, so plain
//! `date,time,high,low` files work too.

use crate::domain::bar::IntradayBar;
use crate::domain::error::SweepscanError;
use crate::ports::bar_port::BarPort;
use chrono::{NaiveDate, NaiveTime};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
    delimiter: u8,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            delimiter: b';',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .to_ascii_uppercase()
}

fn parse_bar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y.%m.%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

fn parse_bar_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

impl BarPort for CsvAdapter {
    fn fetch_bars(&self) -> Result<Vec<IntradayBar>, SweepscanError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SweepscanError::Csv {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| SweepscanError::Csv {
                reason: format!("failed to read header: {}", e),
            })?
            .clone();

        let column = |name: &str| -> Result<usize, SweepscanError> {
            headers
                .iter()
                .position(|h| normalize_header(h) == name)
                .ok_or_else(|| SweepscanError::Csv {
                    reason: format!("missing {} column in {}", name, self.path.display()),
                })
        };

        let date_col = column("DATE")?;
        let time_col = column("TIME")?;
        let high_col = column("HIGH")?;
        let low_col = column("LOW")?;

        let mut bars = Vec::new();

        for (i, result) in rdr.records().enumerate() {
            // header is line 1
            let line = i + 2;
            let record = result.map_err(|e| SweepscanError::Csv {
                reason: format!("line {}: {}", line, e),
            })?;

            let raw_date = record.get(date_col).unwrap_or_default();
            let date = parse_bar_date(raw_date).ok_or_else(|| SweepscanError::Csv {
                reason: format!(
                    "line {}: invalid date {:?} (expected YYYY.MM.DD or YYYY-MM-DD)",
                    line, raw_date
                ),
            })?;

            let raw_time = record.get(time_col).unwrap_or_default();
            let time = parse_bar_time(raw_time).ok_or_else(|| SweepscanError::Csv {
                reason: format!(
                    "line {}: invalid time {:?} (expected HH:MM or HH:MM:SS)",
                    line, raw_time
                ),
            })?;

            let raw_high = record.get(high_col).unwrap_or_default();
            let high: f64 = raw_high.parse().map_err(|e| SweepscanError::Csv {
                reason: format!("line {}: invalid high value {:?}: {}", line, raw_high, e),
            })?;

            let raw_low = record.get(low_col).unwrap_or_default();
            let low: f64 = raw_low.parse().map_err(|e| SweepscanError::Csv {
                reason: format!("line {}: invalid low value {:?}: {}", line, raw_low, e),
            })?;

            bars.push(IntradayBar {
                date,
                time,
                high,
                low,
            });
        }

        bars.sort_by_key(|b| (b.date, b.time));
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn fetch_bars_parses_metatrader_export() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bars.csv",
            "<DATE>;<TIME>;<OPEN>;<HIGH>;<LOW>;<CLOSE>;<VOL>\n\
             2024.01.02;09:00:00;99.0;100.0;95.0;98.0;1200\n\
             2024.01.02;09:30:00;98.0;105.0;97.0;104.0;1500\n",
        );
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_bars().unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(bars[0].high, 100.0);
        assert_eq!(bars[0].low, 95.0);
    }

    #[test]
    fn fetch_bars_accepts_plain_headers_and_iso_dates() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bars.csv",
            "date,time,high,low\n2024-01-02,09:00,100.0,95.0\n",
        );
        let adapter = CsvAdapter::new(path).with_delimiter(b',');

        let bars = adapter.fetch_bars().unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn fetch_bars_normalizes_padded_headers() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bars.csv",
            " <DATE> ; <TIME> ; <HIGH> ; <LOW> \n2024.01.02;09:00:00;100.0;95.0\n",
        );
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_bars().unwrap();
        assert_eq!(bars.len(), 1);
    }

    #[test]
    fn fetch_bars_sorts_by_date_and_time() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bars.csv",
            "<DATE>;<TIME>;<HIGH>;<LOW>\n\
             2024.01.03;09:00:00;103.0;95.0\n\
             2024.01.02;10:00:00;102.0;95.0\n\
             2024.01.02;09:00:00;101.0;95.0\n",
        );
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_bars().unwrap();
        assert_eq!(bars[0].high, 101.0);
        assert_eq!(bars[1].high, 102.0);
        assert_eq!(bars[2].high, 103.0);
    }

    #[test]
    fn fetch_bars_rejects_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bars.csv",
            "<DATE>;<TIME>;<HIGH>\n2024.01.02;09:00:00;100.0\n",
        );
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_bars().unwrap_err();
        assert!(matches!(err, SweepscanError::Csv { reason } if reason.contains("LOW")));
    }

    #[test]
    fn fetch_bars_rejects_bad_date_with_line_number() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bars.csv",
            "<DATE>;<TIME>;<HIGH>;<LOW>\n\
             2024.01.02;09:00:00;100.0;95.0\n\
             02/01/2024;09:30:00;100.0;95.0\n",
        );
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_bars().unwrap_err();
        assert!(matches!(err, SweepscanError::Csv { reason } if reason.contains("line 3")));
    }

    #[test]
    fn fetch_bars_rejects_non_numeric_price() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bars.csv",
            "<DATE>;<TIME>;<HIGH>;<LOW>\n2024.01.02;09:00:00;abc;95.0\n",
        );
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_bars().unwrap_err();
        assert!(matches!(err, SweepscanError::Csv { reason } if reason.contains("high")));
    }

    #[test]
    fn fetch_bars_errors_for_missing_file() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/bars.csv"));
        assert!(adapter.fetch_bars().is_err());
    }

    #[test]
    fn header_only_file_yields_no_bars() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "bars.csv", "<DATE>;<TIME>;<HIGH>;<LOW>\n");
        let adapter = CsvAdapter::new(path);

        assert!(adapter.fetch_bars().unwrap().is_empty());
        assert_eq!(adapter.date_range().unwrap(), None);
    }

    #[test]
    fn date_range_spans_the_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bars.csv",
            "<DATE>;<TIME>;<HIGH>;<LOW>\n\
             2024.01.02;09:00:00;100.0;95.0\n\
             2024.01.05;09:00:00;100.0;95.0\n\
             2024.01.03;09:00:00;100.0;95.0\n",
        );
        let adapter = CsvAdapter::new(path);

        let (first, last, count) = adapter.date_range().unwrap().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(count, 3);
    }
}
