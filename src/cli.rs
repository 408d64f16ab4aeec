//! CLI definition and dispatch.

use chrono::Weekday;
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::aggregate::{filter_by_weekday, OutcomeBreakdown};
use crate::domain::config_validation::{build_windows, parse_weekday, validate_analysis_config};
use crate::domain::error::SweepscanError;
use crate::domain::sweep::{analyze, SweepOutcome};
use crate::ports::bar_port::BarPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "sweepscan", about = "Session range sweep analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a sweep analysis
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        day_of_week: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the date range covered by a dataset
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Validate an analysis configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            input,
            output,
            day_of_week,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_analyze(
                    &config,
                    input.as_ref(),
                    output.as_ref(),
                    day_of_week.as_deref(),
                )
            }
        }
        Command::Info { config, input } => run_info(config.as_ref(), input.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SweepscanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn resolve_input(
    input_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, SweepscanError> {
    if let Some(path) = input_override {
        return Ok(path.clone());
    }
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(PathBuf::from(s)),
        _ => Err(SweepscanError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        }),
    }
}

pub fn resolve_delimiter(config: &dyn ConfigPort) -> u8 {
    config
        .get_string("data", "delimiter")
        .and_then(|s| s.bytes().next())
        .unwrap_or(b';')
}

pub fn resolve_output(output_override: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    if let Some(path) = output_override {
        return path.clone();
    }
    config
        .get_string("report", "output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sweep_report.csv"))
}

/// Resolve the optional day-of-week filter: a CLI override wins over the
/// `[report] day_of_week` config key.
pub fn build_day_filter(
    dow_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Option<Weekday>, SweepscanError> {
    let value = match dow_override {
        Some(s) => Some(s.to_string()),
        None => config
            .get_string("report", "day_of_week")
            .filter(|s| !s.trim().is_empty()),
    };

    match value {
        None => Ok(None),
        Some(s) => parse_weekday(&s)
            .map(Some)
            .ok_or_else(|| SweepscanError::ConfigInvalid {
                section: "report".into(),
                key: "day_of_week".into(),
                reason: format!("unrecognized weekday {:?}", s),
            }),
    }
}

fn run_analyze(
    config_path: &PathBuf,
    input_override: Option<&PathBuf>,
    output_override: Option<&PathBuf>,
    dow_override: Option<&str>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: Build session windows and day filter
    let (reference, comparison) = match build_windows(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let day_filter = match build_day_filter(dow_override, &adapter) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Sessions: reference {reference}, comparison {comparison}");

    // Stage 3: Load bars
    let input = match resolve_input(input_override, &adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let bar_port = CsvAdapter::new(input.clone()).with_delimiter(resolve_delimiter(&adapter));
    let bars = match bar_port.fetch_bars() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if bars.is_empty() {
        let err = SweepscanError::NoData {
            path: input.display().to_string(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    let distinct_dates: BTreeSet<_> = bars.iter().map(|b| b.date).collect();
    eprintln!(
        "Loaded {} bars across {} dates from {}",
        bars.len(),
        distinct_dates.len(),
        input.display()
    );

    // Stage 4: Classify
    let outcomes = match analyze(&bars, &reference, &comparison) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let classified = outcomes.len();
    let outcomes = match day_filter {
        Some(weekday) => {
            eprintln!("Filtering to {weekday} only");
            filter_by_weekday(&outcomes, weekday)
        }
        None => outcomes,
    };

    // Stage 5: Summarize to stderr
    let breakdown = OutcomeBreakdown::from_outcomes(&outcomes);

    eprintln!("\n=== Sweep Outcomes ===");
    for outcome in SweepOutcome::ALL {
        eprintln!(
            "{:<12} {:>4} ({:.1}%)",
            format!("{outcome}:"),
            breakdown.count(outcome),
            breakdown.percentage(outcome)
        );
    }
    eprintln!(
        "\nClassified {} of {} dates ({} skipped for missing session data)",
        classified,
        distinct_dates.len(),
        distinct_dates.len() - classified
    );
    if day_filter.is_some() {
        eprintln!("{} days match the day-of-week filter", outcomes.len());
    }

    // Stage 6: Write report
    let output = resolve_output(output_override, &adapter);
    match CsvReportAdapter.write(&outcomes, &output) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let (reference, comparison) = match build_windows(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nResolved analysis:");
    eprintln!("  reference window:  {reference}");
    eprintln!("  comparison window: {comparison}");

    if let Ok(input) = resolve_input(None, &adapter) {
        eprintln!("  input:             {}", input.display());
    }
    eprintln!("  output:            {}", resolve_output(None, &adapter).display());

    match build_day_filter(None, &adapter) {
        Ok(Some(weekday)) => eprintln!("  day-of-week:       {weekday}"),
        Ok(None) => {}
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_info(config_path: Option<&PathBuf>, input_override: Option<&PathBuf>) -> ExitCode {
    let mut delimiter = b';';
    let input = match (input_override, config_path) {
        (Some(path), None) => path.clone(),
        (maybe_input, Some(config_path)) => {
            let adapter = match load_config(config_path) {
                Ok(a) => a,
                Err(code) => return code,
            };
            delimiter = resolve_delimiter(&adapter);
            match maybe_input {
                Some(path) => path.clone(),
                None => match resolve_input(None, &adapter) {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("error: {e}");
                        return (&e).into();
                    }
                },
            }
        }
        (None, None) => {
            eprintln!("error: either --input or --config is required for info");
            return ExitCode::from(1);
        }
    };

    let adapter = CsvAdapter::new(input.clone()).with_delimiter(delimiter);
    match adapter.date_range() {
        Ok(Some((first, last, count))) => {
            println!("{}: {} bars, {} to {}", input.display(), count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no bars found", input.display());
            ExitCode::from(5)
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let (reference, comparison) = match build_windows(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("  reference window:  {reference}");
    eprintln!("  comparison window: {comparison}");
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
