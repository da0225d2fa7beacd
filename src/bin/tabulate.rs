//! Tabulate CLI - Command-line interface for fitbit-tabulate
//!
//! Commands:
//! - (none): resting heart rate + intraday tables
//! - intraday: intraday tables only
//! - resting-heart: resting heart rate table only
//! - daily: daily metric tables only
//! - all: every table

use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use fitbit_tabulate::progress::{LogProgress, ProgressObserver};
use fitbit_tabulate::{
    DailyMetric, IntradayActivity, PreambleMode, RunReport, Selection, TabulateError, Tabulator,
    TransformConfig, TABULATE_VERSION,
};

/// Tabulate - Flatten Fitbit JSON exports into CSV tables
#[derive(Parser)]
#[command(name = "tabulate")]
#[command(version = TABULATE_VERSION)]
#[command(about = "Convert Fitbit JSON exports into per-activity CSV files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file (flags override its values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root of the intraday export (<dir>/<activity>/*.json)
    #[arg(long, global = true)]
    intraday_dir: Option<PathBuf>,

    /// Root of the daily export (<dir>/*.json)
    #[arg(long, global = true)]
    day_dir: Option<PathBuf>,

    /// Number of banner lines to skip at the top of each export file
    #[arg(long, global = true, conflicts_with = "detect_preamble")]
    preamble_lines: Option<usize>,

    /// Skip banner lines until the first line that starts a JSON document
    #[arg(long, global = true)]
    detect_preamble: bool,

    /// Print the run report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build <activity>.csv for each intraday activity
    Intraday {
        /// Activity to process (repeatable; default: all)
        #[arg(long = "activity")]
        activities: Vec<IntradayActivity>,
    },

    /// Build restingHeart.csv from the daily heart summary
    RestingHeart,

    /// Build <metric>.csv for each daily metric
    Daily {
        /// Metric to process (repeatable; default: all)
        #[arg(long = "metric")]
        metrics: Vec<DailyMetric>,
    },

    /// Run every transform
    All,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), TabulateError> {
    let mut config = match &cli.config {
        Some(path) => TransformConfig::from_file(path)?,
        None => TransformConfig::default(),
    };
    if let Some(dir) = cli.intraday_dir {
        config = config.with_intraday_dir(dir);
    }
    if let Some(dir) = cli.day_dir {
        config = config.with_day_dir(dir);
    }
    if let Some(lines) = cli.preamble_lines {
        config = config.with_preamble(PreambleMode::Lines(lines));
    }
    if cli.detect_preamble {
        config = config.with_preamble(PreambleMode::Detect);
    }

    let selection = match cli.command {
        None => Selection::DEFAULT,
        Some(Commands::Intraday { activities }) => {
            if !activities.is_empty() {
                config = config.with_intraday_activities(activities);
            }
            Selection {
                resting_heart: false,
                intraday: true,
                daily: false,
            }
        }
        Some(Commands::RestingHeart) => Selection {
            resting_heart: true,
            intraday: false,
            daily: false,
        },
        Some(Commands::Daily { metrics }) => {
            if !metrics.is_empty() {
                config = config.with_daily_metrics(metrics);
            }
            Selection {
                resting_heart: false,
                intraday: false,
                daily: true,
            }
        }
        Some(Commands::All) => Selection::ALL,
    };

    let progress: Box<dyn ProgressObserver> = if !cli.json && io::stderr().is_terminal() {
        Box::new(TerminalProgress)
    } else {
        Box::new(LogProgress)
    };

    let report = Tabulator::new(config).with_progress(progress).run(selection)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(|source| TabulateError::Json {
            path: PathBuf::from("-"),
            source,
        })?;
        println!("{}", json);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    println!("Tabulation Report");
    println!("=================");

    if let Some(rhr) = &report.resting_heart {
        println!(
            "restingHeart: {} rows -> {} ({} skipped)",
            rhr.table.rows,
            rhr.table.output.display(),
            rhr.skipped_total()
        );
        for (reason, count) in &rhr.skipped {
            println!("  - {}: {}", reason, count);
        }
    }

    for table in report.intraday.iter().chain(&report.daily) {
        println!(
            "{}: {} rows from {} files -> {}",
            table.table,
            table.rows,
            table.files,
            table.output.display()
        );
    }

    println!("Total rows: {}", report.total_rows());
}

/// Rewrites a single `<table> | N/M` status line on stderr
struct TerminalProgress;

impl ProgressObserver for TerminalProgress {
    fn on_file(&mut self, table: &str, index: usize, total: usize) {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "\r{} | {}/{}", table, index, total);
        let _ = stderr.flush();
    }

    fn on_table_done(&mut self, _table: &str) {
        eprintln!();
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<TabulateError> for CliError {
    fn from(e: TabulateError) -> Self {
        let (code, hint) = match &e {
            TabulateError::Io { .. } => ("IO_ERROR", "Check directory paths and permissions"),
            TabulateError::Json { .. } => ("JSON_ERROR", "Check that the file is a Fitbit export"),
            TabulateError::Csv { .. } => ("CSV_ERROR", "Check that the output file is writable"),
            TabulateError::PreambleTooShort { .. } | TabulateError::NoJsonBody { .. } => (
                "PREAMBLE_ERROR",
                "Adjust --preamble-lines or use --detect-preamble",
            ),
            TabulateError::NotAnObject { .. }
            | TabulateError::MissingField { .. }
            | TabulateError::UnexpectedType { .. } => {
                ("FORMAT_ERROR", "Ensure the export contains activities-<activity> sections")
            }
            TabulateError::DateParse { .. }
            | TabulateError::UnsupportedIntervalUnit(_)
            | TabulateError::IntervalOutOfRange(_) => {
                ("TIME_ERROR", "Check dateTime, time and datasetType values")
            }
            TabulateError::EmptyDataset { .. } | TabulateError::NoRestingHeartEntries { .. } => {
                ("NO_DATA", "Remove or re-export the empty file")
            }
            TabulateError::SchemaMismatch { .. } => {
                ("SCHEMA_MISMATCH", "Samples must only carry time and value fields")
            }
            TabulateError::UnknownActivity(_) => ("UNKNOWN_ACTIVITY", "Check --activity/--metric names"),
        };

        CliError {
            code: code.to_string(),
            message: e.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}
