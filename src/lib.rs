//! fitbit-tabulate - Flatten Fitbit JSON exports into CSV tables
//!
//! Fitbit data exports are nested JSON documents, one per day and activity,
//! behind a banner of non-JSON lines. This crate loads them, flattens the
//! nesting into dotted keys and reshapes the time series into per-activity CSV
//! files:
//!
//! - **Intraday**: `<root>/<activity>/*.json` → `<root>/<activity>.csv`
//! - **Resting heart rate**: `<day>/heart.json` → `<day>/restingHeart.csv`
//! - **Daily metrics**: `<day>/*.json` → `<day>/<metric>.csv`

pub mod activity;
pub mod config;
pub mod csv_writer;
pub mod daily;
pub mod discovery;
pub mod document;
pub mod error;
pub mod flatten;
pub mod intraday;
pub mod loader;
pub mod pipeline;
pub mod progress;
pub mod resting_heart;
pub mod schema;
pub mod types;

pub use activity::{DailyMetric, IntervalUnit, IntradayActivity};
pub use config::{PreambleMode, TransformConfig};
pub use error::TabulateError;
pub use pipeline::{Selection, Tabulator};
pub use progress::ProgressObserver;
pub use types::{RestingHeartReport, RunReport, SkipReason, TableReport};

/// Crate version
pub const TABULATE_VERSION: &str = env!("CARGO_PKG_VERSION");
