//! watchstat - Watch-time statistics from viewing activity exports
//!
//! This library provides functionality to:
//! - Fetch or read a `ViewingActivity.csv` export and parse its rows
//! - Clean start times and durations into typed values
//! - Filter rows by title or profile substring and a minimum duration
//! - Aggregate watch time by weekday and by hour of day
//! - Render the results as terminal bar charts or JSON
//!
//! # Examples
//!
//! ```no_run
//! use watchstat::{
//!     data_loader::Source,
//!     filters::{MatchField, ViewingFilter},
//!     output::{ChartSelection, get_formatter},
//!     pipeline::{self, PipelineConfig},
//! };
//!
//! #[tokio::main]
//! async fn main() -> watchstat::Result<()> {
//!     let config = PipelineConfig::new(
//!         Source::File("ViewingActivity.csv".into()),
//!         ViewingFilter::new(MatchField::Title, "The Office (U.S.)"),
//!     );
//!     let summary = pipeline::run(&config).await?;
//!
//!     println!("{}", get_formatter(false).format_summary(&summary, ChartSelection::All));
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cleaner;
pub mod cli;
pub mod data_loader;
pub mod filters;
pub mod output;
pub mod pipeline;

// Core modules live in watchstat-core
pub use watchstat_core::{aggregation_types, error, timezone, types};

// Re-export commonly used types
pub use error::{Result, WatchstatError};
pub use types::{CleanedRecord, FilteredRecord, ViewingRecord, WatchTime};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
