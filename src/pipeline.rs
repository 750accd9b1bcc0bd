//! End-to-end run: load, clean, filter, aggregate
//!
//! [`run`] is the only async step, since the source may be fetched over
//! HTTP. Everything after the raw text is available goes through
//! [`summarize_export`], which is synchronous and usable on its own.

use crate::aggregation::Aggregator;
use crate::aggregation_types::WatchSummary;
use crate::cleaner::clean_records;
use crate::data_loader::{DEFAULT_FETCH_TIMEOUT, DataLoader, Source, parse_viewing_activity};
use crate::error::Result;
use crate::filters::ViewingFilter;
use crate::timezone::TimezoneConfig;
use std::time::Duration;
use tracing::info;

/// Everything a single run needs
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source: Source,
    pub filter: ViewingFilter,
    pub timezone: TimezoneConfig,
    pub fetch_timeout: Duration,
    /// Show a spinner while fetching
    pub show_progress: bool,
}

impl PipelineConfig {
    pub fn new(source: Source, filter: ViewingFilter) -> Self {
        Self {
            source,
            filter,
            timezone: TimezoneConfig::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            show_progress: false,
        }
    }

    pub fn with_timezone(mut self, timezone: TimezoneConfig) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Load the configured source and summarize it
///
/// # Errors
///
/// Any loader, parse or cleaning error. Nothing is summarized unless every
/// row is valid.
pub async fn run(config: &PipelineConfig) -> Result<WatchSummary> {
    info!("Using timezone: {}", config.timezone.display_name());

    let loader = DataLoader::new(config.fetch_timeout)?.with_progress(config.show_progress);
    let text = loader.load(&config.source).await?;

    let aggregator = Aggregator::new(config.timezone.clone());
    summarize_export(&text, &config.filter, &aggregator)
}

/// Parse, clean, filter and aggregate an export that is already in memory
pub fn summarize_export(
    text: &str,
    filter: &ViewingFilter,
    aggregator: &Aggregator,
) -> Result<WatchSummary> {
    let raw = parse_viewing_activity(text)?;
    let cleaned = clean_records(raw)?;
    let filtered = filter.apply(&cleaned);
    Ok(aggregator.summarize(filter.describe(), &filtered))
}
