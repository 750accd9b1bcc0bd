//! CLI interface for watchstat
//!
//! A single command: every option has a default, so running `watchstat`
//! with no arguments fetches the sample export and charts watch time for
//! "The Office (U.S.)".
//!
//! # Example
//!
//! ```bash
//! # Chart a local export for one profile, bucketed in New York time
//! watchstat --file ViewingActivity.csv --profile Ekow -z America/New_York
//!
//! # Only the hour-of-day chart, as JSON
//! watchstat --title "Dark" --chart hour --json
//! ```

use crate::data_loader::{SAMPLE_EXPORT_URL, Source};
use crate::error::Result;
use crate::filters::{DEFAULT_MIN_DURATION, MatchField, ViewingFilter};
use crate::output::ChartSelection;
use crate::pipeline::PipelineConfig;
use crate::timezone::TimezoneConfig;
use crate::types::WatchTime;
use clap::{Args, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Title matched when neither `--title` nor `--profile` is given
pub const DEFAULT_TITLE: &str = "The Office (U.S.)";

/// Chart watch time by weekday and hour from a viewing activity export
#[derive(Parser, Debug, Clone)]
#[command(name = "watchstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub source_args: SourceArgs,

    #[command(flatten)]
    pub filter_args: FilterArgs,

    #[command(flatten)]
    pub timezone_args: TimezoneArgs,

    /// Which charts to render
    #[arg(long, value_enum, default_value = "all")]
    pub chart: ChartSelection,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Show debug output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors, even if RUST_LOG says otherwise
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Where to read the export from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Fetch the export over HTTP (defaults to a public sample export)
    #[arg(long)]
    pub url: Option<String>,

    /// Read a local ViewingActivity.csv
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

/// Which rows to keep
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Keep rows whose title contains this text
    #[arg(long)]
    pub title: Option<String>,

    /// Keep rows whose profile name contains this text
    #[arg(long, conflicts_with = "title")]
    pub profile: Option<String>,

    /// Drop views lasting this many seconds or less
    #[arg(long, default_value_t = DEFAULT_MIN_DURATION.as_secs())]
    pub min_duration: u64,

    /// Match the title or profile text regardless of case
    #[arg(long)]
    pub ignore_case: bool,
}

/// Timezone options
#[derive(Args, Debug, Clone)]
pub struct TimezoneArgs {
    /// Timezone for weekday/hour buckets ("UTC", "America/New_York", "+05:30")
    #[arg(long, short = 'z', env = "WATCHSTAT_TIMEZONE")]
    pub timezone: Option<String>,

    /// Use the system's local timezone (overrides --timezone)
    #[arg(long)]
    pub local: bool,
}

impl Cli {
    /// The configured export source
    pub fn source(&self) -> Source {
        match (&self.source_args.file, &self.source_args.url) {
            (Some(path), _) => Source::File(path.clone()),
            (None, Some(url)) => Source::Url(url.clone()),
            (None, None) => Source::Url(SAMPLE_EXPORT_URL.to_string()),
        }
    }

    /// The row filter described by the filter options
    pub fn filter(&self) -> ViewingFilter {
        let args = &self.filter_args;
        let filter = match (&args.profile, &args.title) {
            (Some(profile), _) => ViewingFilter::new(MatchField::Profile, profile.clone()),
            (None, Some(title)) => ViewingFilter::new(MatchField::Title, title.clone()),
            (None, None) => ViewingFilter::new(MatchField::Title, DEFAULT_TITLE),
        };
        filter
            .with_min_duration(WatchTime::from_secs(args.min_duration))
            .with_case_insensitive(args.ignore_case)
    }

    /// Resolve the bucketing timezone
    pub fn timezone_config(&self) -> Result<TimezoneConfig> {
        TimezoneConfig::from_cli(
            self.timezone_args.timezone.as_deref(),
            self.timezone_args.local,
        )
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.source_args.timeout)
    }

    /// Build the full run configuration
    pub fn pipeline_config(&self, show_progress: bool) -> Result<PipelineConfig> {
        Ok(PipelineConfig::new(self.source(), self.filter())
            .with_timezone(self.timezone_config()?)
            .with_fetch_timeout(self.fetch_timeout())
            .with_progress(show_progress))
    }
}
