//! Data loader for viewing activity exports
//!
//! The loader obtains the raw export text, either over HTTP or from a local
//! file, and parses it into [`ViewingRecord`]s. Column presence is checked
//! against the header row here so later stages never encounter a missing
//! field.
//!
//! # Examples
//!
//! ```no_run
//! use watchstat::data_loader::{DataLoader, Source, parse_viewing_activity};
//! use std::time::Duration;
//!
//! # async fn example() -> watchstat::Result<()> {
//! let loader = DataLoader::new(Duration::from_secs(30))?;
//! let text = loader.load(&Source::File("ViewingActivity.csv".into())).await?;
//! let records = parse_viewing_activity(&text)?;
//! println!("{} rows", records.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, WatchstatError};
use crate::types::{DiscardedAttributes, ViewingRecord};
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Sample export used when no source is configured
pub const SAMPLE_EXPORT_URL: &str =
    "https://www.dataquest.io/wp-content/uploads/2020/11/ViewingActivity-sample.csv";

/// Default timeout for fetching a remote export
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const PROFILE_NAME: &str = "Profile Name";
const TITLE: &str = "Title";
const START_TIME: &str = "Start Time";
const DURATION: &str = "Duration";

/// Columns every export must have
pub const REQUIRED_COLUMNS: [&str; 4] = [PROFILE_NAME, TITLE, START_TIME, DURATION];

/// Where the export comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Fetched with an unauthenticated GET
    Url(String),
    /// Read from the local filesystem
    File(PathBuf),
}

impl Default for Source {
    fn default() -> Self {
        Source::Url(SAMPLE_EXPORT_URL.to_string())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads raw export text from a [`Source`]
pub struct DataLoader {
    client: reqwest::Client,
    timeout: Duration,
    show_progress: bool,
}

impl DataLoader {
    /// Create a loader whose HTTP requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchstatError::InvalidArgument(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout,
            show_progress: false,
        })
    }

    /// Show a spinner while fetching remote exports
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Read the raw export text
    ///
    /// # Errors
    ///
    /// - [`WatchstatError::SourceUnavailable`] if the URL cannot be fetched,
    ///   times out, or answers with a non-success status
    /// - [`WatchstatError::SourceNotFound`] if the local file does not exist
    pub async fn load(&self, source: &Source) -> Result<String> {
        info!("Loading viewing activity from {}", source);
        let text = match source {
            Source::Url(url) => self.fetch(url).await?,
            Source::File(path) => Self::read_file(path).await?,
        };
        debug!("Loaded {} bytes", text.len());
        Ok(text)
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let spinner = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
            {
                pb.set_style(style);
            }
            pb.set_message(format!("Fetching {url}"));
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let result = self.fetch_text(url).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        result
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let unavailable = |e: reqwest::Error| {
            let reason = if e.is_timeout() {
                format!("timed out after {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            };
            WatchstatError::SourceUnavailable {
                url: url.to_string(),
                reason,
            }
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?;

        response.text().await.map_err(unavailable)
    }

    async fn read_file(path: &Path) -> Result<String> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(WatchstatError::SourceNotFound(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Header positions of the columns the pipeline reads
#[derive(Debug)]
struct ColumnMap {
    profile_name: usize,
    title: usize,
    start_time: usize,
    duration: usize,
    attributes: Option<usize>,
    supplemental_video_type: Option<usize>,
    device_type: Option<usize>,
    bookmark: Option<usize>,
    latest_bookmark: Option<usize>,
    country: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();
        let position = |name: &str| names.iter().position(|h| *h == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| position(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(WatchstatError::MalformedInput(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        // Required columns were checked above
        let required = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            profile_name: required(PROFILE_NAME),
            title: required(TITLE),
            start_time: required(START_TIME),
            duration: required(DURATION),
            attributes: position("Attributes"),
            supplemental_video_type: position("Supplemental Video Type"),
            device_type: position("Device Type"),
            bookmark: position("Bookmark"),
            latest_bookmark: position("Latest Bookmark"),
            country: position("Country"),
        })
    }

    fn required_field(&self, row: &StringRecord, index: usize, line: u64) -> Result<String> {
        row.get(index).map(str::to_string).ok_or_else(|| {
            WatchstatError::MalformedInput(format!(
                "line {line}: expected at least {} fields, found {}",
                index + 1,
                row.len()
            ))
        })
    }

    fn optional_field(row: &StringRecord, index: Option<usize>) -> Option<String> {
        index
            .and_then(|i| row.get(i))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn to_record(&self, row: &StringRecord, line: u64) -> Result<ViewingRecord> {
        Ok(ViewingRecord {
            line,
            profile_name: self.required_field(row, self.profile_name, line)?,
            title: self.required_field(row, self.title, line)?,
            start_time: self.required_field(row, self.start_time, line)?,
            duration: self.required_field(row, self.duration, line)?,
            discarded: DiscardedAttributes {
                attributes: Self::optional_field(row, self.attributes),
                supplemental_video_type: Self::optional_field(row, self.supplemental_video_type),
                device_type: Self::optional_field(row, self.device_type),
                bookmark: Self::optional_field(row, self.bookmark),
                latest_bookmark: Self::optional_field(row, self.latest_bookmark),
                country: Self::optional_field(row, self.country),
            },
        })
    }
}

/// Parse comma-delimited export text into viewing records
///
/// The first line must be a header naming at least `Profile Name`, `Title`,
/// `Start Time` and `Duration`. Records keep the file's order.
///
/// # Errors
///
/// [`WatchstatError::MalformedInput`] if a required column is absent, a row
/// is shorter than the header, or the text is not valid CSV.
pub fn parse_viewing_activity(text: &str) -> Result<Vec<ViewingRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| WatchstatError::MalformedInput(e.to_string()))?
        .clone();
    if headers.is_empty() {
        return Err(WatchstatError::MalformedInput(
            "export has no header row".to_string(),
        ));
    }
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| WatchstatError::MalformedInput(e.to_string()))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(columns.to_record(&row, line)?);
    }

    debug!("Parsed {} viewing records", records.len());
    Ok(records)
}
