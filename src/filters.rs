//! Filtering module for cleaned viewing records
//!
//! A [`ViewingFilter`] keeps the records whose title (or profile name)
//! contains a literal substring and whose duration is strictly longer than a
//! minimum. The minimum removes the few-second autoplay previews that would
//! otherwise count as views.
//!
//! # Examples
//!
//! ```
//! use watchstat::filters::{MatchField, ViewingFilter};
//! use watchstat::types::WatchTime;
//!
//! let filter = ViewingFilter::new(MatchField::Title, "The Office (U.S.)")
//!     .with_min_duration(WatchTime::from_secs(120));
//! assert_eq!(filter.describe(), "title \"The Office (U.S.)\"");
//! ```

use crate::types::{CleanedRecord, FilteredRecord, WatchTime};
use std::fmt;
use tracing::debug;

/// Minimum duration a view must exceed to be counted
pub const DEFAULT_MIN_DURATION: WatchTime = WatchTime::from_secs(60);

/// Which record field the substring is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Profile,
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchField::Title => write!(f, "title"),
            MatchField::Profile => write!(f, "profile"),
        }
    }
}

/// Filter configuration for cleaned records
///
/// Matching is literal substring containment, case-sensitive unless
/// [`ViewingFilter::with_case_insensitive`] is set. The duration test is
/// strict: a record must last longer than the minimum.
#[derive(Debug, Clone)]
pub struct ViewingFilter {
    /// Field the needle is looked up in
    pub field: MatchField,
    /// Literal substring to look for
    pub needle: String,
    /// Durations must be strictly greater than this
    pub min_duration: WatchTime,
    /// Compare case-insensitively
    pub case_insensitive: bool,
}

impl ViewingFilter {
    /// Create a filter with the default one-minute threshold
    pub fn new(field: MatchField, needle: impl Into<String>) -> Self {
        Self {
            field,
            needle: needle.into(),
            min_duration: DEFAULT_MIN_DURATION,
            case_insensitive: false,
        }
    }

    /// Set the minimum duration threshold
    pub fn with_min_duration(mut self, min_duration: WatchTime) -> Self {
        self.min_duration = min_duration;
        self
    }

    /// Match the needle regardless of case
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    fn field_value<'a>(&self, record: &'a CleanedRecord) -> &'a str {
        match self.field {
            MatchField::Title => &record.title,
            MatchField::Profile => &record.profile_name,
        }
    }

    fn contains_needle(&self, haystack: &str) -> bool {
        if self.case_insensitive {
            haystack.to_lowercase().contains(&self.needle.to_lowercase())
        } else {
            haystack.contains(self.needle.as_str())
        }
    }

    /// Check if a record passes the filter
    pub fn matches(&self, record: &CleanedRecord) -> bool {
        record.duration > self.min_duration && self.contains_needle(self.field_value(record))
    }

    /// Keep the matching records, in their original order
    pub fn apply(&self, records: &[CleanedRecord]) -> Vec<FilteredRecord> {
        let filtered: Vec<FilteredRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        debug!(
            "Filter {} kept {} of {} records",
            self.describe(),
            filtered.len(),
            records.len()
        );
        filtered
    }

    /// Human-readable label, e.g. `title "The Office (U.S.)"`
    pub fn describe(&self) -> String {
        format!("{} \"{}\"", self.field, self.needle)
    }
}
