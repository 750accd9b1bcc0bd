//! Core domain types for watchstat
//!
//! Each pipeline stage has its own record shape: the loader produces
//! [`ViewingRecord`]s, the cleaner produces [`CleanedRecord`]s, the filter
//! keeps a subset of those as [`FilteredRecord`]s and the aggregator derives
//! [`BucketedRecord`]s from them. Durations are carried as [`WatchTime`].

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Non-negative elapsed time, in whole seconds
///
/// Viewing durations and every sum derived from them use this type, so a
/// negative duration is unrepresentable and comparisons are numeric.
///
/// # Examples
/// ```
/// use watchstat_core::types::WatchTime;
///
/// let episode = WatchTime::from_hms(0, 45, 0);
/// let total = episode + episode;
/// assert_eq!(total.as_secs(), 5400);
/// assert_eq!(total.to_string(), "0 days 01:30:00");
/// assert_eq!(total.humanize(), "1h 30m");
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WatchTime(u64);

impl WatchTime {
    /// Zero elapsed time
    pub const ZERO: WatchTime = WatchTime(0);

    /// Create from a number of seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Create from hours, minutes and seconds
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self(hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds)
    }

    /// Total number of seconds
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Format as `HH:MM:SS` where the hour component may exceed 24
    pub fn format_clock(&self) -> String {
        let hours = self.0 / SECONDS_PER_HOUR;
        let minutes = (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = self.0 % SECONDS_PER_MINUTE;
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }

    /// Compact form such as `3d 4h 12m`, `2h 5m` or `45m 0s`
    pub fn humanize(&self) -> String {
        let days = self.0 / SECONDS_PER_DAY;
        let hours = (self.0 % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
        let minutes = (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = self.0 % SECONDS_PER_MINUTE;

        if days > 0 {
            format!("{days}d {hours}h {minutes}m")
        } else if hours > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{minutes}m {seconds}s")
        }
    }
}

impl fmt::Display for WatchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0 / SECONDS_PER_DAY;
        let rest = WatchTime(self.0 % SECONDS_PER_DAY);
        let unit = if days == 1 { "day" } else { "days" };
        write!(f, "{days} {unit} {}", rest.format_clock())
    }
}

// Sums saturate at u64::MAX seconds instead of wrapping
impl Add for WatchTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for WatchTime {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for WatchTime {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a WatchTime> for WatchTime {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Export columns that are read but never used downstream
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedAttributes {
    pub attributes: Option<String>,
    pub supplemental_video_type: Option<String>,
    pub device_type: Option<String>,
    pub bookmark: Option<String>,
    pub latest_bookmark: Option<String>,
    pub country: Option<String>,
}

/// One raw row of a viewing activity export
///
/// All fields are kept as text exactly as they appeared in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewingRecord {
    /// 1-based line in the source text, used in row-level errors
    pub line: u64,
    pub profile_name: String,
    pub title: String,
    /// Start time text, `YYYY-MM-DD HH:MM:SS` in UTC
    pub start_time: String,
    /// Duration text, `H:MM:SS` or a days-prefixed variant
    pub duration: String,
    pub discarded: DiscardedAttributes,
}

/// A viewing record with unused columns dropped and time fields parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub profile_name: String,
    pub title: String,
    /// Absolute start time, always UTC
    pub start_time: DateTime<Utc>,
    pub duration: WatchTime,
}

/// A cleaned record that passed the title/profile and minimum-duration filter
pub type FilteredRecord = CleanedRecord;

/// A filtered record with its weekday and hour-of-day buckets
///
/// Both buckets are derived in the configured viewer timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketedRecord {
    pub record: FilteredRecord,
    pub weekday: Weekday,
    /// Hour of day, 0-23
    pub hour: u32,
}

/// Full English name of a weekday, as used for chart labels
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekdays in chart order, Monday first
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];
