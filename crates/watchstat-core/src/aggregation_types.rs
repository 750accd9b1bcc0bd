//! Aggregation data types for watchstat
//!
//! Pure data structures produced by the aggregator and consumed by the
//! output formatters. A series always holds its full, fixed bucket domain
//! in natural order, whether or not any record landed in a bucket.

use crate::types::{FilteredRecord, WEEK, WatchTime, weekday_label};
use serde::{Deserialize, Serialize};

/// What a series is bucketed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Seven buckets, Monday through Sunday
    Weekday,
    /// Twenty-four buckets, hour 0 through 23
    Hour,
}

impl Dimension {
    /// Number of buckets in this dimension
    pub fn bucket_count(&self) -> usize {
        match self {
            Dimension::Weekday => 7,
            Dimension::Hour => 24,
        }
    }

    /// Default chart title
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Weekday => "Watch time by weekday",
            Dimension::Hour => "Watch time by hour of day",
        }
    }
}

/// One bucket of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Bucket label (`Monday`, or `0`..`23`)
    pub label: String,
    /// Summed watch time of every record in the bucket
    pub watch_time: WatchTime,
    /// Number of records in the bucket
    pub views: usize,
}

/// Watch time per bucket, in bucket order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSeries {
    pub dimension: Dimension,
    pub points: Vec<SeriesPoint>,
}

impl AggregateSeries {
    /// A series with every bucket present at zero
    pub fn empty(dimension: Dimension) -> Self {
        let points = match dimension {
            Dimension::Weekday => WEEK
                .iter()
                .map(|day| SeriesPoint {
                    label: weekday_label(*day).to_string(),
                    watch_time: WatchTime::ZERO,
                    views: 0,
                })
                .collect(),
            Dimension::Hour => (0..dimension.bucket_count())
                .map(|hour| SeriesPoint {
                    label: hour.to_string(),
                    watch_time: WatchTime::ZERO,
                    views: 0,
                })
                .collect(),
        };
        Self { dimension, points }
    }

    /// Add one record's watch time to the bucket at `index`
    ///
    /// Indices outside the dimension's domain are ignored.
    pub fn record(&mut self, index: usize, watch_time: WatchTime) {
        if let Some(point) = self.points.get_mut(index) {
            point.watch_time += watch_time;
            point.views += 1;
        }
    }

    /// Sum of every bucket
    pub fn total(&self) -> WatchTime {
        self.points.iter().map(|p| p.watch_time).sum()
    }

    /// The largest bucket value, used to scale bars
    pub fn max(&self) -> WatchTime {
        self.points
            .iter()
            .map(|p| p.watch_time)
            .max()
            .unwrap_or(WatchTime::ZERO)
    }

    /// Bucket with the most watch time; ties go to the earliest bucket
    pub fn peak(&self) -> Option<&SeriesPoint> {
        self.points
            .iter()
            .filter(|p| !p.watch_time.is_zero())
            .fold(None, |best: Option<&SeriesPoint>, p| match best {
                Some(b) if b.watch_time >= p.watch_time => Some(b),
                _ => Some(p),
            })
    }
}

/// Calculate totals from filtered data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub watch_time: WatchTime,
    pub views: usize,
}

impl Totals {
    pub fn from_records(records: &[FilteredRecord]) -> Self {
        let mut totals = Self::default();
        for record in records {
            totals.watch_time += record.duration;
            totals.views += 1;
        }
        totals
    }
}

/// Everything the presenter needs for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchSummary {
    /// What was filtered for, e.g. `title "The Office (U.S.)"`
    pub label: String,
    /// Display name of the zone buckets were computed in
    pub timezone: String,
    pub totals: Totals,
    pub by_weekday: AggregateSeries,
    pub by_hour: AggregateSeries,
}
