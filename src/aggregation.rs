//! Aggregation module for summarizing filtered viewing records
//!
//! Each record is assigned a weekday bucket (Monday first) and an
//! hour-of-day bucket, both taken from its start time in the configured
//! viewer timezone. Watch time is then summed per bucket. Every bucket is
//! present in the output, so sparse or empty input still yields 7 and 24
//! points, and both series always sum to the grand total.
//!
//! # Examples
//!
//! ```
//! use watchstat::aggregation::Aggregator;
//! use watchstat::timezone::TimezoneConfig;
//!
//! let aggregator = Aggregator::new(TimezoneConfig::default());
//! let summary = aggregator.summarize("title \"Dark\"", &[]);
//! assert_eq!(summary.by_weekday.points.len(), 7);
//! assert_eq!(summary.by_hour.points.len(), 24);
//! assert!(summary.totals.watch_time.is_zero());
//! ```

use crate::aggregation_types::{AggregateSeries, Dimension, Totals, WatchSummary};
use crate::timezone::TimezoneConfig;
use crate::types::{BucketedRecord, FilteredRecord};
use tracing::debug;

/// Buckets and sums filtered records
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    timezone_config: TimezoneConfig,
}

impl Aggregator {
    pub fn new(timezone_config: TimezoneConfig) -> Self {
        Self { timezone_config }
    }

    /// Attach weekday and hour buckets to each record
    pub fn bucket(&self, records: &[FilteredRecord]) -> Vec<BucketedRecord> {
        records
            .iter()
            .map(|record| {
                let (weekday, hour) = self.timezone_config.weekday_and_hour(&record.start_time);
                BucketedRecord {
                    record: record.clone(),
                    weekday,
                    hour,
                }
            })
            .collect()
    }

    /// Sum watch time per weekday, Monday through Sunday
    pub fn aggregate_by_weekday(bucketed: &[BucketedRecord]) -> AggregateSeries {
        let mut series = AggregateSeries::empty(Dimension::Weekday);
        for entry in bucketed {
            series.record(
                entry.weekday.num_days_from_monday() as usize,
                entry.record.duration,
            );
        }
        series
    }

    /// Sum watch time per hour of day, 0 through 23
    pub fn aggregate_by_hour(bucketed: &[BucketedRecord]) -> AggregateSeries {
        let mut series = AggregateSeries::empty(Dimension::Hour);
        for entry in bucketed {
            series.record(entry.hour as usize, entry.record.duration);
        }
        series
    }

    /// Build both series and the grand total for a filtered set
    pub fn summarize(&self, label: impl Into<String>, records: &[FilteredRecord]) -> WatchSummary {
        let bucketed = self.bucket(records);
        let by_weekday = Self::aggregate_by_weekday(&bucketed);
        let by_hour = Self::aggregate_by_hour(&bucketed);
        let totals = Totals::from_records(records);

        debug!(
            "Aggregated {} views, {} total",
            totals.views,
            totals.watch_time.humanize()
        );

        WatchSummary {
            label: label.into(),
            timezone: self.timezone_config.display_name(),
            totals,
            by_weekday,
            by_hour,
        }
    }
}
