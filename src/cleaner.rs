//! Cleaning stage: column projection and time parsing
//!
//! Turns raw [`ViewingRecord`]s into [`CleanedRecord`]s. The unused export
//! columns are dropped, the start time becomes an absolute UTC timestamp and
//! the duration becomes a [`WatchTime`]. Any row that fails to parse aborts
//! the run with the row's line number; rows are never dropped or defaulted.
//!
//! Timestamps stay in UTC here. Shifting into a viewer's zone happens only
//! when buckets are derived, see [`crate::timezone::TimezoneConfig`].

use crate::error::{Result, WatchstatError};
use crate::types::{CleanedRecord, ViewingRecord, WatchTime};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SECONDS_PER_DAY: u64 = 86_400;

/// Clean every record, keeping length and order
///
/// # Errors
///
/// The first [`WatchstatError::InvalidTimestamp`] or
/// [`WatchstatError::InvalidDuration`] encountered.
pub fn clean_records(records: Vec<ViewingRecord>) -> Result<Vec<CleanedRecord>> {
    let cleaned = records
        .into_iter()
        .map(clean_record)
        .collect::<Result<Vec<_>>>()?;
    debug!("Cleaned {} records", cleaned.len());
    Ok(cleaned)
}

/// Clean a single record
pub fn clean_record(record: ViewingRecord) -> Result<CleanedRecord> {
    let start_time =
        parse_start_time(&record.start_time).ok_or_else(|| WatchstatError::InvalidTimestamp {
            line: record.line,
            value: record.start_time.clone(),
        })?;
    let duration =
        parse_duration(&record.duration).ok_or_else(|| WatchstatError::InvalidDuration {
            line: record.line,
            value: record.duration.clone(),
        })?;

    Ok(CleanedRecord {
        profile_name: record.profile_name,
        title: record.title,
        start_time,
        duration,
    })
}

/// Parse an export start time as UTC
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (implicitly UTC) and RFC 3339 timestamps
/// with an explicit offset, which are normalized to UTC.
///
/// # Example
///
/// ```
/// use watchstat::cleaner::parse_start_time;
/// use chrono::{Datelike, Timelike};
///
/// let ts = parse_start_time("2021-03-05 20:00:00").unwrap();
/// assert_eq!((ts.day(), ts.hour()), (5, 20));
/// assert!(parse_start_time("yesterday").is_none());
/// ```
pub fn parse_start_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, START_TIME_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an export duration
///
/// Accepts `H:MM:SS` with any number of hour digits, optionally prefixed by
/// a day count: `2 days 01:00:00`, `1 day, 02:00:00`. Minutes and seconds
/// must be two digits in `00..=59`. Signs are rejected.
///
/// # Example
///
/// ```
/// use watchstat::cleaner::parse_duration;
///
/// assert_eq!(parse_duration("0:45:00").unwrap().as_secs(), 2700);
/// assert_eq!(parse_duration("1 day, 02:00:00").unwrap().as_secs(), 26 * 3600);
/// assert!(parse_duration("-0:01:00").is_none());
/// ```
pub fn parse_duration(text: &str) -> Option<WatchTime> {
    let text = text.trim();
    let (days, clock) = match text.split_once("day") {
        Some((count, rest)) => {
            let days = parse_digits(count.trim())?;
            let rest = rest.strip_prefix('s').unwrap_or(rest).trim_start();
            let rest = rest.strip_prefix(',').unwrap_or(rest);
            (days, rest.trim())
        }
        None => (0, text),
    };

    let mut parts = clock.split(':');
    let (hours, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || minutes.len() != 2 || seconds.len() != 2 {
        return None;
    }

    let hours = parse_digits(hours)?;
    let minutes = parse_digits(minutes)?;
    let seconds = parse_digits(seconds)?;
    if minutes > 59 || seconds > 59 {
        return None;
    }

    let total = days
        .checked_mul(SECONDS_PER_DAY)?
        .checked_add(hours.checked_mul(3600)?)?
        .checked_add(minutes * 60 + seconds)?;
    Some(WatchTime::from_secs(total))
}

fn parse_digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscardedAttributes;
    use chrono::{Datelike, TimeZone, Timelike, Weekday};

    fn raw(line: u64, start_time: &str, duration: &str) -> ViewingRecord {
        ViewingRecord {
            line,
            profile_name: "Ekow".to_string(),
            title: "The Office (U.S.): Season 2: Booze Cruise (Episode 11)".to_string(),
            start_time: start_time.to_string(),
            duration: duration.to_string(),
            discarded: DiscardedAttributes {
                device_type: Some("Netflix Windows App".to_string()),
                country: Some("GH (Ghana)".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_parse_start_time_formats() {
        let ts = parse_start_time("2021-03-05 20:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2021, 3, 5, 20, 0, 0).unwrap());
        assert_eq!(ts.weekday(), Weekday::Fri);

        let ts = parse_start_time("2021-03-05T21:00:00+01:00").unwrap();
        assert_eq!(ts.hour(), 20);

        assert!(parse_start_time("").is_none());
        assert!(parse_start_time("2021-13-05 20:00:00").is_none());
        assert!(parse_start_time("05/03/2021 20:00").is_none());
    }

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("0:45:00"), Some(WatchTime::from_hms(0, 45, 0)));
        assert_eq!(parse_duration("00:00:30"), Some(WatchTime::from_secs(30)));
        assert_eq!(parse_duration("12:03:04"), Some(WatchTime::from_hms(12, 3, 4)));
        assert_eq!(parse_duration("1 day, 02:00:00"), Some(WatchTime::from_hms(26, 0, 0)));
        assert_eq!(parse_duration("2 days 01:00:00"), Some(WatchTime::from_hms(49, 0, 0)));
        assert_eq!(parse_duration("0 days 00:01:00"), Some(WatchTime::from_secs(60)));
        assert_eq!(parse_duration(" 0:01:01 "), Some(WatchTime::from_secs(61)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for bad in [
            "",
            "45 minutes",
            "0:45",
            "0:4:00",
            "0:60:00",
            "0:00:60",
            "-0:01:00",
            "0:01:00:00",
            "x days 01:00:00",
            "1 day",
        ] {
            assert!(parse_duration(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_clean_drops_discarded_and_keeps_order() {
        let records = vec![
            raw(2, "2021-03-05 20:00:00", "0:45:00"),
            raw(3, "2021-03-04 08:15:00", "0:22:10"),
        ];
        let cleaned = clean_records(records).unwrap();
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].duration, WatchTime::from_hms(0, 45, 0));
        assert_eq!(cleaned[1].start_time.hour(), 8);
        assert_eq!(cleaned[0].profile_name, "Ekow");
    }

    #[test]
    fn test_invalid_timestamp_reports_line() {
        let records = vec![
            raw(2, "2021-03-05 20:00:00", "0:45:00"),
            raw(3, "not a time", "0:45:00"),
        ];
        match clean_records(records).unwrap_err() {
            WatchstatError::InvalidTimestamp { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not a time");
            }
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_duration_reports_line() {
        let err = clean_records(vec![raw(9, "2021-03-05 20:00:00", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            WatchstatError::InvalidDuration { line: 9, .. }
        ));
    }
}
