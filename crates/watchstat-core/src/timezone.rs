//! Timezone utilities for bucketing
//!
//! Start times are always stored in UTC. When the weekday and hour buckets
//! are derived, the timestamp is first shifted into the viewer's zone, which
//! is UTC unless configured otherwise. A zone can be an IANA name, a fixed
//! offset such as `+05:30`, or the detected system zone.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, WatchstatError};

/// The zone in which weekday and hour buckets are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerZone {
    Utc,
    Named(Tz),
    Offset(FixedOffset),
}

/// Configuration for timezone handling
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// The zone used to derive buckets
    pub zone: ViewerZone,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimezoneConfig {
    /// Bucket in UTC, the export's native zone
    pub fn utc() -> Self {
        Self {
            zone: ViewerZone::Utc,
        }
    }

    /// Create a new timezone configuration from CLI arguments
    ///
    /// `use_local` wins over an explicit zone string.
    pub fn from_cli(timezone_str: Option<&str>, use_local: bool) -> Result<Self> {
        if use_local {
            return Ok(Self::from_tz(get_local_timezone()));
        }

        match timezone_str {
            Some(tz_str) => Self::parse(tz_str),
            None => Ok(Self::utc()),
        }
    }

    /// Parse `UTC`, an IANA zone name, or a fixed offset like `+05:30`
    pub fn parse(tz_str: &str) -> Result<Self> {
        let trimmed = tz_str.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Self::utc());
        }

        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            let offset = parse_fixed_offset(trimmed).ok_or_else(|| {
                WatchstatError::InvalidTimezone(format!(
                    "'{tz_str}'. Offsets look like '+05:30', '-0800' or '+02'"
                ))
            })?;
            return Ok(Self {
                zone: ViewerZone::Offset(offset),
            });
        }

        let tz = Tz::from_str(trimmed).map_err(|_| {
            WatchstatError::InvalidTimezone(format!(
                "'{tz_str}'. Use format like 'America/New_York', 'Africa/Accra', '+01:00' or 'UTC'"
            ))
        })?;
        Ok(Self::from_tz(tz))
    }

    fn from_tz(tz: Tz) -> Self {
        let zone = if tz == Tz::UTC {
            ViewerZone::Utc
        } else {
            ViewerZone::Named(tz)
        };
        Self { zone }
    }

    pub fn is_utc(&self) -> bool {
        matches!(self.zone, ViewerZone::Utc)
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> String {
        match self.zone {
            ViewerZone::Utc => "UTC".to_string(),
            ViewerZone::Named(tz) => tz.name().to_string(),
            ViewerZone::Offset(offset) => offset.to_string(),
        }
    }

    /// Weekday and hour-of-day of a UTC instant, as seen in the viewer's zone
    pub fn weekday_and_hour(&self, instant: &DateTime<Utc>) -> (Weekday, u32) {
        match self.zone {
            ViewerZone::Utc => (instant.weekday(), instant.hour()),
            ViewerZone::Named(tz) => {
                let local = instant.with_timezone(&tz);
                (local.weekday(), local.hour())
            }
            ViewerZone::Offset(offset) => {
                let local = instant.with_timezone(&offset);
                (local.weekday(), local.hour())
            }
        }
    }
}

/// Parse `+HH:MM`, `+HHMM` or `+HH` (and the `-` forms) into an offset
fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.split_at(1) {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Detect the system's local timezone
///
/// This function attempts to detect the local timezone from the system.
/// If detection fails, it falls back to UTC.
pub fn get_local_timezone() -> Tz {
    // The TZ environment variable takes precedence over the system setting
    #[allow(clippy::collapsible_if)]
    if let Ok(tz_str) = std::env::var("TZ") {
        if let Ok(tz) = Tz::from_str(&tz_str) {
            debug!("Using timezone from TZ environment variable: {}", tz_str);
            return tz;
        }
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_str) => match Tz::from_str(&tz_str) {
            Ok(tz) => {
                debug!("Using system timezone from iana-time-zone: {}", tz_str);
                tz
            }
            Err(_) => {
                debug!(
                    "Could not parse timezone from iana-time-zone: '{}', falling back to UTC",
                    tz_str
                );
                Tz::UTC
            }
        },
        Err(e) => {
            debug!(
                "Could not detect local timezone via iana-time-zone: {:?}, falling back to UTC",
                e
            );
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ENV_MUTEX, EnvVarGuard};
    use chrono::TimeZone;

    #[test]
    fn test_timezone_config_defaults_to_utc() {
        let config = TimezoneConfig::from_cli(None, false).unwrap();
        assert!(config.is_utc());
        assert_eq!(config.display_name(), "UTC");
    }

    #[test]
    fn test_timezone_config_explicit() {
        let config = TimezoneConfig::from_cli(Some("America/New_York"), false).unwrap();
        assert!(!config.is_utc());
        assert_eq!(config.display_name(), "America/New_York");
    }

    #[test]
    fn test_timezone_config_utc_via_name() {
        assert!(TimezoneConfig::parse("UTC").unwrap().is_utc());
        assert!(TimezoneConfig::parse("utc").unwrap().is_utc());
        assert!(TimezoneConfig::parse("Etc/UTC").is_ok());
    }

    #[test]
    fn test_timezone_config_invalid() {
        assert!(TimezoneConfig::from_cli(Some("Invalid/Timezone"), false).is_err());
        assert!(TimezoneConfig::parse("+25:00").is_err());
        assert!(TimezoneConfig::parse("+5").is_err());
        assert!(TimezoneConfig::parse("-ab:cd").is_err());
    }

    #[test]
    fn test_fixed_offsets() {
        let config = TimezoneConfig::parse("+05:30").unwrap();
        assert_eq!(config.display_name(), "+05:30");

        let config = TimezoneConfig::parse("-0800").unwrap();
        assert_eq!(
            config.zone,
            ViewerZone::Offset(FixedOffset::west_opt(8 * 3600).unwrap())
        );

        let config = TimezoneConfig::parse("+02").unwrap();
        assert_eq!(
            config.zone,
            ViewerZone::Offset(FixedOffset::east_opt(2 * 3600).unwrap())
        );
    }

    #[test]
    fn test_local_timezone_from_tz_env() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut guard = EnvVarGuard::new();
        guard.set("TZ", "Africa/Accra");

        let config = TimezoneConfig::from_cli(Some("Asia/Tokyo"), true).unwrap();
        assert_eq!(config.display_name(), "Africa/Accra");
    }

    #[test]
    fn test_weekday_and_hour_shift() {
        // Friday 23:30 UTC
        let instant = Utc.with_ymd_and_hms(2021, 3, 5, 23, 30, 0).unwrap();

        let utc = TimezoneConfig::utc();
        assert_eq!(utc.weekday_and_hour(&instant), (Weekday::Fri, 23));

        let east = TimezoneConfig::parse("+01:00").unwrap();
        assert_eq!(east.weekday_and_hour(&instant), (Weekday::Sat, 0));

        let new_york = TimezoneConfig::parse("America/New_York").unwrap();
        assert_eq!(new_york.weekday_and_hour(&instant), (Weekday::Fri, 18));
    }
}
