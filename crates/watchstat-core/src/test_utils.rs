//! Shared test utilities for unit tests
//!
//! Integration tests in the root package keep their own helpers in
//! `tests/common/mod.rs`; this module is only compiled for this crate's
//! unit tests.

use crate::types::{CleanedRecord, WatchTime};
use chrono::NaiveDateTime;
use std::env;
use std::sync::Mutex;

// Serializes environment variable modifications across tests
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// RAII guard for environment variable manipulation in tests
///
/// Restores every touched variable on drop, even if the test panics.
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set an environment variable and save its original value for restoration
    pub fn set(&mut self, key: &str, value: &str) {
        let original = env::var(key).ok();
        self.vars.push((key.to_string(), original));
        // env::set_var is unsafe since the 2024 edition
        unsafe {
            env::set_var(key, value);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.vars.iter().rev() {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

impl Default for EnvVarGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a cleaned record from `YYYY-MM-DD HH:MM:SS` and a duration in seconds
pub fn cleaned_record(title: &str, start: &str, duration_secs: u64) -> CleanedRecord {
    let start_time = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S")
        .expect("test timestamp")
        .and_utc();
    CleanedRecord {
        profile_name: "Ekow".to_string(),
        title: title.to_string(),
        start_time,
        duration: WatchTime::from_secs(duration_secs),
    }
}
