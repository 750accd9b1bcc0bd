//! Common test utilities for watchstat tests
//!
//! Builds viewing activity exports in the column layout of a real
//! `ViewingActivity.csv` so loader, cleaner and pipeline tests share one
//! fixture format.

use std::path::PathBuf;
use tempfile::TempDir;

/// Header row of a full export, in the order the service writes it
pub const EXPORT_HEADER: &str = "Profile Name,Start Time,Duration,Attributes,Title,\
Supplemental Video Type,Device Type,Bookmark,Latest Bookmark,Country";

/// One row of a test export
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub profile: String,
    pub start_time: String,
    pub duration: String,
    pub title: String,
    pub attributes: String,
}

impl ExportRow {
    pub fn new(profile: &str, title: &str, start_time: &str, duration: &str) -> Self {
        Self {
            profile: profile.to_string(),
            start_time: start_time.to_string(),
            duration: duration.to_string(),
            title: title.to_string(),
            attributes: String::new(),
        }
    }

    #[allow(dead_code)]
    pub fn autoplayed(mut self) -> Self {
        self.attributes = "Autoplayed: user action: None; ".to_string();
        self
    }

    fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},,Netflix Windows App,{},{},GH (Ghana)",
            quote(&self.profile),
            self.start_time,
            quote(&self.duration),
            quote(&self.attributes),
            quote(&self.title),
            quote(&self.duration),
            quote(&self.duration),
        )
    }
}

/// Quote a field if it contains CSV metacharacters
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Builder for export text
#[derive(Debug, Default, Clone)]
pub struct ExportBuilder {
    rows: Vec<ExportRow>,
}

impl ExportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, row: ExportRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Shorthand for a row with the default device and country
    pub fn view(self, profile: &str, title: &str, start_time: &str, duration: &str) -> Self {
        self.row(ExportRow::new(profile, title, start_time, duration))
    }

    pub fn build(&self) -> String {
        let mut text = String::from(EXPORT_HEADER);
        text.push('\n');
        for row in &self.rows {
            text.push_str(&row.to_csv_line());
            text.push('\n');
        }
        text
    }
}

/// A small household export: two profiles, three shows, one autoplayed
/// preview
pub fn household_export() -> String {
    ExportBuilder::new()
        .view(
            "Ekow",
            "The Office (U.S.): Season 3: The Merger (Episode 8)",
            "2021-03-05 20:00:00",
            "0:45:00",
        )
        .row(
            ExportRow::new(
                "Ekow",
                "The Office (U.S.): Season 3: A Benihana Christmas (Episode 10)",
                "2021-03-05 21:00:00",
                "0:00:30",
            )
            .autoplayed(),
        )
        .view(
            "Ekow",
            "The Office (U.S.): Season 2: Booze Cruise (Episode 11)",
            "2021-03-01 07:10:00",
            "0:21:40",
        )
        .view(
            "Ama",
            "Dark: Season 1: Secrets (Episode 1)",
            "2021-03-06 09:15:00",
            "1:30:00",
        )
        .view(
            "Ama",
            "The Office: Series 1: Downsize (Episode 1)",
            "2021-03-07 22:05:00",
            "0:29:00",
        )
        .view(
            "Ama",
            "The Office (U.S.): Season 1: Pilot (Episode 1)",
            "2021-03-07 23:30:00",
            "1 day, 02:00:00",
        )
        .build()
}

/// Write export text into a fresh temp dir, returning the dir guard and path
#[allow(dead_code)]
pub fn write_export(text: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ViewingActivity.csv");
    std::fs::write(&path, text).unwrap();
    (dir, path)
}
