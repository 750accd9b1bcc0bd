//! Output formatting module for watchstat
//!
//! Formatters are the charting collaborator: they receive finished,
//! bucket-ordered series and render them. Two formats are provided:
//! - Table format, a horizontal bar chart per series for the terminal
//! - JSON format for machine-readable output and other plotting tools
//!
//! # Examples
//!
//! ```
//! use watchstat::aggregation::Aggregator;
//! use watchstat::output::{ChartSelection, get_formatter};
//!
//! let summary = Aggregator::default().summarize("title \"Dark\"", &[]);
//!
//! let table = get_formatter(false).format_summary(&summary, ChartSelection::All);
//! assert!(table.contains("Watch time by weekday"));
//!
//! let json = get_formatter(true).format_summary(&summary, ChartSelection::Hour);
//! assert!(json.contains("\"by_hour\""));
//! ```

use crate::aggregation_types::{AggregateSeries, Dimension, WatchSummary};
use crate::types::WatchTime;
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::json;

/// Width of the longest bar in the table charts, in cells
const BAR_WIDTH: usize = 40;
const BAR_CELL: char = '█';

/// Which charts to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartSelection {
    /// Both the weekday and the hour-of-day chart
    #[default]
    All,
    /// Only watch time by weekday
    Weekday,
    /// Only watch time by hour of day
    Hour,
}

impl ChartSelection {
    fn includes(&self, dimension: Dimension) -> bool {
        match self {
            ChartSelection::All => true,
            ChartSelection::Weekday => dimension == Dimension::Weekday,
            ChartSelection::Hour => dimension == Dimension::Hour,
        }
    }
}

/// Trait for output formatters
///
/// # Example Implementation
///
/// ```
/// use watchstat::aggregation_types::{AggregateSeries, WatchSummary};
/// use watchstat::output::{ChartSelection, OutputFormatter};
///
/// struct TotalOnly;
///
/// impl OutputFormatter for TotalOnly {
///     fn format_series(&self, series: &AggregateSeries, title: &str) -> String {
///         format!("{title}: {}", series.total())
///     }
///
///     fn format_summary(&self, summary: &WatchSummary, _charts: ChartSelection) -> String {
///         summary.totals.watch_time.to_string()
///     }
/// }
/// ```
pub trait OutputFormatter {
    /// Render one bucket-ordered series under a chart title
    fn format_series(&self, series: &AggregateSeries, title: &str) -> String;

    /// Render the grand total and the selected charts
    fn format_summary(&self, summary: &WatchSummary, charts: ChartSelection) -> String;
}

/// Table formatter for human-readable output
///
/// Each series becomes a table with one row per bucket and a bar scaled to
/// the largest bucket.
pub struct TableFormatter;

impl TableFormatter {
    /// Bar of up to `width` cells proportional to `value / max`
    ///
    /// Any non-zero value gets at least one cell; a zero maximum yields an
    /// empty bar.
    fn format_bar(value: WatchTime, max: WatchTime, width: usize) -> String {
        if max.is_zero() || value.is_zero() {
            return String::new();
        }
        let ratio = value.as_secs() as f64 / max.as_secs() as f64;
        let cells = ((ratio * width as f64).round() as usize).clamp(1, width);
        std::iter::repeat_n(BAR_CELL, cells).collect()
    }

    fn bucket_label(dimension: Dimension, label: &str) -> String {
        match dimension {
            Dimension::Weekday => label.to_string(),
            Dimension::Hour => format!("{label:0>2}:00"),
        }
    }

    fn column_title(dimension: Dimension) -> &'static str {
        match dimension {
            Dimension::Weekday => "Weekday",
            Dimension::Hour => "Hour",
        }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_series(&self, series: &AggregateSeries, title: &str) -> String {
        let mut output = format!("{}\n", title.bold());

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![
            b -> Self::column_title(series.dimension),
            b -> "Views",
            b -> "Watch time",
            b -> ""
        ]);

        let max = series.max();
        for point in &series.points {
            table.add_row(row![
                Self::bucket_label(series.dimension, &point.label),
                r -> point.views,
                r -> point.watch_time.format_clock(),
                Self::format_bar(point.watch_time, max, BAR_WIDTH)
            ]);
        }
        output.push_str(&table.to_string());

        if let Some(peak) = series.peak() {
            output.push_str(&format!(
                "Peak: {} ({})\n",
                Self::bucket_label(series.dimension, &peak.label),
                peak.watch_time.humanize()
            ));
        }
        output
    }

    fn format_summary(&self, summary: &WatchSummary, charts: ChartSelection) -> String {
        let mut output = format!(
            "{}\n",
            format!("Watch time for {} ({})", summary.label, summary.timezone).bold()
        );
        output.push_str(&format!(
            "Total: {} ({}) across {} views\n",
            summary.totals.watch_time,
            summary.totals.watch_time.humanize(),
            summary.totals.views
        ));

        for series in [&summary.by_weekday, &summary.by_hour] {
            if charts.includes(series.dimension) {
                output.push('\n');
                output.push_str(&self.format_series(series, series.dimension.title()));
            }
        }
        output
    }
}

/// JSON formatter for machine-readable output
///
/// Watch times are given in seconds alongside their display strings.
pub struct JsonFormatter;

impl JsonFormatter {
    fn series_json(series: &AggregateSeries, title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "dimension": series.dimension,
            "points": series.points.iter().map(|p| json!({
                "label": p.label,
                "views": p.views,
                "seconds": p.watch_time.as_secs(),
                "watch_time": p.watch_time.format_clock(),
            })).collect::<Vec<_>>(),
        })
    }

    fn render(value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_series(&self, series: &AggregateSeries, title: &str) -> String {
        Self::render(&Self::series_json(series, title))
    }

    fn format_summary(&self, summary: &WatchSummary, charts: ChartSelection) -> String {
        let mut output = json!({
            "label": summary.label,
            "timezone": summary.timezone,
            "total": {
                "seconds": summary.totals.watch_time.as_secs(),
                "display": summary.totals.watch_time.to_string(),
                "views": summary.totals.views,
            },
        });

        if charts.includes(Dimension::Weekday) {
            output["by_weekday"] =
                Self::series_json(&summary.by_weekday, Dimension::Weekday.title());
        }
        if charts.includes(Dimension::Hour) {
            output["by_hour"] = Self::series_json(&summary.by_hour, Dimension::Hour.title());
        }

        Self::render(&output)
    }
}

/// Get the appropriate formatter based on output format
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
