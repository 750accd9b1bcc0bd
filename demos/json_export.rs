//! Example of exporting watchstat summaries to JSON
//!
//! Reads a local `ViewingActivity.csv` (path as the first argument),
//! summarizes it for a couple of titles and writes one JSON report per
//! title into the working directory.
//!
//! ```bash
//! cargo run --example json_export -- ViewingActivity.csv
//! ```

use std::fs;
use watchstat::{
    Result,
    aggregation::Aggregator,
    filters::{MatchField, ViewingFilter},
    output::{ChartSelection, get_formatter},
    pipeline::summarize_export,
    timezone::TimezoneConfig,
};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ViewingActivity.csv".to_string());
    let text = fs::read_to_string(&path)?;

    let aggregator = Aggregator::new(TimezoneConfig::utc());
    let json_formatter = get_formatter(true);

    for (title, output_file) in [
        ("The Office (U.S.)", "the_office_report.json"),
        ("Dark", "dark_report.json"),
    ] {
        let filter = ViewingFilter::new(MatchField::Title, title);
        let summary = summarize_export(&text, &filter, &aggregator)?;

        if summary.totals.views == 0 {
            println!("No views of {title} found");
            continue;
        }

        let json_output = json_formatter.format_summary(&summary, ChartSelection::All);
        fs::write(output_file, &json_output)?;
        println!(
            "Exported {} views of {title} ({}) to {output_file}",
            summary.totals.views,
            summary.totals.watch_time.humanize()
        );
    }

    Ok(())
}
