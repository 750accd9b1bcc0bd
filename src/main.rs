//! watchstat - Chart watch time from a streaming-service viewing activity export

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use watchstat::{cli::Cli, error::Result, output::get_formatter, pipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // --quiet overrides RUST_LOG, --verbose replaces it
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("watchstat=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("watchstat=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let to_terminal = cli.output.is_none() && is_terminal::is_terminal(std::io::stdout());
    if !to_terminal {
        colored::control::set_override(false);
    }

    // The spinner draws on stderr
    let show_progress = !cli.quiet && is_terminal::is_terminal(std::io::stderr());
    let config = cli.pipeline_config(show_progress)?;
    let summary = pipeline::run(&config).await?;

    let report = get_formatter(cli.json).format_summary(&summary, cli.chart);
    match &cli.output {
        Some(path) => {
            std::fs::write(path, format!("{report}\n"))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{report}"),
    }

    Ok(())
}
