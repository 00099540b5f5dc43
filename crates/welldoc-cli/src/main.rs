//! Welldoc CLI - report structure recovery and budgeted summaries.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use welldoc_cli::commands;
use welldoc_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> welldoc_cli::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let default_filter = if cli.verbose { "welldoc=debug" } else { "welldoc=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Select(args) => commands::execute_select(args, &config, &formatter).await?,
        Command::Coverage(args) => commands::execute_coverage(args, &config, &formatter).await?,
        Command::Index(args) => commands::execute_index(args, &config, &formatter).await?,
        Command::Summarize(args) => commands::execute_summarize(args, &config, &formatter).await?,
    }

    Ok(())
}
