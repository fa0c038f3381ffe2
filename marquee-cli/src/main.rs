//! Marquee CLI - Command-line interface
//!
//! Serves the browser UI or runs the search flow from a terminal.

mod commands;

use clap::Parser;
use marquee_core::MarqueeConfig;
use marquee_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Find movies you'll enjoy without the hassle")]
struct Cli {
    /// Console log level
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    /// Keep search metrics in memory instead of the hosted document store
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.into(), None)?;

    let config = MarqueeConfig::from_env()?;
    for setting in config.missing_settings() {
        tracing::warn!("{setting} is not set; requests that need it will fail");
    }

    commands::handle_command(cli.command, config, cli.dev).await
}
