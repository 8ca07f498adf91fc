//! formglide demo binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use formglide::config::Config;

#[derive(Parser)]
#[command(name = "formglide")]
#[command(about = "Animated form widgets demo", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Theme name (built-in, embedded, or a file in the themes directory)
    #[arg(short, long)]
    theme: Option<String>,

    /// Frame poll interval in milliseconds
    #[arg(long, value_name = "MS")]
    tick_rate: Option<u64>,

    /// Mirror the form for right-to-left locales
    #[arg(long)]
    rtl: bool,
}

fn main() -> Result<()> {
    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG to control the level, e.g. RUST_LOG=debug)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("formglide.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config).context("Failed to load configuration")?;
    if let Some(tick_rate) = cli.tick_rate {
        config.tick_rate_ms = tick_rate;
    }
    if cli.rtl {
        config.rtl = true;
    }
    let theme = config.resolve_theme(cli.theme.as_deref());

    tracing::info!("starting formglide demo with theme {:?}", theme.name);
    formglide::app::run(&config, theme)
}
