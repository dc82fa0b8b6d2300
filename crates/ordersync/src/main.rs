//! ordersync - Shop order reports in Google Sheets
//!
//! # Usage
//!
//! ```bash
//! # Run every enabled report once
//! ordersync run
//! ordersync --config configs/ordersync.toml run daily
//!
//! # Print a report without writing it anywhere
//! ordersync pull daily --output json
//!
//! # Run reports on their cron schedules
//! ordersync serve
//!
//! # Validate config and credentials without network calls
//! ordersync check
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ordersync_config::{LogConfig, LogFormat};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// ordersync - Shop order reports in Google Sheets
#[derive(Parser, Debug)]
#[command(name = "ordersync")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true, env = "ORDERSYNC_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run reports once and write them to their sheets
    Run(cmd::run::RunArgs),

    /// Fetch and aggregate one report, print it to stdout
    Pull(cmd::pull::PullArgs),

    /// Run scheduled reports until interrupted
    Serve,

    /// Validate configuration and credentials (no network)
    Check(cmd::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in .env; a missing file is fine
    let dotenv = dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let loaded = cmd::load_config(cli.config.as_deref())?;
    init_logging(&loaded.config.log, cli.log_level.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %loaded.source(),
        dotenv = ?dotenv,
        "ordersync starting"
    );

    match cli.command {
        Command::Run(args) => cmd::run::run(args, loaded.config).await,
        Command::Pull(args) => cmd::pull::run(args, loaded.config).await,
        Command::Serve => cmd::serve::run(loaded.config).await,
        Command::Check(args) => cmd::check::run(args, &loaded),
    }
}

/// Resolve log level: CLI flag > config file
fn resolve_log_level<'a>(cli_level: Option<&'a str>, log: &LogConfig) -> &'a str {
    cli_level.unwrap_or(log.level.as_str())
}

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr so `pull` output on stdout stays clean.
fn init_logging(log: &LogConfig, cli_level: Option<&str>) -> Result<()> {
    let level = resolve_log_level(cli_level, log);
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match log.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Console => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(log.ansi)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordersync_config::LogLevel;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["ordersync", "run", "daily", "monthly"]).unwrap();
        assert!(matches!(cli.command, Command::Run(_)));

        let cli = Cli::try_parse_from([
            "ordersync",
            "pull",
            "daily",
            "--output",
            "json",
            "--config",
            "x.toml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Pull(_)));
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("x.toml")));

        assert!(Cli::try_parse_from(["ordersync", "pull"]).is_err());
        assert!(Cli::try_parse_from(["ordersync"]).is_err());
    }

    #[test]
    fn test_resolve_log_level() {
        let log = LogConfig {
            level: LogLevel::Warn,
            ..Default::default()
        };
        assert_eq!(resolve_log_level(None, &log), "warn");
        assert_eq!(resolve_log_level(Some("debug"), &log), "debug");
    }
}
