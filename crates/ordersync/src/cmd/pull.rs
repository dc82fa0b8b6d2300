//! Pull command - Print a report without writing it
//!
//! Fetches and aggregates one configured report from the shop and prints
//! the table to stdout. No sheet is touched.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ordersync_config::{Config, Credentials};
use ordersync_connectors::Shopware;
use ordersync_pipeline::ReportJob;
use ordersync_sinks::{OutputFormat, StdoutConfig, StdoutSink};
use tracing::{info, warn};

/// Pull command arguments
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Report name from the config
    #[arg(value_name = "REPORT")]
    pub report: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = PullOutput::Table)]
    pub output: PullOutput,

    /// Show at most this many rows (0 = all)
    #[arg(long, default_value_t = 0)]
    pub max_rows: usize,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PullOutput {
    /// Aligned columns
    Table,
    /// JSON array of row objects
    Json,
}

impl PullArgs {
    fn stdout_config(&self) -> StdoutConfig {
        let format = match self.output {
            PullOutput::Table => OutputFormat::Text,
            PullOutput::Json => OutputFormat::Json,
        };
        StdoutConfig {
            color: format == OutputFormat::Text
                && !self.no_color
                && std::io::stdout().is_terminal(),
            format,
            max_rows: self.max_rows,
        }
    }
}

/// Run the pull command
pub async fn run(args: PullArgs, config: Config) -> Result<()> {
    let report = config.report(&args.report)?;
    let credentials = Credentials::from_env(&config).context("failed to resolve credentials")?;
    let job = ReportJob::from_config(&args.report, report, &config.shopware);

    info!(
        connector = "shopware",
        report = %args.report,
        kind = %job.kind(),
        "pulling report"
    );

    let shopware = Shopware::from_config(&config, &credentials)
        .context("failed to create Shopware connector")?;
    let token = shopware
        .access_token()
        .await
        .context("failed to authenticate with Shopware")?;

    let sink = StdoutSink::new(args.stdout_config());
    let summary = job
        .run(&shopware.orders(token), &sink)
        .await
        .context("failed to print report")?;

    if summary.is_partial() {
        warn!(report = %args.report, "output covers partial data");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: PullOutput, no_color: bool) -> PullArgs {
        PullArgs {
            report: "daily".into(),
            output,
            max_rows: 5,
            no_color,
        }
    }

    #[test]
    fn test_json_output_never_colored() {
        let config = args(PullOutput::Json, false).stdout_config();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.color);
        assert_eq!(config.max_rows, 5);
    }

    #[test]
    fn test_no_color_flag() {
        let config = args(PullOutput::Table, true).stdout_config();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.color);
    }
}
