//! Run command - Run reports once
//!
//! Each report fetches its orders, aggregates them and replaces its
//! worksheet. Reports run one after another; a failing report does not
//! stop the rest, but makes the command exit non-zero.

use anyhow::{Context, Result};
use clap::Args;
use ordersync_config::{Config, Credentials};
use ordersync_pipeline::{RunSummary, run_report};
use owo_colors::OwoColorize;
use tracing::error;

/// Run command arguments
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Reports to run (default: all enabled reports)
    #[arg(value_name = "REPORT")]
    pub reports: Vec<String>,
}

/// Run the run command
pub async fn run(args: RunArgs, config: Config) -> Result<()> {
    let names = select_reports(&config, &args.reports)?;
    let credentials = Credentials::from_env(&config).context("failed to resolve credentials")?;

    let mut failed = Vec::new();
    for name in &names {
        match run_report(&config, &credentials, name).await {
            Ok(summary) => print_summary(&summary),
            Err(e) => {
                error!(report = %name, error = %e, "report failed");
                println!("{} {}: {}", "✗".red(), name.bold(), e.to_string().red());
                failed.push(name.as_str());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!(
            "{} of {} reports failed: {}",
            failed.len(),
            names.len(),
            failed.join(", ")
        );
    }
    Ok(())
}

/// Named reports (all must exist), or every enabled report
fn select_reports(config: &Config, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(config
            .enabled_reports()?
            .into_iter()
            .map(str::to_string)
            .collect());
    }

    for name in requested {
        config.report(name)?;
    }
    Ok(requested.to_vec())
}

fn print_summary(summary: &RunSummary) {
    if !summary.written {
        println!(
            "{} {}: {}",
            "-".dimmed(),
            summary.report.bold(),
            "no order data found".dimmed()
        );
        return;
    }

    let mark = if summary.is_partial() {
        "!".yellow().to_string()
    } else {
        "✓".green().to_string()
    };
    println!(
        "{} {}: {} rows written ({} orders from {} pages{})",
        mark,
        summary.report.bold(),
        summary.rows,
        summary.stats.counted,
        summary.pages,
        if summary.is_partial() { ", partial" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config() -> Config {
        Config::from_str(
            r#"
[shopware]
base_url = "https://shop.example.com"

[reports.daily]
spreadsheet = "abc"
sheet = "Orders"

[reports.monthly]
kind = "monthly_status"
spreadsheet = "abc"
sheet = "Monthly"

[reports.old]
enabled = false
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_all_enabled() {
        assert_eq!(select_reports(&config(), &[]).unwrap(), vec!["daily", "monthly"]);
    }

    #[test]
    fn test_select_named() {
        let requested = vec!["monthly".to_string(), "old".to_string()];
        assert_eq!(select_reports(&config(), &requested).unwrap(), requested);
    }

    #[test]
    fn test_select_unknown() {
        let err = select_reports(&config(), &["weekly".to_string()]).unwrap_err();
        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn test_select_none_enabled() {
        assert!(select_reports(&Config::default(), &[]).is_err());
    }
}
