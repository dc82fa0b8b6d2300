//! Check command - Validate configuration without network calls
//!
//! # Usage
//!
//! ```bash
//! ordersync check
//! ordersync check --skip-env
//! ```

use anyhow::Result;
use clap::Args;
use ordersync_config::{Config, Credentials, ReportConfig};
use ordersync_pipeline::ScheduledReport;
use ordersync_sinks::{ServiceAccount, spreadsheet_id};
use owo_colors::OwoColorize;

use super::LoadedConfig;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Skip environment credential checks
    #[arg(long)]
    pub skip_env: bool,
}

pub fn run(args: CheckArgs, loaded: &LoadedConfig) -> Result<()> {
    let config = &loaded.config;

    println!();
    println!("{}", "ordersync check".bold());
    println!("{}", "─".repeat(50));
    println!("Config        {}", loaded.source().dimmed());
    println!("Shop          {}", config.shopware.base_url.cyan());
    println!("{}", "─".repeat(50));
    println!();

    let mut all_ok = true;

    println!("Reports:");
    if config.reports.enabled().next().is_none() {
        println!("  {}", "✗ no enabled reports".red());
        all_ok = false;
    }
    for (name, report) in config.reports.iter() {
        print!("  {}... ", name);
        if !report.enabled {
            println!("{}", "disabled".dimmed());
            continue;
        }
        match check_report(name, report) {
            Ok(detail) => println!("{} {}", "✓".green(), detail.dimmed()),
            Err(e) => {
                println!("{}", "✗".red());
                println!("    {}", e.to_string().red());
                all_ok = false;
            }
        }
    }

    if !args.skip_env {
        print!("Credentials... ");
        match check_credentials(config) {
            Ok(email) => println!("{} {}", "✓".green(), email.dimmed()),
            Err(e) => {
                println!("{}", "✗".red());
                println!("  {}", e.to_string().red());
                all_ok = false;
            }
        }
    }

    println!();
    if !all_ok {
        anyhow::bail!("configuration check failed");
    }
    println!("{}", "All checks passed!".green().bold());
    println!();
    Ok(())
}

/// Destination id and schedule of one enabled report
fn check_report(name: &str, report: &ReportConfig) -> Result<String> {
    let id = spreadsheet_id(&report.spreadsheet)?;
    let schedule = match report.schedule.as_deref() {
        Some(expr) => {
            let scheduled = ScheduledReport::new(name, expr)?;
            match scheduled.next_run() {
                Some(next) => format!("next run {}", next.format("%Y-%m-%d %H:%M:%S UTC")),
                None => "schedule never fires".to_string(),
            }
        }
        None => "manual".to_string(),
    };
    Ok(format!("{} -> {} / {} ({})", report.kind, id, report.sheet, schedule))
}

/// Resolve secrets and sign a throwaway assertion to prove the key is usable
fn check_credentials(config: &Config) -> Result<String> {
    let credentials = Credentials::from_env(config)?;
    let account = ServiceAccount::from_json(&credentials.service_account_json)?;
    account.assertion(0)?;
    Ok(account.client_email)
}
