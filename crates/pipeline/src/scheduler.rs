//! Report scheduler with cron support
//!
//! Runs reports on their 6-field cron schedules. One loop checks for due
//! reports every `check_interval` and runs them one after another; two
//! reports never run at the same time.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cron::Schedule;
use ordersync_config::{Config, Credentials};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::{PipelineError, Result};
use crate::job::{RunSummary, run_report};

/// Something that can run a report by name
///
/// The scheduler only decides *when*; the runner decides *how*.
pub trait ReportRunner: Send + Sync {
    fn run_report(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<RunSummary>> + Send;
}

/// Runs reports against the live shop and spreadsheet
pub struct LiveRunner {
    config: Config,
    credentials: Credentials,
}

impl LiveRunner {
    pub fn new(config: Config, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
        }
    }
}

impl ReportRunner for LiveRunner {
    async fn run_report(&self, name: &str) -> Result<RunSummary> {
        run_report(&self.config, &self.credentials, name).await
    }
}

/// A report with a parsed cron schedule
#[derive(Debug, Clone)]
pub struct ScheduledReport {
    /// Report name
    pub name: String,
    schedule: Schedule,
    /// Next scheduled run time
    next_run: Option<DateTime<Utc>>,
}

impl ScheduledReport {
    /// Parse `expr` and schedule the first run after now
    pub fn new(name: impl Into<String>, expr: &str) -> Result<Self> {
        Self::starting_at(name, expr, Utc::now())
    }

    /// Parse `expr` and schedule the first run after `from`
    pub fn starting_at(name: impl Into<String>, expr: &str, from: DateTime<Utc>) -> Result<Self> {
        let name = name.into();
        let schedule = Schedule::from_str(expr).map_err(|e| PipelineError::InvalidSchedule {
            report: name.clone(),
            message: format!("{}: {}", expr, e),
        })?;
        let next_run = schedule.after(&from).next();

        Ok(Self {
            name,
            schedule,
            next_run,
        })
    }

    /// Get the next scheduled run time
    pub fn next_run(&self) -> Option<DateTime<Utc>> {
        self.next_run
    }

    /// Check if this report should run at `now`
    pub fn should_run(&self, now: DateTime<Utc>) -> bool {
        self.next_run.is_some_and(|next| now >= next)
    }

    /// Move the next run past `now`
    fn advance_schedule(&mut self, now: DateTime<Utc>) {
        self.next_run = self.schedule.after(&now).next();
    }
}

/// Scheduler over all scheduled reports
#[derive(Debug)]
pub struct ReportScheduler {
    reports: Vec<ScheduledReport>,
    /// Check interval for scheduled runs
    check_interval: Duration,
}

impl Default for ReportScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportScheduler {
    /// Create an empty scheduler (checks every 60s)
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
            check_interval: Duration::from_secs(60),
        }
    }

    /// Enabled reports that have a `schedule`, checked at `[global] check_interval_secs`
    ///
    /// # Errors
    ///
    /// `InvalidSchedule` if any cron expression fails to parse.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut scheduler = Self::new()
            .with_check_interval(Duration::from_secs(config.global.check_interval_secs.max(1)));

        for (name, report) in config.reports.enabled() {
            if let Some(expr) = report.schedule.as_deref() {
                scheduler.add(ScheduledReport::new(name.as_str(), expr)?);
            }
        }
        Ok(scheduler)
    }

    /// Set the check interval for scheduled runs
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// Add a scheduled report
    pub fn add(&mut self, report: ScheduledReport) {
        info!(
            report = %report.name,
            next_run = ?report.next_run,
            "registered report schedule"
        );
        self.reports.push(report);
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    pub fn reports(&self) -> &[ScheduledReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Run every report due at `now`, in registration order
    ///
    /// A failed run is logged; the report is still rescheduled. Returns the
    /// names that ran.
    pub async fn tick<R: ReportRunner>(&mut self, now: DateTime<Utc>, runner: &R) -> Vec<String> {
        let mut ran = Vec::new();

        for report in &mut self.reports {
            if !report.should_run(now) {
                continue;
            }

            info!(report = %report.name, "starting scheduled run");
            match runner.run_report(&report.name).await {
                Ok(summary) => info!(
                    report = %report.name,
                    rows = summary.rows,
                    written = summary.written,
                    partial = summary.is_partial(),
                    "scheduled run complete"
                ),
                Err(e) => error!(report = %report.name, error = %e, "scheduled run failed"),
            }

            report.advance_schedule(now);
            debug!(
                report = %report.name,
                next_run = ?report.next_run,
                "next scheduled run"
            );
            ran.push(report.name.clone());
        }

        ran
    }

    /// Run the scheduler loop until `cancel` fires
    pub async fn run<R: ReportRunner>(mut self, runner: &R, cancel: CancellationToken) {
        info!(
            reports = self.reports.len(),
            check_interval = ?self.check_interval,
            "starting report scheduler"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            self.tick(Utc::now(), runner).await;

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.check_interval) => {}
            }
        }

        info!("report scheduler stopped");
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;
