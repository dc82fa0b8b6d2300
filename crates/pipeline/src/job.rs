//! Report jobs
//!
//! A [`ReportJob`] runs one report end to end:
//!
//! ```text
//! OrderPages --page--> Aggregator --GroupingTable--> tabulate --Table--> TabularSink
//! ```
//!
//! Stages run strictly in order with one request outstanding at a time.

use ordersync_analytics::{AggregateStats, Aggregator, GroupingTable, tabulate};
use ordersync_config::{Config, Credentials, ReportConfig, ShopwareConfig};
use ordersync_connectors::{
    OrderPages, OrderQuery, OrderSource, PagesOutcome, Shopware, StatusFilter, StopReason,
};
use ordersync_protocol::{DedupMode, ReportKind, Table};
use ordersync_sinks::stdout::render_text;
use ordersync_sinks::{GoogleSheetsSink, ServiceAccount, SheetsSettings, TabularSink};
use tracing::{Level, debug, enabled, info, warn};

use crate::error::Result;

/// Rows shown in the debug preview
const PREVIEW_ROWS: usize = 10;

/// One configured report, ready to run
#[derive(Debug, Clone)]
pub struct ReportJob {
    name: String,
    kind: ReportKind,
    dedup: DedupMode,
    query: OrderQuery,
    max_pages: Option<u32>,
}

/// Fetched and tabulated report, not yet written anywhere
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub table: Table,
    pub pages: PagesOutcome,
    pub stats: AggregateStats,
}

impl ReportOutput {
    /// True when no order made it into any group
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub report: String,
    pub kind: ReportKind,
    /// Non-empty pages fetched
    pub pages: u32,
    /// Records received across all pages
    pub records: usize,
    pub stats: AggregateStats,
    /// Table rows produced
    pub rows: usize,
    /// Whether the sink was cleared and written
    pub written: bool,
    pub stop: Option<StopReason>,
}

impl RunSummary {
    /// True when paging stopped on a failed request
    pub fn is_partial(&self) -> bool {
        matches!(self.stop, Some(StopReason::Failed { .. }))
    }
}

impl ReportJob {
    pub fn new(name: impl Into<String>, kind: ReportKind, query: OrderQuery) -> Self {
        Self {
            name: name.into(),
            kind,
            dedup: kind.default_dedup(),
            query,
            max_pages: None,
        }
    }

    /// Build a job from its config section and the shop settings
    pub fn from_config(name: &str, report: &ReportConfig, shopware: &ShopwareConfig) -> Self {
        let query = OrderQuery::new(report.since.clone())
            .with_status(StatusFilter::from_statuses(report.statuses.clone()))
            .with_limit(shopware.page_size)
            .with_associations(report.associations);

        Self::new(name, report.kind, query)
            .with_dedup(report.dedup_mode())
            .with_max_pages(shopware.max_pages)
    }

    pub fn with_dedup(mut self, dedup: DedupMode) -> Self {
        self.dedup = dedup;
        self
    }

    /// Stop paging after `max` pages (None = until an empty page)
    pub fn with_max_pages(mut self, max: Option<u32>) -> Self {
        self.max_pages = max;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn dedup(&self) -> DedupMode {
        self.dedup
    }

    pub fn query(&self) -> &OrderQuery {
        &self.query
    }

    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    /// Walk all pages and fold them into a grouping table
    pub async fn aggregate<S: OrderSource>(
        &self,
        source: &S,
    ) -> (GroupingTable, PagesOutcome, AggregateStats) {
        let mut aggregator = Aggregator::new(self.kind, self.dedup);
        let mut pages = OrderPages::new(source, &self.query).with_max_pages(self.max_pages);

        while let Some(page) = pages.next_page().await {
            aggregator.fold_all(&page);
        }

        let outcome = pages.outcome();
        let stats = aggregator.stats();
        info!(
            report = %self.name,
            kind = %self.kind,
            pages = outcome.pages,
            records = outcome.records,
            malformed = outcome.malformed,
            counted = stats.counted,
            duplicates = stats.duplicates,
            skipped = stats.skipped,
            "aggregated orders"
        );
        if outcome.is_partial() {
            warn!(report = %self.name, "order fetch ended early, report covers partial data");
        }

        (aggregator.finish(), outcome, stats)
    }

    /// Fetch, aggregate and tabulate without touching any sink
    pub async fn produce<S: OrderSource>(&self, source: &S) -> ReportOutput {
        let (groups, pages, stats) = self.aggregate(source).await;
        let table = tabulate(&groups);

        if !table.is_empty() && enabled!(Level::DEBUG) {
            debug!(
                report = %self.name,
                rows = table.len(),
                "preview:\n{}",
                render_text(&table, PREVIEW_ROWS, false)
            );
        }

        ReportOutput {
            table,
            pages,
            stats,
        }
    }

    /// Clear the sink and write the table
    pub async fn deliver<K: TabularSink>(&self, sink: &K, table: &Table) -> Result<()> {
        sink.clear().await?;
        sink.write(table).await?;
        info!(
            report = %self.name,
            sink = sink.name(),
            rows = table.len(),
            "report written"
        );
        Ok(())
    }

    /// Run the whole report against `source` and `sink`
    ///
    /// When no order lands in any group the sink is left untouched.
    ///
    /// # Errors
    ///
    /// Only sink failures; page fetch errors end paging early instead.
    pub async fn run<S: OrderSource, K: TabularSink>(
        &self,
        source: &S,
        sink: &K,
    ) -> Result<RunSummary> {
        let output = self.produce(source).await;
        if output.is_empty() {
            info!(report = %self.name, "no order data found");
            return Ok(self.summary(&output, false));
        }

        self.deliver(sink, &output.table).await?;
        Ok(self.summary(&output, true))
    }

    pub fn summary(&self, output: &ReportOutput, written: bool) -> RunSummary {
        RunSummary {
            report: self.name.clone(),
            kind: self.kind,
            pages: output.pages.pages,
            records: output.pages.records,
            stats: output.stats,
            rows: output.table.len(),
            written,
            stop: output.pages.stop.clone(),
        }
    }
}

/// Run one configured report against the live shop and spreadsheet
///
/// Order of network calls: shop token, order pages, then (only if there is
/// data) Google token, worksheet lookup, clear, write.
///
/// # Errors
///
/// Unknown report, bad credentials, shop authentication, or sink failures.
pub async fn run_report(
    config: &Config,
    credentials: &Credentials,
    name: &str,
) -> Result<RunSummary> {
    let report = config.report(name)?;
    let account = ServiceAccount::from_json(&credentials.service_account_json)?;
    let job = ReportJob::from_config(name, report, &config.shopware);

    info!(report = %name, kind = %job.kind(), since = %report.since, "starting report");

    let shopware = Shopware::from_config(config, credentials)?;
    let token = shopware.access_token().await?;
    let search = shopware.orders(token);

    let output = job.produce(&search).await;
    if output.is_empty() {
        info!(report = %name, "no order data found");
        return Ok(job.summary(&output, false));
    }

    let settings = SheetsSettings::for_report(config, report);
    let sink = GoogleSheetsSink::connect(settings, &account).await?;
    job.deliver(&sink, &output.table).await?;
    Ok(job.summary(&output, true))
}
