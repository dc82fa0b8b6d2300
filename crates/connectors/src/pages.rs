//! Page-by-page traversal of an order search
//!
//! Starts at page 1, advances by one after every non-empty page, and stops
//! on the first page where the server sent nothing. A page whose entries
//! all failed to decode is not empty. A failed page request ends the walk early but
//! keeps everything already yielded; the failure is logged, not returned.

use crate::query::OrderQuery;
use crate::traits::{OrderPage, OrderSource};
use ordersync_protocol::OrderRecord;
use tracing::{info, warn};

/// Why a page walk ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The source returned an empty page
    Exhausted,
    /// A page request failed; results up to that page are kept
    Failed { page: u32, error: String },
    /// The configured page ceiling was reached
    PageLimit(u32),
}

/// Summary of a finished (or in-progress) walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagesOutcome {
    /// Non-empty pages yielded
    pub pages: u32,
    /// Records yielded across all pages
    pub records: usize,
    /// Entries received but dropped as undecodable
    pub malformed: usize,
    /// None while the walk is still going
    pub stop: Option<StopReason>,
}

impl PagesOutcome {
    /// True when the walk ended because of a failed request
    pub fn is_partial(&self) -> bool {
        matches!(self.stop, Some(StopReason::Failed { .. }))
    }
}

/// Lazy cursor over the pages of one query
///
/// Not restartable: build a new cursor to walk again from page 1.
pub struct OrderPages<'a, S> {
    source: &'a S,
    query: &'a OrderQuery,
    next_page: u32,
    max_pages: Option<u32>,
    pages: u32,
    records: usize,
    malformed: usize,
    stop: Option<StopReason>,
}

impl<'a, S: OrderSource> OrderPages<'a, S> {
    pub fn new(source: &'a S, query: &'a OrderQuery) -> Self {
        Self {
            source,
            query,
            next_page: 1,
            max_pages: None,
            pages: 0,
            records: 0,
            malformed: 0,
            stop: None,
        }
    }

    /// Stop after `max` non-empty pages (None = no ceiling)
    pub fn with_max_pages(mut self, max: Option<u32>) -> Self {
        self.max_pages = max;
        self
    }

    /// Fetch the next non-empty page, or None once the walk has ended
    ///
    /// The yielded records may be empty when every entry on the page was
    /// malformed.
    pub async fn next_page(&mut self) -> Option<Vec<OrderRecord>> {
        if self.stop.is_some() {
            return None;
        }

        if let Some(max) = self.max_pages
            && self.pages >= max
        {
            warn!(
                source = self.source.name(),
                max_pages = max,
                "page limit reached before an empty page, results may be incomplete"
            );
            self.stop = Some(StopReason::PageLimit(max));
            return None;
        }

        let page = self.next_page;
        match self.source.fetch_page(self.query, page).await {
            Ok(OrderPage { records, received }) => {
                info!(
                    source = self.source.name(),
                    page,
                    received,
                    records = records.len(),
                    "fetched page"
                );
                if received == 0 {
                    self.stop = Some(StopReason::Exhausted);
                    return None;
                }
                self.pages += 1;
                self.records += records.len();
                self.malformed += received.saturating_sub(records.len());
                self.next_page += 1;
                Some(records)
            }
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    page,
                    error = %e,
                    "failed to fetch page, stopping with partial results"
                );
                self.stop = Some(StopReason::Failed {
                    page,
                    error: e.to_string(),
                });
                None
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.stop.is_some()
    }

    pub fn outcome(&self) -> PagesOutcome {
        PagesOutcome {
            pages: self.pages,
            records: self.records,
            malformed: self.malformed,
            stop: self.stop.clone(),
        }
    }
}
