//! Order source trait definition

use crate::error::ConnectorError;
use crate::query::OrderQuery;
use ordersync_protocol::OrderRecord;

/// One page of search results
///
/// `received` counts the entries the server sent, decodable or not. Only a
/// page with `received == 0` ends the walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPage {
    pub records: Vec<OrderRecord>,
    pub received: usize,
}

impl OrderPage {
    /// Page whose records all decoded
    pub fn new(records: Vec<OrderRecord>) -> Self {
        let received = records.len();
        Self { records, received }
    }

    /// Entries that were received but could not be decoded
    pub fn malformed(&self) -> usize {
        self.received.saturating_sub(self.records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.received == 0
    }
}

impl From<Vec<OrderRecord>> for OrderPage {
    fn from(records: Vec<OrderRecord>) -> Self {
        Self::new(records)
    }
}

/// Trait for paginated order sources
///
/// A source answers one page of a search at a time. Paging policy
/// (where to start, when to stop) lives in [`OrderPages`](crate::OrderPages).
pub trait OrderSource: Send + Sync {
    /// Returns the source name (e.g., "shopware")
    fn name(&self) -> &'static str;

    /// Fetch one page (1-based) of orders matching `query`
    ///
    /// A page with nothing received means there are no more results.
    fn fetch_page(
        &self,
        query: &OrderQuery,
        page: u32,
    ) -> impl std::future::Future<Output = Result<OrderPage, ConnectorError>> + Send;
}
