//! ordersync - Connectors
//!
//! Pull-based connectors that fetch orders from a shop API one page at a
//! time.
//!
//! # Available Connectors
//!
//! - **Shopware** - Admin API order search with OAuth client credentials
//!
//! # Design Principles
//!
//! - **Sequential**: one request outstanding at a time, pages in order
//! - **Lazy paging**: [`OrderPages`] yields a page per call and stops on the
//!   first empty page
//! - **Partial results**: a failed page ends the walk but keeps what was fetched
//! - **Simple interface**: each connector implements [`OrderSource`]
//!
//! # Example
//!
//! ```ignore
//! use ordersync_connectors::{OrderPages, OrderQuery, Shopware, ShopwareClientConfig};
//!
//! let shopware = Shopware::new(ShopwareClientConfig::for_base_url(
//!     "https://shop.example.com",
//!     client_id,
//!     client_secret,
//! ))?;
//! let search = shopware.orders(shopware.access_token().await?);
//! let query = OrderQuery::new("2022-01-01T00:00:00.000Z");
//!
//! let mut pages = OrderPages::new(&search, &query);
//! while let Some(page) = pages.next_page().await {
//!     // fold page into an aggregator
//! }
//! ```

mod error;
mod pages;
mod query;
mod shopware;
mod traits;

// Re-exports
pub use error::ConnectorError;
pub use pages::{OrderPages, PagesOutcome, StopReason};
pub use query::{DEFAULT_LIMIT, ORDER_DATE_FIELD, OrderQuery, STATUS_FIELD, StatusFilter};
pub use shopware::{AccessToken, OrderSearch, Shopware, ShopwareClientConfig};
pub use traits::{OrderPage, OrderSource};
