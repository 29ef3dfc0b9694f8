//! Data source abstraction for reading Shopify Payments data.

use crate::domain::{BalanceTransactionPage, Order, PageCursor, PayoutDate};
use async_trait::async_trait;
use std::fmt;

pub mod mock;
pub mod shopify;

pub use mock::{MockDataSource, RecordedRequest};
pub use shopify::ShopifyDataSource;

/// Source of balance transaction pages and order lookups.
///
/// Implementations issue exactly one request per call. Pagination is driven
/// by the caller; no retry or backoff happens here.
#[async_trait]
pub trait PayoutsSource: Send + Sync + fmt::Debug {
    /// Fetch one page of balance transactions paid out on `date`.
    ///
    /// # Arguments
    /// * `date` - Payout date, sent as the `payout_date:<date>` search filter
    /// * `after` - Cursor of the previous page, `None` for the first page
    /// * `first` - Maximum number of nodes to return
    async fn fetch_page(
        &self,
        date: &PayoutDate,
        after: Option<&PageCursor>,
        first: u32,
    ) -> Result<BalanceTransactionPage, DataSourceError>;

    /// Look up an order by its global ID. `Ok(None)` when the order does not
    /// exist.
    async fn fetch_order(&self, order_id: &str) -> Result<Option<Order>, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// Transport failure (connection refused, DNS, TLS, reading the body)
    NetworkError(String),
    /// Non-2xx response, with the body the server returned
    HttpError { status: u16, message: String },
    /// GraphQL `errors` payload, or a response missing the expected shape
    ApiError(String),
    /// Body was not valid JSON for the expected response
    ParseError(String),
}

impl DataSourceError {
    /// True when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, DataSourceError::NetworkError(_))
    }
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ApiError(msg) => write!(f, "API error: {}", msg),
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}
