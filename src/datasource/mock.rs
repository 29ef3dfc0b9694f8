//! Mock data source for testing without network calls.

use super::{DataSourceError, PayoutsSource};
use crate::domain::{
    BalanceTransactionPage, Order, PageCursor, PageInfo, PayoutDate, PayoutTransaction,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One `fetch_page` call observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub date: PayoutDate,
    pub after: Option<PageCursor>,
    pub first: u32,
}

/// Mock data source that serves scripted pages keyed by the `after` cursor.
///
/// The first page is keyed by `None`. A request for an unscripted cursor fails
/// with an API error.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    pages: HashMap<Option<String>, Result<BalanceTransactionPage, DataSourceError>>,
    orders: HashMap<String, Order>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `page` for requests made after the `after` cursor.
    pub fn with_page(mut self, after: Option<&str>, page: BalanceTransactionPage) -> Self {
        self.pages.insert(after.map(str::to_string), Ok(page));
        self
    }

    /// Fail requests made after the `after` cursor.
    pub fn with_failure(mut self, after: Option<&str>, error: DataSourceError) -> Self {
        self.pages.insert(after.map(str::to_string), Err(error));
        self
    }

    /// Chain `pages` with cursors `c1`, `c2`, ...; the last page ends the
    /// connection.
    pub fn with_pages(mut self, pages: Vec<Vec<PayoutTransaction>>) -> Self {
        let count = pages.len();
        for (idx, nodes) in pages.into_iter().enumerate() {
            let after = (idx > 0).then(|| format!("c{}", idx));
            let page_info = if idx + 1 < count {
                PageInfo::next(&format!("c{}", idx + 1))
            } else {
                PageInfo::last()
            };
            self.pages
                .insert(after, Ok(BalanceTransactionPage::new(nodes, page_info)));
        }
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.insert(order.id.clone(), order);
        self
    }

    /// Page requests seen so far, in call order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PayoutsSource for MockDataSource {
    async fn fetch_page(
        &self,
        date: &PayoutDate,
        after: Option<&PageCursor>,
        first: u32,
    ) -> Result<BalanceTransactionPage, DataSourceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                date: *date,
                after: after.cloned(),
                first,
            });
        }

        let key = after.map(|c| c.as_str().to_string());
        match self.pages.get(&key) {
            Some(result) => result.clone(),
            None => Err(DataSourceError::ApiError(format!(
                "no page scripted after cursor {:?}",
                key
            ))),
        }
    }

    async fn fetch_order(&self, order_id: &str) -> Result<Option<Order>, DataSourceError> {
        Ok(self.orders.get(order_id).cloned())
    }
}
