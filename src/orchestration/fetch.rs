use crate::config::DEFAULT_PAGE_SIZE;
use crate::datasource::{DataSourceError, PayoutsSource};
use crate::domain::{PageCursor, PayoutDate, PayoutTransaction};
use futures::stream::{self, Stream, TryStreamExt};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetching page {page} failed: {source}")]
    DataSource {
        page: usize,
        #[source]
        source: DataSourceError,
    },
    #[error("page {page} reported more results but the cursor did not advance (cursor {cursor:?})")]
    StalledCursor {
        page: usize,
        cursor: Option<PageCursor>,
    },
}

/// Filtered result of one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutPage {
    /// 1-based page number within this fetch.
    pub number: usize,
    /// Nodes that survived the transfer filter, in server order.
    pub transactions: Vec<PayoutTransaction>,
    /// Internal transfers dropped from this page.
    pub excluded: usize,
}

struct Cursor {
    after: Option<PageCursor>,
    page: usize,
    done: bool,
}

/// Drives `balanceTransactions` pagination for one payout date.
#[derive(Debug, Clone)]
pub struct PayoutFetcher {
    source: Arc<dyn PayoutsSource>,
    page_size: u32,
}

impl PayoutFetcher {
    pub fn new(source: Arc<dyn PayoutsSource>) -> Self {
        Self::with_page_size(source, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(source: Arc<dyn PayoutsSource>, page_size: u32) -> Self {
        Self { source, page_size }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Lazily request pages for `date`, one request at a time.
    ///
    /// Each call starts over from the first page. The stream ends after the
    /// page with `hasNextPage == false` and stops at the first error.
    pub fn pages(&self, date: PayoutDate) -> impl Stream<Item = Result<PayoutPage, FetchError>> + '_ {
        let start = Cursor {
            after: None,
            page: 0,
            done: false,
        };

        stream::try_unfold(start, move |cursor| async move {
            if cursor.done {
                return Ok(None);
            }

            let number = cursor.page + 1;
            let page = self
                .source
                .fetch_page(&date, cursor.after.as_ref(), self.page_size)
                .await
                .map_err(|source| FetchError::DataSource {
                    page: number,
                    source,
                })?;

            let received = page.nodes.len();
            let transactions: Vec<PayoutTransaction> = page
                .nodes
                .into_iter()
                .filter(|tx| !tx.is_internal_transfer())
                .collect();
            let excluded = received - transactions.len();

            tracing::debug!(
                "Page {} for {}: {} nodes, {} kept, has_next_page={}",
                number,
                date,
                received,
                transactions.len(),
                page.page_info.has_next_page
            );

            let next = if page.page_info.has_next_page {
                let end_cursor = page.page_info.end_cursor;
                if end_cursor.is_none() || end_cursor == cursor.after {
                    return Err(FetchError::StalledCursor {
                        page: number,
                        cursor: end_cursor,
                    });
                }
                Cursor {
                    after: end_cursor,
                    page: number,
                    done: false,
                }
            } else {
                Cursor {
                    after: None,
                    page: number,
                    done: true,
                }
            };

            Ok::<_, FetchError>(Some((
                PayoutPage {
                    number,
                    transactions,
                    excluded,
                },
                next,
            )))
        })
    }

    /// Fetch every non-transfer balance transaction paid out on `date`.
    ///
    /// Any failing page fails the whole call; partial results are discarded.
    pub async fn fetch_payouts_by_date(
        &self,
        date: PayoutDate,
    ) -> Result<Vec<PayoutTransaction>, FetchError> {
        let pages = self.pages(date);
        futures::pin_mut!(pages);

        let mut results = Vec::new();
        let mut page_count = 0;
        let mut excluded = 0;
        while let Some(page) = pages.try_next().await? {
            page_count += 1;
            excluded += page.excluded;
            results.extend(page.transactions);
        }

        tracing::info!(
            "Fetched {} payout transactions for {} across {} pages ({} internal transfers excluded)",
            results.len(),
            date,
            page_count,
            excluded
        );

        Ok(results)
    }
}
