//! One page of a cursor-paginated connection.

use crate::domain::{PageCursor, PayoutTransaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<PageCursor>,
}

impl PageInfo {
    pub fn last() -> Self {
        Self {
            has_next_page: false,
            end_cursor: None,
        }
    }

    pub fn next(cursor: &str) -> Self {
        Self {
            has_next_page: true,
            end_cursor: Some(PageCursor::new(cursor.to_string())),
        }
    }
}

/// `balanceTransactions { nodes pageInfo }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTransactionPage {
    pub nodes: Vec<PayoutTransaction>,
    pub page_info: PageInfo,
}

impl BalanceTransactionPage {
    pub fn new(nodes: Vec<PayoutTransaction>, page_info: PageInfo) -> Self {
        Self { nodes, page_info }
    }
}
