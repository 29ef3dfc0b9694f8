//! Domain types for Shopify Payments balance transactions.
//!
//! This module provides:
//! - Amounts kept as the exact strings the server sent
//! - Primitives: PayoutDate, PageCursor, TransactionType
//! - PayoutTransaction and the paginated page envelope
//! - Order summaries for the order lookup

pub mod amount;
pub mod order;
pub mod page;
pub mod primitives;
pub mod transaction;

pub use amount::Amount;
pub use order::Order;
pub use page::{BalanceTransactionPage, PageInfo};
pub use primitives::{PageCursor, PayoutDate, TransactionType};
pub use transaction::{AdjustmentOrder, Money, OrderRef, PayoutRef, PayoutTransaction};
