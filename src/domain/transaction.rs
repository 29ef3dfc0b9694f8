//! Shopify Payments balance transaction as returned by `balanceTransactions`.

use crate::domain::{Amount, TransactionType};
use serde::{Deserialize, Serialize};

/// `MoneyV2`. Fee and net are only queried for their amount, so the currency
/// is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

/// Weak reference to the payout a transaction settled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRef {
    pub id: String,
    pub status: Option<String>,
}

/// Weak reference to the order a transaction belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: String,
}

/// Order-level breakdown of an adjustment transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentOrder {
    pub order_transaction_id: Option<String>,
    pub amount: Option<Money>,
    pub name: Option<String>,
}

/// One node of the `balanceTransactions` connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// True for transactions created by a test gateway.
    #[serde(default)]
    pub test: bool,
    /// Posting timestamp exactly as the API reported it.
    pub transaction_date: String,
    pub associated_payout: Option<PayoutRef>,
    pub amount: Money,
    pub fee: Money,
    pub net: Money,
    pub source_id: Option<String>,
    pub source_type: Option<String>,
    pub source_order_transaction_id: Option<String>,
    pub associated_order: Option<OrderRef>,
    #[serde(default)]
    pub adjustments_orders: Vec<AdjustmentOrder>,
    pub adjustment_reason: Option<String>,
}

impl PayoutTransaction {
    /// Internal ledger movement: both the transaction and its source are
    /// transfers. These never belong in a payout report.
    pub fn is_internal_transfer(&self) -> bool {
        self.kind == TransactionType::Transfer && self.source_type.as_deref() == Some("TRANSFER")
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.amount.currency_code.as_deref()
    }
}
