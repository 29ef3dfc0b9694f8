//! Domain primitives: PayoutDate, PageCursor, TransactionType.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date a payout posted, always rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayoutDate(NaiveDate);

impl PayoutDate {
    /// The day before today in the local time zone.
    pub fn yesterday() -> Self {
        Self::day_before(Local::now().date_naive())
    }

    pub fn day_before(date: NaiveDate) -> Self {
        PayoutDate(date - chrono::Duration::days(1))
    }

    /// Server-side search filter for balance transactions paid out on this date.
    pub fn search_query(&self) -> String {
        format!("payout_date:{}", self)
    }
}

impl fmt::Display for PayoutDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for PayoutDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map(PayoutDate)
    }
}

impl TryFrom<String> for PayoutDate {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayoutDate> for String {
    fn from(value: PayoutDate) -> Self {
        value.to_string()
    }
}

/// Opaque connection cursor returned in `pageInfo.endCursor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(pub String);

impl PageCursor {
    pub fn new(cursor: String) -> Self {
        PageCursor(cursor)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `ShopifyPaymentsTransactionType`.
///
/// Unrecognized kinds are kept verbatim in `Other` so new API values still
/// export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Charge,
    Refund,
    Dispute,
    Reserve,
    Adjustment,
    Credit,
    Debit,
    Payout,
    PayoutFailure,
    PayoutCancellation,
    Transfer,
    TransferFailure,
    TransferCancellation,
    TransferRefund,
    ApplicationFeeRefund,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Charge => "CHARGE",
            TransactionType::Refund => "REFUND",
            TransactionType::Dispute => "DISPUTE",
            TransactionType::Reserve => "RESERVE",
            TransactionType::Adjustment => "ADJUSTMENT",
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
            TransactionType::Payout => "PAYOUT",
            TransactionType::PayoutFailure => "PAYOUT_FAILURE",
            TransactionType::PayoutCancellation => "PAYOUT_CANCELLATION",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::TransferFailure => "TRANSFER_FAILURE",
            TransactionType::TransferCancellation => "TRANSFER_CANCELLATION",
            TransactionType::TransferRefund => "TRANSFER_REFUND",
            TransactionType::ApplicationFeeRefund => "APPLICATION_FEE_REFUND",
            TransactionType::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for TransactionType {
    fn from(value: &str) -> Self {
        match value {
            "CHARGE" => TransactionType::Charge,
            "REFUND" => TransactionType::Refund,
            "DISPUTE" => TransactionType::Dispute,
            "RESERVE" => TransactionType::Reserve,
            "ADJUSTMENT" => TransactionType::Adjustment,
            "CREDIT" => TransactionType::Credit,
            "DEBIT" => TransactionType::Debit,
            "PAYOUT" => TransactionType::Payout,
            "PAYOUT_FAILURE" => TransactionType::PayoutFailure,
            "PAYOUT_CANCELLATION" => TransactionType::PayoutCancellation,
            "TRANSFER" => TransactionType::Transfer,
            "TRANSFER_FAILURE" => TransactionType::TransferFailure,
            "TRANSFER_CANCELLATION" => TransactionType::TransferCancellation,
            "TRANSFER_REFUND" => TransactionType::TransferRefund,
            "APPLICATION_FEE_REFUND" => TransactionType::ApplicationFeeRefund,
            other => TransactionType::Other(other.to_string()),
        }
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        TransactionType::from(value.as_str())
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
