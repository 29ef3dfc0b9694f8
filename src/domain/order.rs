//! Order summary returned by the `order(id:)` lookup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub name: String,
    /// Deprecated scalar on newer API versions; kept for the versions this
    /// tool targets.
    pub total_price: Option<String>,
    pub created_at: String,
    pub display_financial_status: Option<String>,
    pub display_fulfillment_status: Option<String>,
}
