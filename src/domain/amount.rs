//! Monetary amount as the Admin API reports it.
//!
//! Shopify sends `Decimal` scalars as JSON strings ("100.00"). The string is
//! kept untouched so the export shows exactly what the server sent, including
//! sign, scale and precision.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
