//! CSV export of payout transactions.
//!
//! Output is comma-delimited with no quoting, rows joined by `\n` and no
//! trailing newline. Amounts and enum values never contain commas, so fields
//! are written verbatim.

use crate::domain::{PayoutDate, PayoutTransaction};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CSV_HEADER: [&str; 6] = ["Type", "Transaction Date", "Amount", "Currency", "Fee", "Net"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Six-column projection of one transaction. Field order is column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedRow {
    pub kind: String,
    pub transaction_date: String,
    pub amount: String,
    pub currency: String,
    pub fee: String,
    pub net: String,
}

impl From<&PayoutTransaction> for ExportedRow {
    fn from(tx: &PayoutTransaction) -> Self {
        Self {
            kind: tx.kind.to_string(),
            transaction_date: tx.transaction_date.clone(),
            amount: tx.amount.amount.to_string(),
            currency: tx.currency_code().unwrap_or_default().to_string(),
            fee: tx.fee.amount.to_string(),
            net: tx.net.amount.to_string(),
        }
    }
}

pub fn csv_file_name(date: &PayoutDate) -> String {
    format!("shopify_payouts_{}.csv", date)
}

/// Render the header plus one line per transaction, in input order.
pub fn render_csv(payouts: &[PayoutTransaction]) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for tx in payouts {
        wtr.serialize(ExportedRow::from(tx))?;
    }

    let mut bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Write `shopify_payouts_<date>.csv` into `dir`, replacing any existing file.
///
/// Returns the path written.
pub async fn save_payouts_to_csv(
    payouts: &[PayoutTransaction],
    date: &PayoutDate,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let content = render_csv(payouts)?;
    let path = dir.join(csv_file_name(date));
    tokio::fs::write(&path, content).await?;

    tracing::info!("Wrote {} payout rows to {}", payouts.len(), path.display());
    Ok(path)
}
