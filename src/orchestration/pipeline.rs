use crate::domain::PayoutDate;
use crate::error::AppError;
use crate::export::save_payouts_to_csv;
use crate::orchestration::PayoutFetcher;
use std::path::{Path, PathBuf};

/// Fetch every page for `date`, then write the CSV into `dir`.
///
/// Nothing is written unless the whole fetch succeeds.
pub async fn export_payouts_for_date(
    fetcher: &PayoutFetcher,
    date: PayoutDate,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    tracing::info!("Exporting Shopify payouts for {}", date);

    let payouts = fetcher.fetch_payouts_by_date(date).await?;
    let path = save_payouts_to_csv(&payouts, &date, dir).await?;

    Ok(path)
}
