pub mod config;
pub mod datasource;
pub mod domain;
pub mod error;
pub mod export;
pub mod orchestration;

pub use config::Config;
pub use datasource::{DataSourceError, MockDataSource, PayoutsSource, ShopifyDataSource};
pub use domain::{
    Amount, BalanceTransactionPage, Money, Order, PageCursor, PageInfo, PayoutDate,
    PayoutTransaction, TransactionType,
};
pub use error::AppError;
pub use export::{csv_file_name, render_csv, save_payouts_to_csv, ExportError, ExportedRow};
pub use orchestration::{FetchError, PayoutFetcher, PayoutPage};
