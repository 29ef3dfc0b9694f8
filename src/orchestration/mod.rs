pub mod fetch;
pub mod pipeline;

pub use fetch::{FetchError, PayoutFetcher, PayoutPage};
pub use pipeline::export_payouts_for_date;
