//! Shopify Admin GraphQL client.

use super::{DataSourceError, PayoutsSource};
use crate::config::Config;
use crate::domain::{BalanceTransactionPage, Order, PageCursor, PayoutDate};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

pub const BALANCE_TRANSACTIONS_QUERY: &str = r#"
query($cursor: String, $first: Int!, $query: String!) {
    shopifyPaymentsAccount {
        balanceTransactions(first: $first, after: $cursor, query: $query) {
            nodes {
                id
                type
                test
                transactionDate
                associatedPayout {
                    id
                    status
                }
                amount {
                    amount
                    currencyCode
                }
                fee {
                    amount
                }
                net {
                    amount
                }
                sourceId
                sourceType
                sourceOrderTransactionId
                associatedOrder {
                    id
                }
                adjustmentsOrders {
                    orderTransactionId
                    amount {
                        amount
                    }
                    name
                }
                adjustmentReason
            }
            pageInfo {
                hasNextPage
                endCursor
            }
        }
    }
}"#;

pub const ORDER_QUERY: &str = r#"
query($id: ID!) {
    order(id: $id) {
        id
        name
        totalPrice
        createdAt
        displayFinancialStatus
        displayFulfillmentStatus
    }
}"#;

/// Shopify data source speaking the Admin GraphQL API.
#[derive(Clone)]
pub struct ShopifyDataSource {
    client: Client,
    graphql_url: String,
    access_token: String,
}

impl fmt::Debug for ShopifyDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopifyDataSource")
            .field("graphql_url", &self.graphql_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentsAccountData {
    shopify_payments_account: Option<PaymentsAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentsAccount {
    balance_transactions: Option<BalanceTransactionPage>,
}

#[derive(Debug, Deserialize)]
struct OrderData {
    order: Option<Order>,
}

impl ShopifyDataSource {
    pub fn new(graphql_url: String, access_token: String) -> Self {
        Self {
            client: Client::new(),
            graphql_url,
            access_token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.graphql_url.clone(), config.access_token.clone())
    }

    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// POST one GraphQL document and unwrap the `data` envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, DataSourceError> {
        let payload = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .client
            .post(&self.graphql_url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DataSourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DataSourceError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(DataSourceError::HttpError {
                status: status.as_u16(),
                message: body,
            });
        }

        decode_envelope(&body)
    }
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, DataSourceError> {
    let envelope: GraphQlResponse<T> =
        serde_json::from_str(body).map_err(|e| DataSourceError::ParseError(e.to_string()))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(DataSourceError::ApiError(messages.join("; ")));
    }

    envelope
        .data
        .ok_or_else(|| DataSourceError::ApiError("response has no data".to_string()))
}

fn page_from_data(data: PaymentsAccountData) -> Result<BalanceTransactionPage, DataSourceError> {
    data.shopify_payments_account
        .ok_or_else(|| {
            DataSourceError::ApiError("shopifyPaymentsAccount missing from response".to_string())
        })?
        .balance_transactions
        .ok_or_else(|| {
            DataSourceError::ApiError("balanceTransactions missing from response".to_string())
        })
}

/// Variables for one `balanceTransactions` page request.
pub fn page_variables(
    date: &PayoutDate,
    after: Option<&PageCursor>,
    first: u32,
) -> serde_json::Value {
    serde_json::json!({
        "cursor": after.map(|c| c.as_str()),
        "first": first,
        "query": date.search_query(),
    })
}

#[async_trait]
impl PayoutsSource for ShopifyDataSource {
    async fn fetch_page(
        &self,
        date: &PayoutDate,
        after: Option<&PageCursor>,
        first: u32,
    ) -> Result<BalanceTransactionPage, DataSourceError> {
        debug!(
            "Fetching balance transactions for date={}, after={:?}, first={}",
            date, after, first
        );

        let data: PaymentsAccountData = self
            .execute(BALANCE_TRANSACTIONS_QUERY, page_variables(date, after, first))
            .await?;

        page_from_data(data)
    }

    async fn fetch_order(&self, order_id: &str) -> Result<Option<Order>, DataSourceError> {
        debug!("Fetching order id={}", order_id);

        let data: OrderData = self
            .execute(ORDER_QUERY, serde_json::json!({ "id": order_id }))
            .await?;

        Ok(data.order)
    }
}
