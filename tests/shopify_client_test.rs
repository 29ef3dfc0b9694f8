use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use shopify_payouts::datasource::{DataSourceError, PayoutsSource, ShopifyDataSource};
use shopify_payouts::domain::{PageCursor, PayoutDate, TransactionType};
use shopify_payouts::orchestration::PayoutFetcher;
use std::sync::{Arc, Mutex};

const PATH: &str = "/admin/api/2024-07/graphql.json";

type Responder = Arc<dyn Fn(&Value) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct Stub {
    responder: Responder,
    seen: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

async fn graphql(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let (status, response) = (stub.responder)(&body);
    stub.seen.lock().unwrap().push((headers, body));
    (status, Json(response))
}

/// Serve `responder` on a random local port; returns the endpoint URL and
/// the recorded requests.
async fn spawn_stub(
    responder: impl Fn(&Value) -> (StatusCode, Value) + Send + Sync + 'static,
) -> (String, Arc<Mutex<Vec<(HeaderMap, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        responder: Arc::new(responder),
        seen: seen.clone(),
    };
    let app = Router::new().route(PATH, post(graphql)).with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}{}", addr, PATH), seen)
}

fn date() -> PayoutDate {
    "2024-01-15".parse().unwrap()
}

fn node(id: u32, kind: &str, source_type: &str) -> Value {
    json!({
        "id": format!("gid://shopify/ShopifyPaymentsBalanceTransaction/{}", id),
        "type": kind,
        "test": false,
        "transactionDate": "2024-01-15T08:30:00Z",
        "associatedPayout": { "id": "gid://shopify/ShopifyPaymentsPayout/3", "status": "PAID" },
        "amount": { "amount": "100.00", "currencyCode": "USD" },
        "fee": { "amount": "3.00" },
        "net": { "amount": "97.00" },
        "sourceId": id.to_string(),
        "sourceType": source_type,
        "sourceOrderTransactionId": null,
        "associatedOrder": { "id": "gid://shopify/Order/42" },
        "adjustmentsOrders": [],
        "adjustmentReason": null
    })
}

fn page(nodes: Vec<Value>, has_next_page: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "data": {
            "shopifyPaymentsAccount": {
                "balanceTransactions": {
                    "nodes": nodes,
                    "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor }
                }
            }
        }
    })
}

#[tokio::test]
async fn sends_token_header_and_page_variables() {
    let (url, seen) =
        spawn_stub(|_| (StatusCode::OK, page(vec![node(1, "CHARGE", "CHARGE")], false, None))).await;
    let source = ShopifyDataSource::new(url, "shpat_abc123".to_string());

    let result = source.fetch_page(&date(), None, 10).await.unwrap();

    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.nodes[0].kind, TransactionType::Charge);
    assert_eq!(result.nodes[0].amount.amount.to_string(), "100.00");

    let seen = seen.lock().unwrap();
    let (headers, body) = &seen[0];
    assert_eq!(headers["x-shopify-access-token"], "shpat_abc123");
    assert!(headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(body["variables"]["cursor"], Value::Null);
    assert_eq!(body["variables"]["first"], 10);
    assert_eq!(body["variables"]["query"], "payout_date:2024-01-15");
    assert!(body["query"]
        .as_str()
        .unwrap()
        .contains("balanceTransactions(first: $first, after: $cursor, query: $query)"));
}

#[tokio::test]
async fn cursor_is_forwarded_on_later_pages() {
    let (url, seen) = spawn_stub(|_| (StatusCode::OK, page(vec![], false, None))).await;
    let source = ShopifyDataSource::new(url, "token".to_string());

    let cursor = PageCursor::new("eyJsYXN0X2lkIjoxfQ==".to_string());
    source.fetch_page(&date(), Some(&cursor), 10).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].1["variables"]["cursor"], "eyJsYXN0X2lkIjoxfQ==");
}

#[tokio::test]
async fn fetcher_paginates_over_http_and_filters() {
    let (url, seen) = spawn_stub(|body| {
        let response = match body["variables"]["cursor"].as_str() {
            None => page(
                vec![node(1, "CHARGE", "CHARGE"), node(2, "TRANSFER", "TRANSFER")],
                true,
                Some("cursor-1"),
            ),
            Some("cursor-1") => page(vec![node(3, "REFUND", "REFUND")], false, Some("cursor-2")),
            Some(other) => json!({ "errors": [{ "message": format!("bad cursor {}", other) }] }),
        };
        (StatusCode::OK, response)
    })
    .await;
    let fetcher = PayoutFetcher::new(Arc::new(ShopifyDataSource::new(url, "token".to_string())));

    let results = fetcher.fetch_payouts_by_date(date()).await.unwrap();

    let kinds: Vec<_> = results.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(kinds, vec![TransactionType::Charge, TransactionType::Refund]);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn graphql_errors_become_api_errors() {
    let (url, _) = spawn_stub(|_| {
        (
            StatusCode::OK,
            json!({ "errors": [{ "message": "Throttled" }], "data": null }),
        )
    })
    .await;
    let source = ShopifyDataSource::new(url, "token".to_string());

    let err = source.fetch_page(&date(), None, 10).await.unwrap_err();
    assert_eq!(err, DataSourceError::ApiError("Throttled".to_string()));
}

#[tokio::test]
async fn unexpected_shape_fails_fast() {
    let (url, _) = spawn_stub(|_| (StatusCode::OK, json!({ "data": { "shop": { "name": "acme" } } }))).await;
    let source = ShopifyDataSource::new(url, "token".to_string());

    let err = source.fetch_page(&date(), None, 10).await.unwrap_err();
    assert!(matches!(err, DataSourceError::ApiError(_)));
}

#[tokio::test]
async fn http_status_is_surfaced_with_body() {
    let (url, _) = spawn_stub(|_| {
        (
            StatusCode::UNAUTHORIZED,
            json!({ "errors": "[API] Invalid API key or access token (unrecognized login or wrong password)" }),
        )
    })
    .await;
    let source = ShopifyDataSource::new(url, "wrong".to_string());

    match source.fetch_page(&date(), None, 10).await.unwrap_err() {
        DataSourceError::HttpError { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let source = ShopifyDataSource::new(format!("http://{}{}", addr, PATH), "token".to_string());

    let err = source.fetch_page(&date(), None, 10).await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {err:?}");
}

#[tokio::test]
async fn order_lookup_returns_order_or_none() {
    let (url, seen) = spawn_stub(|body| {
        let order = match body["variables"]["id"].as_str() {
            Some("gid://shopify/Order/42") => json!({
                "id": "gid://shopify/Order/42",
                "name": "#1042",
                "totalPrice": "100.00",
                "createdAt": "2024-01-14T19:00:00Z",
                "displayFinancialStatus": "PAID",
                "displayFulfillmentStatus": "UNFULFILLED"
            }),
            _ => Value::Null,
        };
        (StatusCode::OK, json!({ "data": { "order": order } }))
    })
    .await;
    let source = ShopifyDataSource::new(url, "token".to_string());

    let order = source
        .fetch_order("gid://shopify/Order/42")
        .await
        .unwrap()
        .expect("order should exist");
    assert_eq!(order.name, "#1042");
    assert_eq!(order.display_financial_status.as_deref(), Some("PAID"));

    assert_eq!(source.fetch_order("gid://shopify/Order/7").await.unwrap(), None);
    assert!(seen.lock().unwrap()[0].1["query"]
        .as_str()
        .unwrap()
        .contains("order(id: $id)"));
}
