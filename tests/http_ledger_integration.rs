//! Integration tests for the HTTP ledger adapter.
//!
//! These tests run the adapter against an in-process fake Strichliste:
//! 1. Search, lookup and transaction requests hit the right paths
//! 2. JSON bodies use the server's camelCase field names
//! 3. Status errors and timeouts surface as `LedgerError`
//! 4. Settlement books shares through the real HTTP client

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sammelbestellung::adapters::HttpLedger;
use sammelbestellung::application::SettlementEngine;
use sammelbestellung::domain::catalog::{Article, DeliveryService, PriceOption};
use sammelbestellung::domain::foundation::{LedgerAccountId, Timestamp, User, UserId};
use sammelbestellung::domain::order::{LineItem, Order};
use sammelbestellung::domain::settlement::{allocate, LedgerLink, SettlementOutcome};
use sammelbestellung::ports::{find_account, Ledger, LedgerError, TransactionRequest};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Account id whose lookup never answers in time.
const SLOW_ACCOUNT: i64 = 99;

#[derive(Clone, Default)]
struct FakeStrichliste {
    users: Arc<Vec<Value>>,
    transactions: Arc<Mutex<Vec<(i64, Value)>>>,
}

impl FakeStrichliste {
    fn new() -> Self {
        Self {
            users: Arc::new(vec![
                json!({"id": 1, "name": "Carla", "isDisabled": false, "balance": 0}),
                json!({"id": 2, "name": "Anna", "isDisabled": false, "balance": -350}),
                json!({"id": 3, "name": "Annabell", "isDisabled": false, "balance": 0}),
                json!({"id": 4, "name": "Bernd", "isDisabled": true, "balance": 0}),
            ]),
            transactions: Arc::default(),
        }
    }

    fn recorded(&self) -> Vec<(i64, Value)> {
        self.transactions.lock().unwrap().clone()
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    query: String,
}

async fn search(State(fake): State<FakeStrichliste>, Query(q): Query<SearchQuery>) -> Json<Value> {
    let wanted = q.query.to_lowercase();
    let users: Vec<Value> = fake
        .users
        .iter()
        .filter(|u| {
            u["name"]
                .as_str()
                .map(|n| n.to_lowercase().contains(&wanted))
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    Json(json!({"count": users.len(), "users": users}))
}

async fn user(State(fake): State<FakeStrichliste>, Path(id): Path<i64>) -> Response {
    if id == SLOW_ACCOUNT {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
    match fake.users.iter().find(|u| u["id"] == id) {
        Some(user) => Json(user.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "user not found").into_response(),
    }
}

async fn transaction(
    State(fake): State<FakeStrichliste>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if body["amount"].as_i64().unwrap_or(0) <= 0 {
        return (StatusCode::BAD_REQUEST, "amount must be positive").into_response();
    }
    let mut transactions = fake.transactions.lock().unwrap();
    transactions.push((id, body));
    let receipt = json!({"id": 100 + transactions.len(), "amount": 0});
    Json(receipt).into_response()
}

/// Serves the fake on an ephemeral port and returns its base URL.
async fn serve(fake: FakeStrichliste) -> String {
    let app = Router::new()
        .route("/api/user/search", get(search))
        .route("/api/user/:id", get(user))
        .route("/api/user/:id/transaction", post(transaction))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn ledger() -> HttpLedger {
    HttpLedger::new(Duration::from_secs(1)).unwrap()
}

// =============================================================================
// Account resolution
// =============================================================================

#[tokio::test]
async fn search_resolves_exact_name_among_several_hits() {
    let base_url = serve(FakeStrichliste::new()).await;

    let result = ledger().search_users(&base_url, "anna").await.unwrap();
    assert_eq!(result.count, 2);

    let user = find_account(&ledger(), &base_url, "Anna").await.unwrap();
    assert_eq!(user.id, LedgerAccountId::new(2));
}

#[tokio::test]
async fn search_errors_are_classified() {
    let base_url = serve(FakeStrichliste::new()).await;
    let ledger = ledger();

    let ambiguous = find_account(&ledger, &base_url, "ann").await.unwrap_err();
    assert!(matches!(ambiguous, LedgerError::Ambiguous { count: 2, .. }));

    let missing = find_account(&ledger, &base_url, "zoe").await.unwrap_err();
    assert!(matches!(missing, LedgerError::NoMatch { .. }));

    let disabled = find_account(&ledger, &base_url, "bernd").await.unwrap_err();
    assert_eq!(
        disabled,
        LedgerError::Disabled {
            name: "Bernd".to_string()
        }
    );
}

#[tokio::test]
async fn lookup_reads_disabled_flag_and_status() {
    let base_url = serve(FakeStrichliste::new()).await;
    let ledger = ledger();

    let bernd = ledger.get_user(&base_url, LedgerAccountId::new(4)).await.unwrap();
    assert_eq!(bernd.name, "Bernd");
    assert!(bernd.is_disabled);

    let err = ledger
        .get_user(&base_url, LedgerAccountId::new(42))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Status { status: 404, .. }));
}

#[tokio::test]
async fn slow_ledger_times_out() {
    let base_url = serve(FakeStrichliste::new()).await;

    let err = ledger()
        .get_user(&base_url, LedgerAccountId::new(SLOW_ACCOUNT))
        .await
        .unwrap_err();

    assert_eq!(err, LedgerError::Timeout { timeout_secs: 1 });
}

// =============================================================================
// Transactions
// =============================================================================

#[tokio::test]
async fn transaction_body_uses_recipient_id() {
    let fake = FakeStrichliste::new();
    let base_url = serve(fake.clone()).await;
    let request = TransactionRequest {
        amount: 949,
        recipient: LedgerAccountId::new(1),
        comment: "Bestellung bei Pizzeria Roma".to_string(),
    };

    let receipt = ledger()
        .create_transaction(&base_url, LedgerAccountId::new(2), &request)
        .await
        .unwrap();

    assert_eq!(receipt.id, 101);
    let recorded = fake.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, 2);
    assert_eq!(
        recorded[0].1,
        json!({"amount": 949, "recipientId": 1, "comment": "Bestellung bei Pizzeria Roma"})
    );
}

#[tokio::test]
async fn rejected_transaction_keeps_server_message() {
    let base_url = serve(FakeStrichliste::new()).await;
    let request = TransactionRequest {
        amount: 0,
        recipient: LedgerAccountId::new(1),
        comment: String::new(),
    };

    let err = ledger()
        .create_transaction(&base_url, LedgerAccountId::new(2), &request)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::Status {
            status: 400,
            body: "amount must be positive".to_string()
        }
    );
}

// =============================================================================
// Settlement over HTTP
// =============================================================================

fn order() -> Order {
    let service = DeliveryService {
        name: "Pizzeria Roma".to_string(),
        phone_number: String::new(),
        articles: vec![],
    };
    let created = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 5, 17, 18, 30, 0).unwrap());
    let creator = User::from_identity(UserId::new("@carla:x").unwrap());
    let mut order = Order::open(creator, &service, created);
    for (who, cents) in [("@anna:x", 1050), ("@bernd:x", 500), ("@dora:x", 800)] {
        let article = Article {
            number: String::new(),
            name: "Pizza".to_string(),
            variants: vec![PriceOption::new("Normal", Decimal::new(cents, 2))],
            extras: vec![],
        };
        let orderer = User::from_identity(UserId::new(who).unwrap());
        order.add_line(LineItem::new(&article, &article.variants[0], &[], "", 1, "", orderer).unwrap());
    }
    order.record_payment(None);
    order
}

#[tokio::test]
async fn settlement_books_through_http() {
    let fake = FakeStrichliste::new();
    let base_url = serve(fake.clone()).await;
    let order = order();
    let allocation = allocate(&order).unwrap();
    let mut link = LedgerLink::new(&base_url);
    link.link(&UserId::new("@anna:x").unwrap(), LedgerAccountId::new(2));
    link.link(&UserId::new("@bernd:x").unwrap(), LedgerAccountId::new(4));

    let engine = SettlementEngine::new(Arc::new(ledger()), true);
    let report = engine
        .settle(&order, LedgerAccountId::new(1), &allocation, &link)
        .await;

    let outcomes: HashMap<String, SettlementOutcome> = report
        .entries()
        .iter()
        .map(|(user, outcome)| (user.id.to_string(), outcome.clone()))
        .collect();
    assert!(outcomes["@anna:x"].is_booked());
    assert_eq!(outcomes["@bernd:x"], SettlementOutcome::AccountDisabled);
    assert_eq!(outcomes["@dora:x"], SettlementOutcome::NoLinkedAccount);

    let recorded = fake.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, 2);
    assert_eq!(recorded[0].1["amount"], 1050);
    assert_eq!(recorded[0].1["recipientId"], 1);
    assert_eq!(
        recorded[0].1["comment"],
        "Bestellung bei Pizzeria Roma am 2024-05-17T18:30:00Z"
    );
}
