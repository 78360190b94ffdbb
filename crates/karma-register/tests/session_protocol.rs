//! Session protocol tests: the finalize → submit → clear ordering and
//! its failure modes, against a stubbed backend.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use karma_api::{Backend, BackendConfig};
use karma_core::{CheckoutError, Money, PaymentStatus, Tender, TenderDetail};
use karma_register::{CheckoutSession, RegisterConfig, RegisterError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("karma_register=debug,karma_api=debug")
        .with_test_writer()
        .try_init();
}

fn backend_for(server: &MockServer) -> Backend {
    Backend::new(BackendConfig::new(server.uri())).unwrap()
}

fn product_json(id: &str, name: &str, cents: i64) -> serde_json::Value {
    json!({
        "id": id,
        "code": format!("SKU-{}", id),
        "barcode": null,
        "name": name,
        "description": null,
        "unit_price_cents": cents,
        "stock": null,
        "is_active": true,
    })
}

async fn mount_cart(server: &MockServer, lines: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lines))
        .mount(server)
        .await;
}

fn two_line_cart() -> serde_json::Value {
    json!([
        { "id": "line-1", "product": product_json("p-1", "Coffee", 1000), "quantity": 2 },
        { "id": "line-2", "product": product_json("p-2", "Croissant", 550), "quantity": 1 },
    ])
}

#[tokio::test]
async fn begin_pulls_cart_into_ledger() {
    init_tracing();
    let server = MockServer::start().await;
    mount_cart(&server, two_line_cart()).await;

    let session = CheckoutSession::begin(backend_for(&server), RegisterConfig::default())
        .await
        .unwrap();

    let totals = session.totals();
    assert_eq!(totals.subtotal, Money::from_cents(2550));
    assert!(!totals.satisfied);
}

#[tokio::test]
async fn successful_checkout_records_then_clears() {
    init_tracing();
    let server = MockServer::start().await;
    mount_cart(&server, two_line_cart()).await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "V-1001",
            "recordedAt": "2025-06-01T18:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = CheckoutSession::begin(backend_for(&server), RegisterConfig::default())
        .await
        .unwrap();
    session.select_tender(Tender::Single(TenderDetail::Cash {
        tendered: Money::from_cents(3000),
    }));

    let completed = session.finalize_and_submit().await.unwrap();
    assert_eq!(completed.sale_id, "V-1001");
    assert!(completed.cart_cleared);
    assert_eq!(completed.receipt.total, Money::from_cents(2550));
    assert_eq!(completed.receipt.change, Money::from_cents(450));
    assert_eq!(completed.receipt.status, PaymentStatus::Paid);

    // The session is fresh for the next customer
    assert_eq!(session.totals().subtotal, Money::zero());
}

#[tokio::test]
async fn failed_submission_leaves_state_for_retry() {
    init_tracing();
    let server = MockServer::start().await;
    mount_cart(&server, two_line_cart()).await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service down"))
        .mount(&server)
        .await;
    // The cart must never be cleared when recording failed
    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = CheckoutSession::begin(backend_for(&server), RegisterConfig::default())
        .await
        .unwrap();
    session.select_tender(Tender::Single(TenderDetail::Cash {
        tendered: Money::from_cents(3000),
    }));

    let before = session.totals();
    let err = session.finalize_and_submit().await.unwrap_err();
    assert!(matches!(err, RegisterError::Api(_)));

    // Nothing changed: not cleared, not marked satisfied differently
    assert_eq!(session.totals(), before);

    // The service comes back; the same session retries and succeeds
    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "V-1002",
            "recordedAt": "2025-06-01T18:05:00Z",
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let completed = session.finalize_and_submit().await.unwrap();
    assert_eq!(completed.sale_id, "V-1002");
}

#[tokio::test]
async fn recorded_sale_stands_when_clear_fails() {
    init_tracing();
    let server = MockServer::start().await;
    mount_cart(&server, two_line_cart()).await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "V-1003",
            "recordedAt": "2025-06-01T18:00:00Z",
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(500).set_body_string("locked"))
        .mount(&server)
        .await;

    let mut session = CheckoutSession::begin(backend_for(&server), RegisterConfig::default())
        .await
        .unwrap();
    session.select_tender(Tender::Single(TenderDetail::Cash {
        tendered: Money::from_cents(2550),
    }));

    let completed = session.finalize_and_submit().await.unwrap();
    assert_eq!(completed.sale_id, "V-1003");
    assert!(!completed.cart_cleared);

    // The clear can be re-issued on its own once the cart service recovers
    server.reset().await;
    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    session.clear_remote_cart().await.unwrap();
}

#[tokio::test]
async fn empty_cart_never_reaches_the_wire() {
    init_tracing();
    let server = MockServer::start().await;
    mount_cart(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = CheckoutSession::begin(backend_for(&server), RegisterConfig::default())
        .await
        .unwrap();
    session.select_tender(Tender::Single(TenderDetail::Cash {
        tendered: Money::from_cents(1000),
    }));

    let err = session.finalize_and_submit().await.unwrap_err();
    assert!(matches!(
        err,
        RegisterError::Checkout(CheckoutError::EmptyCart)
    ));
}

#[tokio::test]
async fn scan_to_add_updates_server_and_ledger() {
    init_tracing();
    let server = MockServer::start().await;
    mount_cart(&server, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/products/lookup"))
        .and(query_param("code", "SKU-p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("p-1", "Coffee", 1000)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "line-1",
            "product": product_json("p-1", "Coffee", 1000),
            "quantity": 2,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = CheckoutSession::begin(backend_for(&server), RegisterConfig::default())
        .await
        .unwrap();
    let product = session.add_code("SKU-p-1", 2).await.unwrap();

    assert_eq!(product.name, "Coffee");
    assert_eq!(session.totals().subtotal, Money::from_cents(2000));
}

#[tokio::test]
async fn credit_checkout_completes_as_pending() {
    init_tracing();
    let server = MockServer::start().await;
    mount_cart(&server, two_line_cart()).await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "V-1004",
            "recordedAt": "2025-06-01T18:00:00Z",
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut session = CheckoutSession::begin(backend_for(&server), RegisterConfig::default())
        .await
        .unwrap();

    // Client info missing: the ledger refuses before any network call
    session.select_credit("", "");
    let err = session.finalize_and_submit().await.unwrap_err();
    assert!(matches!(
        err,
        RegisterError::Checkout(CheckoutError::MissingClientInfo)
    ));

    session.select_credit("Ana Gómez", "CURP-123");
    let completed = session.finalize_and_submit().await.unwrap();
    assert_eq!(completed.receipt.status, PaymentStatus::PendingCredit);
    assert!(completed.receipt.due_date.is_some());
}
