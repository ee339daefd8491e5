//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ticketbooth_api::routes;
use ticketbooth_api::state::AppState;
use ticketbooth_booking::application::orchestrator::BookingOrchestrator;
use ticketbooth_core::inventory::InventoryOracle;
use ticketbooth_customer_store::pg_customer_directory::PgCustomerDirectory;
use ticketbooth_event_publisher::pg_event_publisher::PgEventPublisher;
use ticketbooth_test_support::FixedClock;

/// Build the full app router with the Postgres customer directory and outbox
/// publisher, and the given inventory oracle in place of the remote service.
pub fn build_test_app(pool: PgPool, inventory: Arc<dyn InventoryOracle>) -> Router {
    let orchestrator = BookingOrchestrator::new(
        Arc::new(PgCustomerDirectory::new(pool.clone())),
        inventory,
        Arc::new(PgEventPublisher::new(pool)),
        Arc::new(FixedClock::default()),
    );
    routes::app(AppState::new(orchestrator))
}

/// Insert a customer row.
pub async fn seed_customer(pool: &PgPool, id: &str) {
    sqlx::query("INSERT INTO customers (id, name, email) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(format!("Customer {id}"))
        .bind(format!("{id}@example.com"))
        .execute(pool)
        .await
        .unwrap();
}

/// Count outbox rows for a given partition key.
pub async fn count_booking_events(pool: &PgPool, key: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM booking_events WHERE partition_key = $1")
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
