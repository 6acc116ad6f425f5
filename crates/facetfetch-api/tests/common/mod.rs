//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use facetfetch_api::bootstrap::deploy_if_needed;
use facetfetch_api::state::AppState;
use facetfetch_core::clock::Clock;
use facetfetch_core::principal::Principal;
use facetfetch_core::repository::EventRepository;
use facetfetch_event_store::memory_event_repository::InMemoryEventRepository;
use facetfetch_test_support::FixedClock;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Principal that deploys every test ledger.
pub const DEPLOYER: &str = "deployer";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// A deployed ledger backed by an in-memory event store. Quest 1
/// ("Genesis Quest") exists. Clone the returned state to issue several
/// requests against the same ledger.
pub async fn deployed_state() -> AppState {
    state_with(Arc::new(InMemoryEventRepository::new()), &["Genesis Quest"]).await
}

/// A ledger deployed over `event_repository` with the given genesis quests.
pub async fn state_with(event_repository: Arc<dyn EventRepository>, genesis: &[&str]) -> AppState {
    let state = AppState::new("integration", fixed_clock(), event_repository);
    let genesis: Vec<String> = genesis.iter().map(|title| (*title).to_owned()).collect();
    deploy_if_needed(&state, &Principal::parse(DEPLOYER).unwrap(), &genesis)
        .await
        .unwrap();
    state
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app(state: &AppState) -> Router {
    facetfetch_api::app(state.clone())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request as `caller` with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    caller: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-principal", caller)
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
