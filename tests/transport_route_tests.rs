mod common;

use aquasync::AquaClient;
use aquasync::error::{ClientError, ErrorKind};
use aquasync::session::{MemoryStorage, NoopPushRegistrar};
use aquasync::sync::{DeviceBackend, ListScope};
use aquasync::types::Measurement;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde_json::{Value, json};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::time::Duration;

#[derive(Default)]
struct MockBackend {
    reject_tokens: AtomicBool,
    slow_devices: AtomicBool,
    device_hits: AtomicUsize,
    favorite_hits: AtomicUsize,
    seen_auth: Mutex<Vec<String>>,
}

impl MockBackend {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.seen_auth.lock().expect("poisoned").push(auth.clone());
        if self.reject_tokens.load(Ordering::SeqCst) || !auth.starts_with("Bearer tok-") {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "E_UNAUTHORIZED_ACCESS" })),
            )
                .into_response());
        }
        Ok(())
    }
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    let email = body["email"].as_str().unwrap_or_default();
    Json(json!({
        "user": { "id": "u-1", "name": "Ana", "email": email },
        "token": { "type": "bearer", "token": format!("tok-{email}") }
    }))
}

async fn devices(State(state): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    state.device_hits.fetch_add(1, Ordering::SeqCst);
    if let Err(resp) = state.authorize(&headers) {
        return resp;
    }
    if state.slow_devices.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    Json(json!([
        { "id": 1, "title": "North Tank", "location": "Dock", "favorite": false, "connected": true },
        { "id": 2, "title": "South Tank", "location": "Dock", "favorite": true, "connected": false },
        { "id": 3, "title": "Reservoir", "location": "Hill", "favorite": false, "connected": true }
    ]))
    .into_response()
}

async fn latest(
    State(state): State<Arc<MockBackend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = state.authorize(&headers) {
        return resp;
    }
    if id == "3" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "sensor offline").into_response();
    }
    Json(json!({
        "ph": 7.2,
        "temperature": 9.6,
        "turbidity": 1,
        "tds": 120,
        "averageMeasurement": 11.9,
        "createdAt": "2026-10-18T08:00:00Z"
    }))
    .into_response()
}

async fn favorite(
    State(state): State<Arc<MockBackend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.favorite_hits.fetch_add(1, Ordering::SeqCst);
    if let Err(resp) = state.authorize(&headers) {
        return resp;
    }
    if id == "404" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "errors": [{ "message": "Device not found" }] })),
        )
            .into_response();
    }
    if body["favorite"].is_boolean() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::BAD_REQUEST.into_response()
    }
}

async fn broken(State(state): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    state.device_hits.fetch_add(1, Ordering::SeqCst);
    if let Err(resp) = state.authorize(&headers) {
        return resp;
    }
    StatusCode::BAD_GATEWAY.into_response()
}

fn router(state: Arc<MockBackend>) -> Router {
    Router::new()
        .route("/sessions", post(login))
        .route("/devices", get(devices))
        .route("/devices/{id}/measurements/latest", get(latest))
        .route("/devices/{id}/measurements/weekly", get(broken))
        .route("/devices/{id}/favorite", patch(favorite))
        .with_state(state)
}

async fn signed_in(state: Arc<MockBackend>, timeout_secs: u64) -> AquaClient {
    let base_url = common::spawn_backend(router(state)).await;
    let mut cfg = common::config_for(base_url);
    cfg.backend.timeout_secs = timeout_secs;
    cfg.backend.retry_max_times = 1;
    let client = AquaClient::with_storage(
        cfg,
        Arc::new(MemoryStorage::new()),
        Arc::new(NoopPushRegistrar),
    )
    .expect("client should build");
    client
        .session()
        .login("a@x", "pw")
        .await
        .expect("login should succeed");
    client
}

#[tokio::test]
async fn bearer_token_is_read_at_call_time() {
    let state = Arc::new(MockBackend::default());
    let client = signed_in(state.clone(), 5).await;
    let transport = client.transport();

    transport.list_devices().await.expect("first list");
    client
        .session()
        .login("b@x", "pw")
        .await
        .expect("second login");
    transport.list_devices().await.expect("second list");

    let seen = state.seen_auth.lock().expect("poisoned").clone();
    assert_eq!(seen, vec!["Bearer tok-a@x", "Bearer tok-b@x"]);
}

#[tokio::test]
async fn unauthorized_invalidates_once_then_fails_fast() {
    let state = Arc::new(MockBackend::default());
    let client = signed_in(state.clone(), 5).await;
    let transport = client.transport();
    let mut rx = client.session().subscribe();
    rx.mark_unchanged();

    state.reject_tokens.store(true, Ordering::SeqCst);
    let err = transport.list_devices().await.expect_err("token rejected");
    assert_eq!(err, ClientError::Unauthorized);
    assert_eq!(state.device_hits.load(Ordering::SeqCst), 1);
    assert!(!client.session().is_authenticated());
    assert!(rx.has_changed().expect("sender alive"));

    let err = transport.list_devices().await.expect_err("no session");
    assert_eq!(err, ClientError::Unauthorized);
    assert_eq!(state.device_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slow_backend_is_connectivity() {
    let state = Arc::new(MockBackend::default());
    let client = signed_in(state.clone(), 1).await;
    state.slow_devices.store(true, Ordering::SeqCst);

    let err = client
        .transport()
        .list_devices()
        .await
        .expect_err("request must time out");
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    // Reads are retried on connectivity failures.
    assert_eq!(state.device_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let state = Arc::new(MockBackend::default());
    let client = signed_in(state.clone(), 5).await;

    let err = client
        .transport()
        .weekly_averages("1")
        .await
        .expect_err("backend is broken");
    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert_eq!(state.device_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_device_surfaces_the_backend_message() {
    let state = Arc::new(MockBackend::default());
    let client = signed_in(state.clone(), 5).await;

    client
        .transport()
        .set_favorite("1", true)
        .await
        .expect("favorite should succeed");
    let err = client
        .transport()
        .set_favorite("404", true)
        .await
        .expect_err("device is missing");

    assert_eq!(err.kind(), ErrorKind::NotFoundOrConflict);
    assert_eq!(err.user_message(), "Device not found");
    assert_eq!(state.favorite_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn home_list_loads_through_the_transport() {
    let state = Arc::new(MockBackend::default());
    let client = signed_in(state, 5).await;
    let home = client.synchronizer(ListScope::All);

    let devices = home.load().await;

    let ids: Vec<_> = devices.iter().map(|d| d.id().to_string()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(devices[0].measurement.tds, 120.0);
    assert_eq!(devices[2].measurement, Measurement::default());

    let summary = home.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.connected, 2);
    assert_eq!(summary.above, 2);
    assert_eq!(summary.below_or_equal, 1);

    let favorites = client.synchronizer(ListScope::Favorites);
    let favorites = favorites.load().await;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].device.title, "South Tank");
}
