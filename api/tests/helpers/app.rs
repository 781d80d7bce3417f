use api::{auth::generate_jwt, routes::routes, state::AppState};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use db::test_utils::setup_test_db;
use serde_json::Value;
use tower::ServiceExt;
use util::config::AppConfig;

/// Router mounted at `/api` over a fresh in-memory database, plus the state behind it
/// for seeding.
pub async fn make_test_app() -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db, AppConfig::for_tests());
    let app = Router::new().nest("/api", routes(app_state.clone()));
    (app, app_state)
}

pub fn bearer(user_id: i64) -> String {
    let (token, _) = generate_jwt(user_id, &AppConfig::for_tests()).unwrap();
    format!("Bearer {token}")
}

/// Sends one request and returns the status with the decoded envelope.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        req = req.header("Authorization", bearer(user_id));
    }
    let req = match body {
        Some(json) => req
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
