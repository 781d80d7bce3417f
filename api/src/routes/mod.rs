//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/space/{space_id}/edu` → Classrooms, script projects, evaluations and chat
//!   (authenticated users)

use crate::auth::guards::allow_authenticated;
use crate::routes::{edu::edu_routes, health::health_routes};
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state};

pub mod common;
pub mod edu;
pub mod health;

/// Builds the complete application router for all HTTP endpoints.
///
/// Everything under `/space/{space_id}/edu` sits behind `allow_authenticated`, which
/// answers `401` before any handler runs when the Bearer token is missing or invalid.
/// Space membership is managed elsewhere; classes, projects and assignments addressed by
/// id must still live in the space named by the path.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest(
            "/space/{space_id}/edu",
            edu_routes(app_state.clone()).route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .with_state(app_state)
}
