use crate::auth::guards::require_assignment_in_space;
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state, routing::get};

pub mod common;
pub mod get;

/// `/assignments` routes. Creation and listing hang off `/classes/{class_id}/assignments`.
pub fn assignments_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{assignment_id}/status", get(get::assignment_status))
        .route_layer(from_fn_with_state(app_state, require_assignment_in_space))
}
