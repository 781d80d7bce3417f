use crate::state::AppState;
use axum::{Router, routing::get};

pub mod common;
pub mod get;

/// `/scripts` routes. The catalog is read-only here.
pub fn scripts_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_scripts))
        .route("/{script_id}", get(get::get_script))
}
