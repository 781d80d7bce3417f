use crate::state::AppState;
use axum::{Router, routing::post};

pub mod common;
pub mod post;

/// `/evaluations` routes. Listing lives under `/projects/{project_id}/evaluations`.
pub fn evaluations_routes() -> Router<AppState> {
    Router::new().route("/", post(post::create_teacher_evaluation))
}
