use crate::state::AppState;
use axum::{
    Router,
    routing::{post, put},
};

pub mod post;
pub mod put;

/// `/stages` routes: draft output and stage completion.
pub fn stages_routes() -> Router<AppState> {
    Router::new()
        .route("/output", put(put::update_output))
        .route("/complete", post(post::complete_stage))
}
