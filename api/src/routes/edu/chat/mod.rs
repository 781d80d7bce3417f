use crate::state::AppState;
use axum::{Router, routing::post};

pub mod common;
pub mod post;

/// `/chat` routes. History lives under `/projects/{project_id}/chat`.
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/send", post(post::send_message))
}
