use crate::state::AppState;
use axum::{Router, routing::get};

pub mod get;

/// `/student` routes: the caller's classes seen as a member.
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(get::my_classes))
        .route("/classes/{class_id}", get(get::class_detail))
}
