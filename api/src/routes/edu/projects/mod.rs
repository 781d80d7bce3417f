use crate::auth::guards::require_project_in_space;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

pub mod common;
pub mod get;
pub mod post;

/// `/projects` routes.
///
/// - `POST /` and `GET /` create and list the caller's projects (`GET /my` is an alias)
/// - `GET /{project_id}` returns the project with its stages and evaluations
/// - `POST /{project_id}/submit` submits an assignment project
/// - `GET /{project_id}/evaluations` and `GET /{project_id}/chat` return history
/// - `GET /{project_id}/evaluations/latest` returns the newest evaluation
///
/// `/{project_id}` routes answer `404` for a project in another space.
pub fn projects_routes(app_state: AppState) -> Router<AppState> {
    let project_routes = Router::new()
        .route("/{project_id}", get(get::get_project))
        .route("/{project_id}/submit", post(post::submit_project))
        .route("/{project_id}/evaluations", get(get::list_evaluations))
        .route("/{project_id}/evaluations/latest", get(get::latest_evaluation))
        .route("/{project_id}/chat", get(get::chat_history))
        .route_layer(from_fn_with_state(app_state, require_project_in_space));

    Router::new()
        .route("/", post(post::create_project).get(get::list_projects))
        .route("/my", get(get::list_projects))
        .merge(project_routes)
}
