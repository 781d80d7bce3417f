use crate::auth::guards::require_class_in_space;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};

pub mod assignments;
pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// `/classes` routes for teachers and assistants, plus `/join` for anyone holding a code.
///
/// - `POST /`, `GET /my`, `POST /join`
/// - `GET|PUT /{class_id}`
/// - `POST|GET /{class_id}/members`, `DELETE /{class_id}/members/{user_id}`
/// - `POST|GET /{class_id}/invite-codes`
/// - `POST|GET /{class_id}/assignments`
///
/// Every `/{class_id}` route answers `404` for a class in another space.
pub fn classes_routes(app_state: AppState) -> Router<AppState> {
    let class_routes = Router::new()
        .route("/{class_id}", get(get::get_class).put(put::update_class))
        .route(
            "/{class_id}/members",
            post(post::add_members).get(get::list_members),
        )
        .route("/{class_id}/members/{user_id}", delete(delete::remove_member))
        .route(
            "/{class_id}/invite-codes",
            post(post::create_invite_code).get(get::list_invite_codes),
        )
        .route(
            "/{class_id}/assignments",
            post(assignments::create_assignment).get(assignments::list_assignments),
        )
        .route_layer(from_fn_with_state(app_state, require_class_in_space));

    Router::new()
        .route("/", post(post::create_class))
        .route("/my", get(get::my_classes))
        .route("/join", post(post::join_class))
        .merge(class_routes)
}
