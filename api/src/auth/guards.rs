use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::{Assignment, Class, StudentProject};
use sea_orm::{DbErr, EntityTrait};
use std::collections::HashMap;

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Rejects unauthenticated requests and stores the `AuthUser` in the request extensions
/// so handlers do not decode the token a second time.
pub async fn allow_authenticated(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error(
                    StatusCode::UNAUTHORIZED,
                    "Authentication required",
                )),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

type GuardError = (StatusCode, Json<ApiResponse<Empty>>);

fn param(params: &HashMap<String, String>, name: &str) -> Result<i64, GuardError> {
    params
        .get(name)
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    StatusCode::BAD_REQUEST,
                    format!("Missing or invalid {name}"),
                )),
            )
        })
}

fn not_found(what: &str) -> GuardError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(StatusCode::NOT_FOUND, format!("{what} not found"))),
    )
}

fn db_failure(err: DbErr) -> GuardError {
    tracing::error!(error = %err, "space guard lookup failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )),
    )
}

async fn class_space(state: &AppState, class_id: i64) -> Result<Option<i64>, GuardError> {
    Ok(Class::find_by_id(class_id)
        .one(state.db())
        .await
        .map_err(db_failure)?
        .map(|c| c.space_id))
}

/// Answers `404` when `{class_id}` names a class outside `{space_id}`.
pub async fn require_class_in_space(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let space_id = param(&params, "space_id")?;
    let class_id = param(&params, "class_id")?;

    match class_space(&state, class_id).await? {
        Some(id) if id == space_id => Ok(next.run(req).await),
        _ => Err(not_found("Class")),
    }
}

/// Answers `404` when `{project_id}` names a project outside `{space_id}`.
pub async fn require_project_in_space(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let space_id = param(&params, "space_id")?;
    let project_id = param(&params, "project_id")?;

    let project = StudentProject::find_by_id(project_id)
        .one(state.db())
        .await
        .map_err(db_failure)?;
    match project {
        Some(p) if p.space_id == space_id => Ok(next.run(req).await),
        _ => Err(not_found("Project")),
    }
}

/// Answers `404` when `{assignment_id}` belongs to a class outside `{space_id}`.
pub async fn require_assignment_in_space(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let space_id = param(&params, "space_id")?;
    let assignment_id = param(&params, "assignment_id")?;

    let assignment = Assignment::find_by_id(assignment_id)
        .one(state.db())
        .await
        .map_err(db_failure)?
        .ok_or_else(|| not_found("Assignment"))?;
    match class_space(&state, assignment.class_id).await? {
        Some(id) if id == space_id => Ok(next.run(req).await),
        _ => Err(not_found("Assignment")),
    }
}
