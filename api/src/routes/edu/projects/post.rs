use axum::{
    extract::{Path, State},
    response::Response,
};
use db::models::student_project::ProjectType;
use serde::Deserialize;
use services::project_service::CreateProject;
use validator::Validate;

use super::common::ProjectResponse;
use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::routes::common::ValidatedJson;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    pub project_type: ProjectType,
    pub source_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub class_id: Option<i64>,
    pub assignment_id: Option<i64>,
}

/// POST /api/space/{space_id}/edu/projects
///
/// Starts a new learning project for the caller. Script projects come with three
/// stages: "concept understanding" (in progress), "feature design" and "bot development".
///
/// ### Request Body
/// ```json
/// {
///   "project_type": "script",
///   "source_id": 12,
///   "title": "My weather bot",
///   "assignment_id": 3
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the created project
/// - `400 Bad Request` on validation failure or when the class is in another space
/// - `403 Forbidden` when the caller is not in the class the project is attached to
/// - `404 Not Found` when the class or assignment does not exist
pub async fn create_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(space_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Response {
    let create = CreateProject {
        space_id,
        project_type: req.project_type,
        source_id: req.source_id,
        title: req.title,
        description: req.description,
        class_id: req.class_id,
        assignment_id: req.assignment_id,
    };

    match state.projects.create_project(user.user_id(), create).await {
        Ok(project) => ok(ProjectResponse::from(project), "Project created successfully"),
        Err(err) => service_error(err, "Failed to create project"),
    }
}

/// POST /api/space/{space_id}/edu/projects/{project_id}/submit
///
/// Submits an assignment project. Submitting again moves `submitted_at` forward.
///
/// - `400 Bad Request` with `"project is not an assignment"` for free-standing projects
/// - `403 Forbidden` unless the caller owns the project
pub async fn submit_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, project_id)): Path<(i64, i64)>,
) -> Response {
    match state.projects.submit_project(project_id, user.user_id()).await {
        Ok(project) => ok(ProjectResponse::from(project), "Project submitted successfully"),
        Err(err) => service_error(err, "Failed to submit project"),
    }
}
