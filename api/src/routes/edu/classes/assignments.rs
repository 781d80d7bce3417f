use axum::{
    extract::{Path, State},
    response::Response,
};
use db::models::student_project::ProjectType;
use serde::Deserialize;
use services::assignment_service::CreateAssignment;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::routes::common::{ListResponse, ValidatedJson, parse_timestamp};
use crate::routes::edu::assignments::common::AssignmentResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    pub assignment_type: ProjectType,
    pub source_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// POST /api/space/{space_id}/edu/classes/{class_id}/assignments
///
/// Publishes an assignment to the class. `due_date` is an RFC 3339 timestamp.
///
/// ### Request Body
/// ```json
/// { "assignment_type": "script", "source_id": 12, "title": "Weather bot", "due_date": "2025-05-01T23:59:00Z" }
/// ```
///
/// - `403 Forbidden` unless the caller is class staff
/// - `404 Not Found` when the class does not exist
pub async fn create_assignment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<CreateAssignmentRequest>,
) -> Response {
    let due_date = match parse_timestamp("due_date", req.due_date.as_deref()) {
        Ok(at) => at,
        Err(resp) => return resp,
    };

    let create = CreateAssignment {
        assignment_type: req.assignment_type,
        source_id: req.source_id,
        title: req.title,
        description: req.description,
        due_date,
    };

    match state
        .assignments
        .create_assignment(class_id, user.user_id(), create)
        .await
    {
        Ok(assignment) => ok(
            AssignmentResponse::from(assignment),
            "Assignment created successfully",
        ),
        Err(err) => service_error(err, "Failed to create assignment"),
    }
}

/// GET /api/space/{space_id}/edu/classes/{class_id}/assignments
///
/// Assignments of a class, visible to its teacher and members.
pub async fn list_assignments(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id)): Path<(i64, i64)>,
) -> Response {
    match state
        .assignments
        .list_for_class(class_id, user.user_id())
        .await
    {
        Ok(assignments) => ok(
            ListResponse::all(
                assignments
                    .into_iter()
                    .map(AssignmentResponse::from)
                    .collect::<Vec<_>>(),
            ),
            "Assignments retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve assignments"),
    }
}
