use axum::{
    extract::{Path, State},
    response::Response,
};

use super::common::AssignmentStatusResponse;
use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::state::AppState;

/// GET /api/space/{space_id}/edu/assignments/{assignment_id}/status
///
/// The caller's standing on an assignment: their latest project for it, whether it was
/// submitted, and whether the due date passed without a submission.
///
/// - `403 Forbidden` unless the caller is a member of the assignment's class
/// - `404 Not Found` when the assignment does not exist
pub async fn assignment_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, assignment_id)): Path<(i64, i64)>,
) -> Response {
    match state
        .assignments
        .student_status(assignment_id, user.user_id())
        .await
    {
        Ok(status) => ok(
            AssignmentStatusResponse::from(status),
            "Assignment status retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve assignment status"),
    }
}
