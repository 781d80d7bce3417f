use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::state::AppState;

/// DELETE /api/space/{space_id}/edu/classes/{class_id}/members/{user_id}
///
/// Removes a member. The class teacher cannot be removed.
///
/// - `403 Forbidden` for non-staff callers or when targeting the teacher
/// - `404 Not Found` when the user is not a member
pub async fn remove_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id, member_id)): Path<(i64, i64, i64)>,
) -> Response {
    match state
        .classes
        .remove_member(class_id, user.user_id(), member_id)
        .await
    {
        Ok(()) => ok((), "Member removed successfully"),
        Err(err) => service_error(err, "Failed to remove member"),
    }
}
