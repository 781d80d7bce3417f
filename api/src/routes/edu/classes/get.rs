use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use db::models::class_member::MemberRole;
use serde::Deserialize;

use super::common::{ClassSummaryResponse, InviteCodeResponse, MemberResponse};
use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::routes::common::ListResponse;
use crate::state::AppState;

/// GET /api/space/{space_id}/edu/classes/my
///
/// Classes the caller teaches in this space, newest first, with member and student counts.
pub async fn my_classes(
    State(state): State<AppState>,
    user: AuthUser,
    Path(space_id): Path<i64>,
) -> Response {
    match state.classes.my_classes(user.user_id(), space_id).await {
        Ok(classes) => ok(
            ListResponse::all(
                classes
                    .into_iter()
                    .map(ClassSummaryResponse::from)
                    .collect::<Vec<_>>(),
            ),
            "Classes retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve classes"),
    }
}

/// GET /api/space/{space_id}/edu/classes/{class_id}
///
/// Class detail with counts. Staff only.
pub async fn get_class(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id)): Path<(i64, i64)>,
) -> Response {
    match state.classes.get_class_for_staff(class_id, user.user_id()).await {
        Ok(summary) => ok(
            ClassSummaryResponse::from(summary),
            "Class retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve class"),
    }
}

#[derive(Debug, Deserialize)]
pub struct MembersQuery {
    pub role: Option<MemberRole>,
}

/// GET /api/space/{space_id}/edu/classes/{class_id}/members
///
/// Members in join order. `role` narrows to `teacher`, `assistant` or `student`.
pub async fn list_members(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id)): Path<(i64, i64)>,
    Query(query): Query<MembersQuery>,
) -> Response {
    match state
        .classes
        .members(class_id, user.user_id(), query.role)
        .await
    {
        Ok(members) => ok(
            ListResponse::all(
                members
                    .into_iter()
                    .map(MemberResponse::from)
                    .collect::<Vec<_>>(),
            ),
            "Members retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve members"),
    }
}

/// GET /api/space/{space_id}/edu/classes/{class_id}/invite-codes
pub async fn list_invite_codes(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id)): Path<(i64, i64)>,
) -> Response {
    match state.classes.invite_codes(class_id, user.user_id()).await {
        Ok(codes) => ok(
            ListResponse::all(
                codes
                    .into_iter()
                    .map(InviteCodeResponse::from)
                    .collect::<Vec<_>>(),
            ),
            "Invite codes retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve invite codes"),
    }
}
