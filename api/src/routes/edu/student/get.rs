use axum::{
    extract::{Path, State},
    response::Response,
};
use db::models::class_member::MemberRole;
use serde::Serialize;
use services::class_service::ClassDetail;

use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::routes::common::ListResponse;
use crate::routes::edu::classes::common::{ClassResponse, ClassSummaryResponse, MemberResponse};
use crate::state::AppState;

/// GET /api/space/{space_id}/edu/student/classes
///
/// Every class in the space the caller belongs to, with counts.
pub async fn my_classes(
    State(state): State<AppState>,
    user: AuthUser,
    Path(space_id): Path<i64>,
) -> Response {
    match state.classes.student_classes(user.user_id(), space_id).await {
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

#[derive(Debug, Serialize)]
pub struct ClassDetailResponse {
    #[serde(flatten)]
    pub class: ClassResponse,
    pub my_role: MemberRole,
    pub members: Vec<MemberResponse>,
}

impl From<ClassDetail> for ClassDetailResponse {
    fn from(d: ClassDetail) -> Self {
        Self {
            class: ClassResponse::from(d.class),
            my_role: d.my_role,
            members: d.members.into_iter().map(MemberResponse::from).collect(),
        }
    }
}

/// GET /api/space/{space_id}/edu/student/classes/{class_id}
///
/// The class, the caller's role in it and the member list.
///
/// - `400 Bad Request` when the class is in another space
/// - `403 Forbidden` unless the caller is a member
/// - `404 Not Found` when the class does not exist
pub async fn class_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path((space_id, class_id)): Path<(i64, i64)>,
) -> Response {
    match state
        .classes
        .student_class_detail(space_id, class_id, user.user_id())
        .await
    {
        Ok(detail) => ok(
            ClassDetailResponse::from(detail),
            "Class retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve class"),
    }
}
