use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::class::ClassStatus;
use serde::Deserialize;
use services::class_service::UpdateClass;
use validator::Validate;

use super::common::ClassResponse;
use crate::auth::AuthUser;
use crate::response::{fail, ok, service_error};
use crate::routes::common::{ValidatedJson, parse_date};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, max = 100, message = "Class name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub semester: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<ClassStatus>,
}

/// PUT /api/space/{space_id}/edu/classes/{class_id}
///
/// Partial update; omitted fields are left alone. `status` may be `active` or
/// `archived`. Only the class's own teacher may edit it.
///
/// - `400 Bad Request` for invalid fields or `status: "deleted"`
/// - `403 Forbidden` for anyone but the class teacher
/// - `404 Not Found` when the class does not exist
pub async fn update_class(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<UpdateClassRequest>,
) -> Response {
    if req.status == Some(ClassStatus::Deleted) {
        return fail(StatusCode::BAD_REQUEST, "Status must be active or archived");
    }
    let start_date = match parse_date("start_date", req.start_date.as_deref()) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let end_date = match parse_date("end_date", req.end_date.as_deref()) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let update = UpdateClass {
        name: req.name,
        description: req.description,
        semester: req.semester,
        start_date,
        end_date,
        status: req.status,
    };

    match state.classes.update_class(class_id, user.user_id(), update).await {
        Ok(class) => ok(ClassResponse::from(class), "Class updated successfully"),
        Err(err) => service_error(err, "Failed to update class"),
    }
}
