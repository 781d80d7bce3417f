use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::class_member::MemberRole;
use serde::{Deserialize, Serialize};
use services::class_service::{AddMembersOutcome, CreateClass, CreateInviteCode, NewMember};
use validator::Validate;

use super::common::{CLASS_CODE_REGEX, ClassResponse, InviteCodeResponse};
use crate::auth::AuthUser;
use crate::response::{fail, ok, service_error};
use crate::routes::common::{ValidatedJson, parse_date, parse_timestamp};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 100, message = "Class name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(regex(path = &*CLASS_CODE_REGEX, message = "Class code must be 1-50 letters, digits, '-' or '_'"))]
    pub code: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub semester: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// POST /api/space/{space_id}/edu/classes
///
/// Creates a class owned by the caller, who is enrolled as its teacher.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Intro to Bots",
///   "code": "BOT101",
///   "semester": "2025 spring",
///   "start_date": "2025-02-17",
///   "end_date": "2025-06-30"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the class
/// - `400 Bad Request` for invalid fields, an end date before the start date, or a taken code
pub async fn create_class(
    State(state): State<AppState>,
    user: AuthUser,
    Path(space_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateClassRequest>,
) -> Response {
    let start_date = match parse_date("start_date", req.start_date.as_deref()) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let end_date = match parse_date("end_date", req.end_date.as_deref()) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let create = CreateClass {
        space_id,
        name: req.name,
        code: req.code,
        description: req.description,
        semester: req.semester,
        start_date,
        end_date,
    };

    match state.classes.create_class(user.user_id(), create).await {
        Ok(class) => ok(ClassResponse::from(class), "Class created successfully"),
        Err(err) => service_error(err, "Failed to create class"),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct JoinClassRequest {
    #[validate(length(min = 1, max = 64, message = "Invite code is required"))]
    pub code: String,
    #[validate(length(max = 50))]
    pub student_no: Option<String>,
}

/// POST /api/space/{space_id}/edu/classes/join
///
/// Redeems an invite code. The caller joins with the role the code grants.
///
/// - `400 Bad Request` when the code is unknown, expired, used up, belongs to another
///   space, or the caller is already a member
/// - `404 Not Found` when the code's class no longer exists
pub async fn join_class(
    State(state): State<AppState>,
    user: AuthUser,
    Path(space_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<JoinClassRequest>,
) -> Response {
    match state
        .classes
        .join_by_invite_code(space_id, user.user_id(), &req.code, req.student_no)
        .await
    {
        Ok(class) => ok(ClassResponse::from(class), "Joined class successfully"),
        Err(err) => service_error(err, "Failed to join class"),
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct MemberEntry {
    pub user_id: i64,
    pub role: Option<MemberRole>,
    #[validate(length(max = 50))]
    pub student_no: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddMembersRequest {
    #[validate(
        length(min = 1, max = 500, message = "Between 1 and 500 members can be added at once"),
        nested
    )]
    pub members: Vec<MemberEntry>,
}

#[derive(Debug, Serialize)]
pub struct AddMembersResponse {
    pub success: usize,
    pub failed: usize,
    pub failed_users: Vec<i64>,
}

impl From<AddMembersOutcome> for AddMembersResponse {
    fn from(o: AddMembersOutcome) -> Self {
        Self {
            success: o.success,
            failed: o.failed,
            failed_users: o.failed_users,
        }
    }
}

/// POST /api/space/{space_id}/edu/classes/{class_id}/members
///
/// Adds members in bulk. Users who already belong to the class are reported in
/// `failed_users` and do not stop the rest. `role` defaults to `student`.
///
/// ### Request Body
/// ```json
/// { "members": [ { "user_id": 7, "student_no": "2025001" }, { "user_id": 8, "role": "assistant" } ] }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ "success": 2, "failed": 0, "failed_users": [] }`
/// - `400 Bad Request` when an entry asks for the teacher role
/// - `403 Forbidden` unless the caller is class staff
pub async fn add_members(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<AddMembersRequest>,
) -> Response {
    if req.members.iter().any(|m| m.role == Some(MemberRole::Teacher)) {
        return fail(
            StatusCode::BAD_REQUEST,
            "Members cannot be added with the teacher role",
        );
    }

    let members = req
        .members
        .into_iter()
        .map(|m| NewMember {
            user_id: m.user_id,
            role: m.role.unwrap_or(MemberRole::Student),
            student_no: m.student_no,
        })
        .collect();

    match state.classes.add_members(class_id, user.user_id(), members).await {
        Ok(outcome) => ok(AddMembersResponse::from(outcome), "Members added"),
        Err(err) => service_error(err, "Failed to add members"),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteCodeRequest {
    pub role: Option<MemberRole>,
    #[validate(range(min = 0, message = "max_uses cannot be negative"))]
    pub max_uses: Option<i32>,
    pub expires_at: Option<String>,
}

/// POST /api/space/{space_id}/edu/classes/{class_id}/invite-codes
///
/// Issues a random invite code. `max_uses` of 0 (the default) means unlimited;
/// `expires_at` is an RFC 3339 timestamp in the future.
///
/// - `400 Bad Request` for the teacher role, negative `max_uses` or a past expiry
/// - `403 Forbidden` unless the caller is class staff
pub async fn create_invite_code(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, class_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<CreateInviteCodeRequest>,
) -> Response {
    let expires_at = match parse_timestamp("expires_at", req.expires_at.as_deref()) {
        Ok(at) => at,
        Err(resp) => return resp,
    };

    let create = CreateInviteCode {
        role: req.role.unwrap_or(MemberRole::Student),
        max_uses: req.max_uses.unwrap_or(0),
        expires_at,
    };

    match state
        .classes
        .create_invite_code(class_id, user.user_id(), create)
        .await
    {
        Ok(invite) => ok(InviteCodeResponse::from(invite), "Invite code created"),
        Err(err) => service_error(err, "Failed to create invite code"),
    }
}
