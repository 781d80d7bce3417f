use axum::{extract::State, response::Response};
use serde::Deserialize;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::routes::common::ValidatedJson;
use crate::routes::edu::projects::common::StageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOutputRequest {
    pub stage_id: i64,
    #[validate(length(max = 50000, message = "Output must be at most 50000 characters"))]
    pub content: String,
}

/// PUT /api/space/{space_id}/edu/stages/output
///
/// Saves a draft of a stage's output without changing its status.
///
/// - `403 Forbidden` unless the caller owns the stage's project
/// - `404 Not Found` when the stage does not exist
pub async fn update_output(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateOutputRequest>,
) -> Response {
    match state
        .projects
        .update_stage_output(req.stage_id, user.user_id(), req.content)
        .await
    {
        Ok(stage) => ok(StageResponse::from(stage), "Stage output saved"),
        Err(err) => service_error(err, "Failed to save stage output"),
    }
}
