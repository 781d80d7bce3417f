use axum::{extract::State, response::Response};
use serde::Deserialize;
use validator::Validate;

use super::common::ChatMessageResponse;
use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::routes::common::ValidatedJson;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub project_id: i64,
    pub stage_id: Option<i64>,
    #[validate(length(min = 1, max = 10000, message = "Message must be between 1 and 10000 characters"))]
    pub content: String,
    pub attachments: Option<serde_json::Value>,
}

/// POST /api/space/{space_id}/edu/chat/send
///
/// Appends a message from the project owner to the project's conversation.
///
/// - `400 Bad Request` for empty content
/// - `403 Forbidden` unless the caller owns the project
/// - `404 Not Found` when the project, or the stage within it, does not exist
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Response {
    match state
        .chat
        .send_message(
            req.project_id,
            user.user_id(),
            req.stage_id,
            &req.content,
            req.attachments,
        )
        .await
    {
        Ok(message) => ok(ChatMessageResponse::from(message), "Message sent successfully"),
        Err(err) => service_error(err, "Failed to send message"),
    }
}
