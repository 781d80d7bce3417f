use db::models::chat_message::{ChatRole, Model as ChatMessage};
use serde::Serialize;

use crate::routes::common::rfc3339;

#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub id: i64,
    pub project_id: i64,
    pub stage_id: Option<i64>,
    pub role: ChatRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(m: ChatMessage) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            stage_id: m.stage_id,
            role: m.role,
            content: m.content,
            attachments: m.attachments,
            created_at: rfc3339(&m.created_at),
        }
    }
}
