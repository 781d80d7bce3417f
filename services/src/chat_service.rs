use db::models::{
    chat_message::{ChatRole, Model as ChatMessage},
    ProjectStage, StudentProject,
};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::access;
use crate::error::{ServiceError, ServiceResult};

pub const DEFAULT_HISTORY_LIMIT: u64 = 50;
pub const MAX_HISTORY_LIMIT: u64 = 200;

/// Conversation log attached to a project, optionally scoped to one stage.
#[derive(Debug, Clone)]
pub struct ChatService {
    db: DatabaseConnection,
}

impl ChatService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a message from the project owner.
    pub async fn send_message(
        &self,
        project_id: i64,
        user_id: i64,
        stage_id: Option<i64>,
        content: &str,
        attachments: Option<serde_json::Value>,
    ) -> ServiceResult<ChatMessage> {
        if content.trim().is_empty() {
            return Err(ServiceError::invalid("Message content is required"));
        }
        let project = StudentProject::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Project"))?;
        access::ensure_project_owner(&project, user_id)?;
        self.check_stage(project_id, stage_id).await?;

        Ok(ChatMessage::create(&self.db, project_id, stage_id, ChatRole::User, content, attachments).await?)
    }

    /// The most recent messages, oldest first.
    pub async fn history(
        &self,
        project_id: i64,
        user_id: i64,
        stage_id: Option<i64>,
        limit: Option<u64>,
    ) -> ServiceResult<Vec<ChatMessage>> {
        let project = StudentProject::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Project"))?;
        access::ensure_project_viewer(&self.db, &project, user_id).await?;

        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .min(MAX_HISTORY_LIMIT);
        Ok(ChatMessage::history(&self.db, project_id, stage_id, limit).await?)
    }

    async fn check_stage(&self, project_id: i64, stage_id: Option<i64>) -> ServiceResult<()> {
        let Some(stage_id) = stage_id else {
            return Ok(());
        };
        match ProjectStage::find_by_id(stage_id).one(&self.db).await? {
            Some(stage) if stage.project_id == project_id => Ok(()),
            _ => Err(ServiceError::NotFound("Stage")),
        }
    }
}
