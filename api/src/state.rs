use jsonwebtoken::DecodingKey;
use sea_orm::DatabaseConnection;
use services::{
    assignment_service::AssignmentService,
    chat_service::ChatService,
    class_service::ClassService,
    evaluation_service::EvaluationService,
    evaluator::{RubricScorer, StageScorer},
    project_service::ProjectService,
    script_service::ScriptService,
};
use std::sync::Arc;
use util::config::AppConfig;

/// Everything a handler needs, built once at startup and cloned into each request.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    config: Arc<AppConfig>,
    jwt_decoding_key: DecodingKey,

    pub classes: ClassService,
    pub projects: ProjectService,
    pub evaluations: EvaluationService,
    pub assignments: AssignmentService,
    pub scripts: ScriptService,
    pub chat: ChatService,
}

impl AppState {
    /// State backed by the built-in rubric scorer.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self::with_scorer(db, config, Arc::new(RubricScorer::new()))
    }

    pub fn with_scorer(
        db: DatabaseConnection,
        config: AppConfig,
        scorer: Arc<dyn StageScorer>,
    ) -> Self {
        Self {
            jwt_decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            classes: ClassService::new(db.clone()),
            projects: ProjectService::new(db.clone()),
            evaluations: EvaluationService::new(db.clone(), scorer),
            assignments: AssignmentService::new(db.clone()),
            scripts: ScriptService::new(db.clone()),
            chat: ChatService::new(db.clone()),
            config: Arc::new(config),
            db,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.jwt_decoding_key
    }
}
