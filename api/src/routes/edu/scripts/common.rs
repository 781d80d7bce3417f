use db::models::script::{Model as Script, ScriptStage, Visibility};
use serde::Serialize;

use crate::routes::common::rfc3339;

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub id: i64,
    pub space_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub name_en: String,
    pub difficulty: i16,
    pub duration: i32,
    pub icon: String,
    pub description: String,
    pub visibility: Visibility,
    pub background: String,
    pub objectives: Vec<String>,
    pub stages: Vec<ScriptStage>,
    pub bot_ids: Vec<i64>,
    pub status: i16,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Script> for ScriptResponse {
    fn from(s: Script) -> Self {
        Self {
            id: s.id,
            space_id: s.space_id,
            owner_id: s.owner_id,
            name: s.name,
            name_en: s.name_en,
            difficulty: s.difficulty,
            duration: s.duration,
            icon: s.icon,
            description: s.description,
            visibility: s.visibility,
            background: s.background,
            objectives: s.objectives.into_inner(),
            stages: s.stages.0,
            bot_ids: s.bot_ids.0,
            status: s.status,
            created_at: rfc3339(&s.created_at),
            updated_at: rfc3339(&s.updated_at),
        }
    }
}
