use db::models::{
    project_stage::{Model as Stage, StageStatus},
    student_project::{Model as Project, ProjectStatus, ProjectType},
};
use serde::Serialize;

use crate::routes::common::{rfc3339, rfc3339_opt};
use crate::routes::edu::evaluations::common::EvaluationResponse;

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub user_id: i64,
    pub space_id: i64,
    pub class_id: Option<i64>,
    pub assignment_id: Option<i64>,
    pub project_type: ProjectType,
    pub source_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub bot_id: Option<i64>,
    pub current_stage: i32,
    pub status: ProjectStatus,
    pub total_score: Option<f64>,
    pub teacher_score: Option<f64>,
    pub teacher_comment: Option<String>,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub submitted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            space_id: p.space_id,
            class_id: p.class_id,
            assignment_id: p.assignment_id,
            project_type: p.project_type,
            source_id: p.source_id,
            title: p.title,
            description: p.description,
            bot_id: p.bot_id,
            current_stage: p.current_stage,
            status: p.status,
            total_score: p.total_score,
            teacher_score: p.teacher_score,
            teacher_comment: p.teacher_comment,
            started_at: rfc3339(&p.started_at),
            completed_at: rfc3339_opt(&p.completed_at),
            submitted_at: rfc3339_opt(&p.submitted_at),
            created_at: rfc3339(&p.created_at),
            updated_at: rfc3339(&p.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StageResponse {
    pub id: i64,
    pub project_id: i64,
    pub stage_order: i32,
    pub stage_name: String,
    pub status: StageStatus,
    pub output_content: Option<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
}

impl From<Stage> for StageResponse {
    fn from(s: Stage) -> Self {
        Self {
            id: s.id,
            project_id: s.project_id,
            stage_order: s.stage_order,
            stage_name: s.stage_name,
            status: s.status,
            output_content: s.output_content,
            score: s.score,
            feedback: s.feedback,
            started_at: rfc3339_opt(&s.started_at),
            completed_at: rfc3339_opt(&s.completed_at),
        }
    }
}

/// A project with its stages (in order) and evaluations (newest first).
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub stages: Vec<StageResponse>,
    pub evaluations: Vec<EvaluationResponse>,
}
