use db::models::{assignment::Model as Assignment, student_project::ProjectType};
use serde::Serialize;
use services::assignment_service::AssignmentStatus;

use crate::routes::common::{rfc3339, rfc3339_opt};
use crate::routes::edu::projects::common::ProjectResponse;

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub assignment_type: ProjectType,
    pub source_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            class_id: a.class_id,
            teacher_id: a.teacher_id,
            assignment_type: a.assignment_type,
            source_id: a.source_id,
            title: a.title,
            description: a.description,
            due_date: rfc3339_opt(&a.due_date),
            created_at: rfc3339(&a.created_at),
            updated_at: rfc3339(&a.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssignmentStatusResponse {
    pub assignment: AssignmentResponse,
    pub project: Option<ProjectResponse>,
    pub is_submitted: bool,
    pub is_overdue: bool,
}

impl From<AssignmentStatus> for AssignmentStatusResponse {
    fn from(s: AssignmentStatus) -> Self {
        Self {
            assignment: AssignmentResponse::from(s.assignment),
            project: s.project.map(ProjectResponse::from),
            is_submitted: s.is_submitted,
            is_overdue: s.is_overdue,
        }
    }
}
