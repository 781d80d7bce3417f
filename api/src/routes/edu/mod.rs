//! Routes under `/api/space/{space_id}/edu`.
//!
//! - `/scripts` → read-only script catalog
//! - `/projects` → a student's learning projects, their evaluations and chat log
//! - `/stages` → drafting and completing project stages
//! - `/evaluations` → teacher evaluations
//! - `/chat` → project chat messages
//! - `/classes` → class management, members, invite codes and assignments
//! - `/assignments` → a student's assignment status
//! - `/student` → classes from the student's side

use crate::state::AppState;
use axum::Router;

pub mod assignments;
pub mod chat;
pub mod classes;
pub mod evaluations;
pub mod projects;
pub mod scripts;
pub mod stages;
pub mod student;

pub fn edu_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/scripts", scripts::scripts_routes())
        .nest("/projects", projects::projects_routes(app_state.clone()))
        .nest("/stages", stages::stages_routes())
        .nest("/evaluations", evaluations::evaluations_routes())
        .nest("/chat", chat::chat_routes())
        .nest("/classes", classes::classes_routes(app_state.clone()))
        .nest("/assignments", assignments::assignments_routes(app_state))
        .nest("/student", student::student_routes())
}
