use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use db::models::student_project::{ProjectFilter, ProjectStatus, ProjectType};
use serde::Deserialize;

use super::common::{ProjectDetailResponse, ProjectResponse, StageResponse};
use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::routes::common::ListResponse;
use crate::routes::edu::chat::common::ChatMessageResponse;
use crate::routes::edu::evaluations::common::EvaluationResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub project_type: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    pub keyword: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/space/{space_id}/edu/projects
///
/// Lists the caller's projects in the space, newest first. Also served at `/projects/my`.
///
/// ### Query Parameters
/// - `project_type` (optional): `script`, `template` or `bot`
/// - `status` (optional): `in_progress`, `completed` or `abandoned`
/// - `keyword` (optional): substring of the title
/// - `page` (optional, default 1), `page_size` (optional, default 20, max 100)
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "code": 0,
///   "msg": "Projects retrieved successfully",
///   "data": { "list": [ { "id": 5, "title": "My weather bot", "current_stage": 2 } ], "total": 1, "page": 1, "page_size": 20 }
/// }
/// ```
pub async fn list_projects(
    State(state): State<AppState>,
    user: AuthUser,
    Path(space_id): Path<i64>,
    Query(query): Query<ListProjectsQuery>,
) -> Response {
    let filter = ProjectFilter {
        project_type: query.project_type,
        status: query.status,
        keyword: query.keyword,
    };

    match state
        .projects
        .list_user_projects(user.user_id(), space_id, &filter, query.page, query.page_size)
        .await
    {
        Ok(page) => ok(
            ListResponse::paged(
                page.items.into_iter().map(ProjectResponse::from).collect(),
                page.total,
                page.page,
                page.page_size,
            ),
            "Projects retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve projects"),
    }
}

/// GET /api/space/{space_id}/edu/projects/{project_id}
///
/// The project with its stages and evaluation history. Readable by the owner and by
/// staff of the project's class.
///
/// - `403 Forbidden` for anyone else
/// - `404 Not Found` if the project does not exist in this space
pub async fn get_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, project_id)): Path<(i64, i64)>,
) -> Response {
    let project = match state.projects.get_visible_project(project_id, user.user_id()).await {
        Ok(project) => project,
        Err(err) => return service_error(err, "Failed to retrieve project"),
    };

    let stages = match state.projects.get_project_stages(project.id, user.user_id()).await {
        Ok(stages) => stages,
        Err(err) => return service_error(err, "Failed to retrieve project"),
    };
    let evaluations = match state.evaluations.list_by_project(project.id, user.user_id()).await {
        Ok(evaluations) => evaluations,
        Err(err) => return service_error(err, "Failed to retrieve project"),
    };

    ok(
        ProjectDetailResponse {
            project: ProjectResponse::from(project),
            stages: stages.into_iter().map(StageResponse::from).collect(),
            evaluations: evaluations.into_iter().map(EvaluationResponse::from).collect(),
        },
        "Project retrieved successfully",
    )
}

/// GET /api/space/{space_id}/edu/projects/{project_id}/evaluations
///
/// Every evaluation of the project, AI and teacher alike, most recent first.
pub async fn list_evaluations(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, project_id)): Path<(i64, i64)>,
) -> Response {
    match state.evaluations.list_by_project(project_id, user.user_id()).await {
        Ok(evaluations) => ok(
            ListResponse::all(
                evaluations
                    .into_iter()
                    .map(EvaluationResponse::from)
                    .collect::<Vec<_>>(),
            ),
            "Evaluations retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve evaluations"),
    }
}

/// GET /api/space/{space_id}/edu/projects/{project_id}/evaluations/latest
///
/// The most recent evaluation, or `null` in `data` when the project has none yet.
pub async fn latest_evaluation(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, project_id)): Path<(i64, i64)>,
) -> Response {
    match state.evaluations.latest(project_id, user.user_id()).await {
        Ok(evaluation) => ok(
            evaluation.map(EvaluationResponse::from),
            "Latest evaluation retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve evaluation"),
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatHistoryQuery {
    pub stage_id: Option<i64>,
    pub limit: Option<u64>,
}

/// GET /api/space/{space_id}/edu/projects/{project_id}/chat
///
/// The latest messages (default 50, at most 200), returned oldest first. `stage_id`
/// narrows the log to one stage.
pub async fn chat_history(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_space_id, project_id)): Path<(i64, i64)>,
    Query(query): Query<ChatHistoryQuery>,
) -> Response {
    match state
        .chat
        .history(project_id, user.user_id(), query.stage_id, query.limit)
        .await
    {
        Ok(messages) => ok(
            ListResponse::all(
                messages
                    .into_iter()
                    .map(ChatMessageResponse::from)
                    .collect::<Vec<_>>(),
            ),
            "Chat history retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve chat history"),
    }
}

