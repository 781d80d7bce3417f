use axum::{extract::State, http::StatusCode, response::Response};
use db::models::student_project::{ProjectStatus, ProjectType};
use serde::{Deserialize, Serialize};
use services::evaluator::StageContext;
use tracing::warn;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::{fail, ok, service_error};
use crate::routes::common::ValidatedJson;
use crate::routes::edu::evaluations::common::EvaluationResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CompleteStageRequest {
    pub project_id: i64,
    #[validate(range(min = 1, message = "stage_order must be at least 1"))]
    pub stage_order: i32,
    #[validate(length(min = 1, max = 50000, message = "Output must be between 1 and 50000 characters"))]
    pub output_content: String,
}

#[derive(Debug, Serialize)]
pub struct CompleteStageResponse {
    pub stage_id: i64,
    pub score: f64,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_stage: Option<i32>,
    pub project_status: ProjectStatus,
    pub evaluation: EvaluationResponse,
}

/// POST /api/space/{space_id}/edu/stages/complete
///
/// Scores the submitted output, stores the AI evaluation, completes the stage and
/// starts the next one. Completing the last stage completes the project.
///
/// ### Request Body
/// ```json
/// { "project_id": 5, "stage_order": 1, "output_content": "A chatbot is..." }
/// ```
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "code": 0,
///   "msg": "Stage completed successfully",
///   "data": {
///     "stage_id": 14,
///     "score": 82.5,
///     "feedback": "## concept understanding assessment ...",
///     "next_stage": 2,
///     "project_status": "in_progress",
///     "evaluation": { "id": 3, "evaluation_type": "ai", "total_score": 82.5 }
///   }
/// }
/// ```
/// - `400 Bad Request` when the project is no longer in progress or the stage has not been reached
/// - `403 Forbidden` unless the caller owns the project
/// - `404 Not Found` when the project or stage does not exist
pub async fn complete_stage(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CompleteStageRequest>,
) -> Response {
    let user_id = user.user_id();

    let project = match state.projects.get_owned_project(req.project_id, user_id).await {
        Ok(project) => project,
        Err(err) => return service_error(err, "Failed to complete stage"),
    };
    if project.status != ProjectStatus::InProgress {
        return fail(
            StatusCode::BAD_REQUEST,
            format!("Project is {} and cannot advance", project.status),
        );
    }

    let stage = match state.projects.get_stage(project.id, req.stage_order).await {
        Ok(stage) => stage,
        Err(err) => return service_error(err, "Failed to complete stage"),
    };
    if stage.stage_order > project.current_stage {
        return fail(
            StatusCode::BAD_REQUEST,
            format!(
                "Stage {} has not been reached; the current stage is {}",
                stage.stage_order, project.current_stage
            ),
        );
    }

    let mut ctx = StageContext {
        project_id: project.id,
        stage_order: stage.stage_order,
        stage_name: stage.stage_name.clone(),
        output_content: req.output_content.clone(),
        ..Default::default()
    };
    if project.project_type == ProjectType::Script {
        match state.scripts.get_script(project.source_id).await {
            Ok(script) => {
                ctx.stage_goal = script
                    .stages
                    .by_order(stage.stage_order)
                    .map(|s| s.description.clone())
                    .unwrap_or_default();
                ctx.script_title = script.name;
            }
            Err(err) => {
                warn!(project_id = project.id, source_id = project.source_id, error = %err, "script unavailable for stage assessment");
            }
        }
    }

    // The evaluation is stored before the advance runs in its own transaction. If a
    // concurrent completion makes the advance fail, the evaluation stays in the history.
    let (evaluation, assessment) = match state.evaluations.create_ai_evaluation(user_id, &ctx).await {
        Ok(result) => result,
        Err(err) => return service_error(err, "Failed to evaluate stage"),
    };

    match state
        .projects
        .advance_stage(
            project.id,
            user_id,
            stage.stage_order,
            req.output_content,
            assessment.total_score,
            assessment.feedback.clone(),
        )
        .await
    {
        Ok(advance) => ok(
            CompleteStageResponse {
                stage_id: advance.completed.id,
                score: assessment.total_score,
                feedback: assessment.feedback,
                next_stage: advance.next_stage.map(|s| s.stage_order),
                project_status: advance.project.status,
                evaluation: EvaluationResponse::from(evaluation),
            },
            "Stage completed successfully",
        ),
        Err(err) => service_error(err, "Failed to complete stage"),
    }
}
