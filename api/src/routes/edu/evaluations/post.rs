use axum::{extract::State, response::Response};
use db::models::evaluation::DimensionScores;
use serde::Deserialize;
use services::evaluation_service::TeacherEvaluation;
use validator::Validate;

use super::common::EvaluationResponse;
use crate::auth::AuthUser;
use crate::response::{ok, service_error};
use crate::routes::common::ValidatedJson;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEvaluationRequest {
    pub project_id: i64,
    pub dimension_scores: DimensionScores,
    #[validate(range(exclusive_min = 0.0, message = "max_score must be positive"))]
    pub max_score: Option<f64>,
    #[validate(length(max = 5000))]
    pub feedback: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// POST /api/space/{space_id}/edu/evaluations
///
/// Records a teacher evaluation. The total is the weighted sum of
/// `score / max_score * weight * 100` over every dimension, and becomes the project's
/// `teacher_score`.
///
/// ### Request Body
/// ```json
/// {
///   "project_id": 5,
///   "dimension_scores": {
///     "design": { "name": "Design", "score": 8, "max_score": 10, "weight": 0.6 },
///     "code": { "name": "Code", "score": 9, "max_score": 10, "weight": 0.4 }
///   },
///   "feedback": "Well structured"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the stored evaluation (`total_score` 84 for the body above)
/// - `400 Bad Request` when no dimensions are given or a dimension max is not positive
/// - `403 Forbidden` unless the caller is staff of the project's class
/// - `404 Not Found` when the project does not exist
pub async fn create_teacher_evaluation(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateEvaluationRequest>,
) -> Response {
    let evaluation = TeacherEvaluation {
        project_id: req.project_id,
        evaluator_id: user.user_id(),
        dimension_scores: req.dimension_scores,
        max_score: req.max_score,
        feedback: req.feedback,
        strengths: req.strengths,
        improvements: req.improvements,
    };

    match state.evaluations.create_teacher_evaluation(evaluation).await {
        Ok(evaluation) => ok(
            EvaluationResponse::from(evaluation),
            "Evaluation created successfully",
        ),
        Err(err) => service_error(err, "Failed to create evaluation"),
    }
}
