use db::models::evaluation::{DimensionScores, EvaluationType, Model as Evaluation};
use serde::Serialize;

use crate::routes::common::rfc3339;

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub evaluation_type: EvaluationType,
    pub evaluator_id: Option<i64>,
    pub dimension_scores: DimensionScores,
    pub total_score: f64,
    pub max_score: f64,
    pub feedback: Option<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub evaluated_at: String,
}

impl From<Evaluation> for EvaluationResponse {
    fn from(e: Evaluation) -> Self {
        Self {
            id: e.id,
            project_id: e.project_id,
            user_id: e.user_id,
            evaluation_type: e.evaluation_type,
            evaluator_id: e.evaluator_id,
            dimension_scores: e.dimension_scores,
            total_score: e.total_score,
            max_score: e.max_score,
            feedback: e.feedback,
            strengths: e.strengths.into_inner(),
            improvements: e.improvements.into_inner(),
            evaluated_at: rfc3339(&e.evaluated_at),
        }
    }
}
