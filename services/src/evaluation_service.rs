use chrono::Utc;
use db::models::{
    evaluation::{DimensionScores, EvaluationType, Model as Evaluation, NewEvaluation},
    student_project::ActiveModel as ProjectActiveModel,
    Class, StudentProject,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::info;

use crate::access;
use crate::error::{ServiceError, ServiceResult};
use crate::evaluator::{StageAssessment, StageContext, StageScorer};
use crate::score::weighted_total;

pub const AI_MAX_SCORE: f64 = 100.0;

/// A teacher's rubric-based evaluation of a student project.
#[derive(Debug, Clone)]
pub struct TeacherEvaluation {
    pub project_id: i64,
    pub evaluator_id: i64,
    pub dimension_scores: DimensionScores,
    pub max_score: Option<f64>,
    pub feedback: Option<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Clone)]
pub struct EvaluationService {
    db: DatabaseConnection,
    scorer: Arc<dyn StageScorer>,
}

impl EvaluationService {
    pub fn new(db: DatabaseConnection, scorer: Arc<dyn StageScorer>) -> Self {
        Self { db, scorer }
    }

    /// Runs the configured scorer on a stage without persisting anything.
    pub async fn assess_stage(&self, ctx: &StageContext) -> ServiceResult<StageAssessment> {
        self.scorer.assess(ctx).await
    }

    /// Scores a stage and stores the result as an AI evaluation of the project.
    pub async fn create_ai_evaluation(
        &self,
        user_id: i64,
        ctx: &StageContext,
    ) -> ServiceResult<(Evaluation, StageAssessment)> {
        let assessment = self.assess_stage(ctx).await?;

        let evaluation = Evaluation::create(
            &self.db,
            NewEvaluation {
                project_id: ctx.project_id,
                user_id,
                evaluation_type: EvaluationType::Ai,
                evaluator_id: None,
                dimension_scores: assessment.dimension_scores.clone(),
                total_score: assessment.total_score,
                max_score: AI_MAX_SCORE,
                feedback: Some(assessment.feedback.clone()),
                strengths: assessment.strengths.clone(),
                improvements: assessment.improvements.clone(),
            },
        )
        .await?;

        info!(
            project_id = ctx.project_id,
            stage = ctx.stage_order,
            total = assessment.total_score,
            "AI evaluation stored"
        );
        Ok((evaluation, assessment))
    }

    /// Stores a teacher evaluation and copies its total and comment onto the project.
    ///
    /// Only staff of the project's class may evaluate it. Both writes share a transaction.
    pub async fn create_teacher_evaluation(&self, req: TeacherEvaluation) -> ServiceResult<Evaluation> {
        if req.dimension_scores.is_empty() {
            return Err(ServiceError::invalid("At least one dimension score is required"));
        }
        let max_score = req.max_score.unwrap_or(100.0);
        if !max_score.is_finite() || max_score <= 0.0 {
            return Err(ServiceError::invalid("max_score must be positive"));
        }
        let total_score = weighted_total(&req.dimension_scores)?;

        let project = StudentProject::find_by_id(req.project_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Project"))?;
        let class = match project.class_id {
            Some(class_id) => Class::find_by_id(class_id).one(&self.db).await?,
            None => None,
        };
        let class = class.ok_or_else(|| {
            ServiceError::forbidden("Only class staff can evaluate this project")
        })?;
        access::ensure_class_staff(&self.db, &class, req.evaluator_id).await?;

        let txn = self.db.begin().await?;

        let evaluation = Evaluation::create(
            &txn,
            NewEvaluation {
                project_id: project.id,
                user_id: project.user_id,
                evaluation_type: EvaluationType::Teacher,
                evaluator_id: Some(req.evaluator_id),
                dimension_scores: req.dimension_scores,
                total_score,
                max_score,
                feedback: req.feedback.clone(),
                strengths: req.strengths,
                improvements: req.improvements,
            },
        )
        .await?;

        let mut active: ProjectActiveModel = project.into_active_model();
        active.teacher_score = Set(Some(total_score));
        active.teacher_comment = Set(req.feedback);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;

        info!(
            project_id = req.project_id,
            evaluator_id = req.evaluator_id,
            total = total_score,
            "teacher evaluation stored"
        );
        Ok(evaluation)
    }

    /// Evaluations visible to `user_id`, most recent first.
    pub async fn list_by_project(&self, project_id: i64, user_id: i64) -> ServiceResult<Vec<Evaluation>> {
        self.ensure_viewer(project_id, user_id).await?;
        Ok(Evaluation::list_for_project(&self.db, project_id).await?)
    }

    pub async fn latest(&self, project_id: i64, user_id: i64) -> ServiceResult<Option<Evaluation>> {
        self.ensure_viewer(project_id, user_id).await?;
        Ok(Evaluation::latest_for_project(&self.db, project_id).await?)
    }

    async fn ensure_viewer(&self, project_id: i64, user_id: i64) -> ServiceResult<()> {
        let project = StudentProject::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Project"))?;
        access::ensure_project_viewer(&self.db, &project, user_id).await
    }
}
