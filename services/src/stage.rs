//! Stage lifecycle: `NotStarted -> InProgress -> Completed`.
//!
//! Each transition consumes the stored row and yields the active model to persist, so
//! callers decide which connection (or transaction) writes it.

use chrono::{DateTime, Utc};
use db::models::project_stage::{ActiveModel, Model as Stage, StageStatus};
use sea_orm::{ActiveValue::Set, IntoActiveModel};

use crate::error::{ServiceError, ServiceResult};

/// Activates a stage. Only a stage that has not started yet can be started.
pub fn start(stage: Stage, now: DateTime<Utc>) -> ServiceResult<ActiveModel> {
    if stage.status != StageStatus::NotStarted {
        return Err(ServiceError::InvalidTransition(format!(
            "stage {} is {} and cannot be started",
            stage.stage_order, stage.status
        )));
    }

    let mut active = stage.into_active_model();
    active.status = Set(StageStatus::InProgress);
    active.started_at = Set(Some(now));
    active.updated_at = Set(now);
    Ok(active)
}

/// Completes a stage with its final output, score and feedback.
///
/// Allowed from any state. Completing an already completed stage overwrites the earlier
/// result (last write wins).
pub fn complete(
    stage: Stage,
    output: String,
    score: f64,
    feedback: String,
    now: DateTime<Utc>,
) -> ActiveModel {
    let mut active = stage.into_active_model();
    active.status = Set(StageStatus::Completed);
    active.output_content = Set(Some(output));
    active.score = Set(Some(score));
    active.feedback = Set(Some(feedback));
    active.completed_at = Set(Some(now));
    active.updated_at = Set(now);
    active
}

/// Replaces the draft output without touching the status.
pub fn update_output(stage: Stage, content: String, now: DateTime<Utc>) -> ActiveModel {
    let mut active = stage.into_active_model();
    active.output_content = Set(Some(content));
    active.updated_at = Set(now);
    active
}
