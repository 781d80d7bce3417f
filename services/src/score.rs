//! Weighted aggregation of per-dimension scores.

use db::models::evaluation::DimensionScores;

use crate::error::{ServiceError, ServiceResult};

/// Computes `Σ (score / max_score) * weight * 100` over every dimension.
///
/// Weights are taken as given and are not normalised, so a rubric whose weights do not
/// sum to 1 produces a total outside the usual 0..=100 range. A dimension with a
/// non-positive or non-finite `max_score`, or a non-finite score or weight, is rejected.
pub fn weighted_total(scores: &DimensionScores) -> ServiceResult<f64> {
    let mut total = 0.0;

    for (key, dim) in scores.iter() {
        if !dim.max_score.is_finite() || dim.max_score <= 0.0 {
            return Err(ServiceError::InvalidInput(format!(
                "dimension '{key}' must have a positive max_score"
            )));
        }
        if !dim.score.is_finite() || !dim.weight.is_finite() {
            return Err(ServiceError::InvalidInput(format!(
                "dimension '{key}' has a non-numeric score or weight"
            )));
        }
        total += dim.score / dim.max_score * dim.weight * 100.0;
    }

    Ok(total)
}
