//! Stage scoring.
//!
//! [`StageScorer`] is the seam where a model-backed evaluator plugs in. [`RubricScorer`] is
//! the built-in deterministic implementation: it scores a stage output against a fixed
//! per-stage rubric using only the output's length, which keeps results reproducible.

use async_trait::async_trait;
use db::models::evaluation::{DimensionScore, DimensionScores};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::{ServiceError, ServiceResult};
use crate::score::weighted_total;

/// Everything a scorer gets to see about the stage being assessed.
#[derive(Debug, Clone, Default)]
pub struct StageContext {
    pub project_id: i64,
    pub stage_order: i32,
    pub stage_name: String,
    pub output_content: String,
    pub script_title: String,
    pub stage_goal: String,
}

/// The scorer's verdict. Totals are on a 0..=100 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct StageAssessment {
    pub dimension_scores: DimensionScores,
    pub total_score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: String,
}

#[async_trait]
pub trait StageScorer: Send + Sync {
    async fn assess(&self, ctx: &StageContext) -> ServiceResult<StageAssessment>;
}

struct Criterion {
    key: &'static str,
    name: &'static str,
    weight: f64,
}

const MAX_DIMENSION_SCORE: f64 = 100.0;
const MIN_DIMENSION_SCORE: f64 = 60.0;

const CONCEPT_RUBRIC: &[Criterion] = &[
    Criterion { key: "understanding", name: "Concept understanding", weight: 0.35 },
    Criterion { key: "clarity", name: "Clarity of expression", weight: 0.25 },
    Criterion { key: "completeness", name: "Completeness", weight: 0.25 },
    Criterion { key: "insight", name: "Depth of insight", weight: 0.15 },
];

const DESIGN_RUBRIC: &[Criterion] = &[
    Criterion { key: "requirement", name: "Requirement analysis", weight: 0.25 },
    Criterion { key: "design", name: "Feature design", weight: 0.35 },
    Criterion { key: "feasibility", name: "Feasibility", weight: 0.20 },
    Criterion { key: "innovation", name: "Innovation", weight: 0.20 },
];

const BUILD_RUBRIC: &[Criterion] = &[
    Criterion { key: "functionality", name: "Functionality", weight: 0.40 },
    Criterion { key: "quality", name: "Implementation quality", weight: 0.30 },
    Criterion { key: "usability", name: "Usability", weight: 0.20 },
    Criterion { key: "documentation", name: "Documentation", weight: 0.10 },
];

fn rubric(stage_order: i32) -> Option<&'static [Criterion]> {
    match stage_order {
        1 => Some(CONCEPT_RUBRIC),
        2 => Some(DESIGN_RUBRIC),
        3 => Some(BUILD_RUBRIC),
        _ => None,
    }
}

/// Length-driven rubric scorer used when no model-backed evaluator is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubricScorer;

impl RubricScorer {
    pub fn new() -> Self {
        Self
    }

    fn dimension_score(content_len: usize) -> f64 {
        let base = if content_len > 500 {
            85.0
        } else if content_len > 200 {
            75.0
        } else {
            70.0
        };
        let jitter = (content_len % 10) as f64 - 5.0;
        (base + jitter).clamp(MIN_DIMENSION_SCORE, MAX_DIMENSION_SCORE)
    }
}

#[async_trait]
impl StageScorer for RubricScorer {
    async fn assess(&self, ctx: &StageContext) -> ServiceResult<StageAssessment> {
        let criteria = rubric(ctx.stage_order).ok_or_else(|| {
            ServiceError::InvalidInput(format!("no rubric for stage {}", ctx.stage_order))
        })?;

        let score = Self::dimension_score(ctx.output_content.len());
        let dimensions: BTreeMap<String, DimensionScore> = criteria
            .iter()
            .map(|c| {
                (
                    c.key.to_string(),
                    DimensionScore {
                        name: c.name.to_string(),
                        score,
                        max_score: MAX_DIMENSION_SCORE,
                        weight: c.weight,
                        feedback: Some(format!("Solid work on {}", c.name.to_lowercase())),
                    },
                )
            })
            .collect();
        let dimension_scores = DimensionScores::from(dimensions);
        let total_score = weighted_total(&dimension_scores)?;

        Ok(StageAssessment {
            strengths: strengths(ctx.stage_order, total_score),
            improvements: improvements(ctx.stage_order, total_score),
            feedback: feedback(ctx, criteria, &dimension_scores, total_score),
            dimension_scores,
            total_score,
        })
    }
}

fn strengths(stage_order: i32, total: f64) -> Vec<String> {
    let lines: &[&str] = match (stage_order, tier3(total)) {
        (1, 0) => &[
            "Shows a thorough grasp of the core concepts",
            "Explains ideas clearly and in a logical order",
            "Connects the concepts to real-world situations",
        ],
        (1, 1) => &[
            "Understands the main concepts",
            "Expresses ideas clearly",
        ],
        (1, _) => &["Has started to engage with the concepts"],
        (2, 0) => &[
            "Analyses the requirements precisely",
            "Feature design is well structured and complete",
            "Proposes some original ideas",
        ],
        (2, 1) => &[
            "Requirements are identified correctly",
            "Feature design is reasonable",
        ],
        (2, _) => &["Has outlined the basic features"],
        (_, 0) => &[
            "The bot works end to end",
            "Configuration is careful and complete",
            "The user experience has been thought through",
        ],
        (_, 1) => &[
            "Core bot features work",
            "Configuration is mostly complete",
        ],
        _ => &["The bot has been created"],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

fn improvements(stage_order: i32, total: f64) -> Vec<String> {
    let lines: &[&str] = match (stage_order, tier3(total)) {
        (1, 0) => &["Explore how the concepts apply in more advanced scenarios"],
        (1, 1) => &[
            "Go deeper into the underlying ideas",
            "Add more concrete examples",
        ],
        (1, _) => &[
            "Review the core concepts again",
            "Work through the learning material more closely",
            "Practise explaining the ideas in your own words",
        ],
        (2, 0) => &["Think about edge cases and error handling"],
        (2, 1) => &[
            "Refine the detailed feature design",
            "Check whether the plan is practical to build",
        ],
        (2, _) => &[
            "Revisit the requirements",
            "Make the feature list more complete",
            "Consider how users will actually use it",
        ],
        (_, 0) => &["Keep tuning the details of the experience"],
        (_, 1) => &[
            "Round out the remaining features",
            "Improve the interaction flow",
        ],
        _ => &[
            "Complete the bot's configuration",
            "Add the core features",
            "Test and refine the behaviour",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

/// 0 for 85+, 1 for 75+, 2 otherwise.
fn tier3(total: f64) -> u8 {
    if total >= 85.0 {
        0
    } else if total >= 75.0 {
        1
    } else {
        2
    }
}

fn feedback(
    ctx: &StageContext,
    criteria: &[Criterion],
    scores: &DimensionScores,
    total: f64,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## {} assessment\n", ctx.stage_name);
    let _ = writeln!(out, "**Overall score**: {total:.1}/100\n");
    let _ = writeln!(out, "### Dimension scores");

    for c in criteria {
        if let Some(dim) = scores.0.get(c.key) {
            let _ = writeln!(
                out,
                "- **{}**: {:.1}/{:.0} (weight {:.0}%)",
                dim.name,
                dim.score,
                dim.max_score,
                dim.weight * 100.0
            );
            if let Some(note) = &dim.feedback {
                let _ = writeln!(out, "  {note}");
            }
        }
    }

    let summary = if total >= 90.0 {
        "Excellent work. Your output is complete and well considered."
    } else if total >= 80.0 {
        "Good work. The fundamentals are in place with some room to polish."
    } else if total >= 70.0 {
        "Acceptable. The basics are there but several areas need more work."
    } else {
        "Needs improvement. Review the learning material and try again."
    };
    let _ = write!(out, "\n### Summary\n{summary}");
    out
}
