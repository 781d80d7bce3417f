//! Immutable evaluation records, AI-generated or teacher-authored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::json::StringList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub project_id: i64,
    /// The student whose work was evaluated.
    pub user_id: i64,
    pub evaluation_type: EvaluationType,
    pub evaluator_id: Option<i64>,

    #[sea_orm(column_type = "Json")]
    pub dimension_scores: DimensionScores,
    pub total_score: f64,
    pub max_score: f64,

    pub feedback: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub strengths: StringList,
    #[sea_orm(column_type = "Json")]
    pub improvements: StringList,

    pub evaluated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "evaluation_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EvaluationType {
    #[sea_orm(string_value = "ai")]
    Ai,

    #[sea_orm(string_value = "teacher")]
    Teacher,
}

/// Score for one named dimension of an evaluation rubric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Dimension key to score. Ordered so that stored JSON and feedback text are stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct DimensionScores(pub BTreeMap<String, DimensionScore>);

impl DimensionScores {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DimensionScore)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<BTreeMap<String, DimensionScore>> for DimensionScores {
    fn from(map: BTreeMap<String, DimensionScore>) -> Self {
        Self(map)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_project::Entity",
        from = "Column::ProjectId",
        to = "super::student_project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<super::student_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewEvaluation {
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
}

impl Model {
    pub async fn create<C>(db: &C, new: NewEvaluation) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let active_model = ActiveModel {
            project_id: Set(new.project_id),
            user_id: Set(new.user_id),
            evaluation_type: Set(new.evaluation_type),
            evaluator_id: Set(new.evaluator_id),
            dimension_scores: Set(new.dimension_scores),
            total_score: Set(new.total_score),
            max_score: Set(new.max_score),
            feedback: Set(new.feedback),
            strengths: Set(new.strengths.into()),
            improvements: Set(new.improvements.into()),
            evaluated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// All evaluations of a project, most recent first.
    pub async fn list_for_project<C>(db: &C, project_id: i64) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .order_by_desc(Column::EvaluatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn latest_for_project<C>(db: &C, project_id: i64) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .order_by_desc(Column::EvaluatedAt)
            .order_by_desc(Column::Id)
            .one(db)
            .await
    }
}
