//! Read-only catalog of guided learning scripts.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{FromJsonQueryResult, PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::json::{IdList, StringList};

/// Scripts with this status are listed; anything else is disabled.
pub const STATUS_ENABLED: i16 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_scripts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub space_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub name_en: String,
    /// 1 easy, 2 medium, 3 hard.
    pub difficulty: i16,
    /// Estimated duration in minutes.
    pub duration: i32,
    pub icon: String,
    pub description: String,
    pub visibility: Visibility,
    pub background: String,

    #[sea_orm(column_type = "Json")]
    pub objectives: StringList,
    #[sea_orm(column_type = "Json")]
    pub stages: ScriptStages,
    #[sea_orm(column_type = "Json")]
    pub bot_ids: IdList,

    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "script_visibility")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Visibility {
    #[sea_orm(string_value = "private")]
    Private,

    #[sea_orm(string_value = "team")]
    Team,

    #[sea_orm(string_value = "public")]
    Public,
}

/// One step of a script's stage template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptStage {
    pub order: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Minutes.
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub bot_ids: Vec<i64>,
    #[serde(default)]
    pub output_type: String,
    #[serde(default)]
    pub output_template: String,
    #[serde(default)]
    pub weight: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ScriptStages(pub Vec<ScriptStage>);

impl ScriptStages {
    pub fn by_order(&self, order: i32) -> Option<&ScriptStage> {
        self.0.iter().find(|s| s.order == order)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default)]
pub struct NewScript {
    pub space_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub difficulty: i16,
    pub visibility: Option<Visibility>,
    pub objectives: Vec<String>,
    pub stages: Vec<ScriptStage>,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptFilter {
    pub keyword: Option<String>,
    pub difficulty: Option<i16>,
}

impl Model {
    /// Inserts an enabled script. The catalog is managed elsewhere; this exists for seeding.
    pub async fn create<C>(db: &C, new: NewScript) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();

        let active_model = ActiveModel {
            space_id: Set(new.space_id),
            owner_id: Set(new.owner_id),
            name: Set(new.name),
            name_en: Set(String::new()),
            difficulty: Set(new.difficulty),
            duration: Set(new.stages.iter().map(|s| s.duration).sum()),
            icon: Set(String::new()),
            description: Set(new.description),
            visibility: Set(new.visibility.unwrap_or(Visibility::Team)),
            background: Set(String::new()),
            objectives: Set(new.objectives.into()),
            stages: Set(ScriptStages(new.stages)),
            bot_ids: Set(IdList::default()),
            status: Set(STATUS_ENABLED),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Enabled scripts visible from a space: its own team/public scripts plus every public one.
    pub async fn list_visible<C>(
        db: &C,
        space_id: i64,
        filter: &ScriptFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Model>, u64), DbErr>
    where
        C: ConnectionTrait,
    {
        let visible = Condition::any()
            .add(
                Condition::all()
                    .add(Column::SpaceId.eq(space_id))
                    .add(Column::Visibility.is_in([Visibility::Team, Visibility::Public])),
            )
            .add(Column::Visibility.eq(Visibility::Public));

        let mut query = Entity::find()
            .filter(Column::Status.eq(STATUS_ENABLED))
            .filter(visible);

        if let Some(keyword) = filter.keyword.as_deref().filter(|k| !k.is_empty()) {
            let pattern = format!("%{keyword}%");
            query = query.filter(
                Condition::any()
                    .add(Expr::col(Column::Name).like(pattern.clone()))
                    .add(Expr::col(Column::Description).like(pattern)),
            );
        }
        if let Some(difficulty) = filter.difficulty {
            query = query.filter(Column::Difficulty.eq(difficulty));
        }

        let paginator = query.order_by_asc(Column::Id).paginate(db, page_size.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows, total))
    }
}
