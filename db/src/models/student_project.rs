//! A student's learning project. Script projects walk through ordered stages.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_student_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub user_id: i64,
    pub space_id: i64,
    pub class_id: Option<i64>,
    pub assignment_id: Option<i64>,

    pub project_type: ProjectType,
    pub source_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub bot_id: Option<i64>,

    pub current_stage: i32,
    pub status: ProjectStatus,

    pub total_score: Option<f64>,
    pub teacher_score: Option<f64>,
    pub teacher_comment: Option<String>,

    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the project's `source_id` points at.
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProjectType {
    /// Guided by a script; `source_id` is the script id.
    #[sea_orm(string_value = "script")]
    Script,

    /// Customising a template; `source_id` is the template id.
    #[sea_orm(string_value = "template")]
    Template,

    /// Building a bot from scratch.
    #[sea_orm(string_value = "bot")]
    Bot,
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
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProjectStatus {
    #[sea_orm(string_value = "in_progress")]
    InProgress,

    #[sea_orm(string_value = "completed")]
    Completed,

    #[sea_orm(string_value = "abandoned")]
    Abandoned,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id",
        on_delete = "SetNull"
    )]
    Class,

    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id",
        on_delete = "SetNull"
    )]
    Assignment,

    #[sea_orm(has_many = "super::project_stage::Entity")]
    Stages,

    #[sea_orm(has_many = "super::evaluation::Entity")]
    Evaluations,

    #[sea_orm(has_many = "super::chat_message::Entity")]
    ChatMessages,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::project_stage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stages.def()
    }
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::chat_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatMessages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub user_id: i64,
    pub space_id: i64,
    pub project_type: ProjectType,
    pub source_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub class_id: Option<i64>,
    pub assignment_id: Option<i64>,
}

/// Optional narrowing applied when listing a user's projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub project_type: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    /// Substring match on the title.
    pub keyword: Option<String>,
}

impl Model {
    /// Inserts a project at stage 1, in progress, started now.
    pub async fn create<C>(db: &C, new: NewProject) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();

        let active_model = ActiveModel {
            user_id: Set(new.user_id),
            space_id: Set(new.space_id),
            class_id: Set(new.class_id),
            assignment_id: Set(new.assignment_id),
            project_type: Set(new.project_type),
            source_id: Set(new.source_id),
            title: Set(new.title),
            description: Set(new.description),
            bot_id: Set(None),
            current_stage: Set(1),
            status: Set(ProjectStatus::InProgress),
            total_score: Set(None),
            teacher_score: Set(None),
            teacher_comment: Set(None),
            started_at: Set(now),
            completed_at: Set(None),
            submitted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Returns one page of a user's projects in a space (newest first) and the total match count.
    pub async fn list_for_user<C>(
        db: &C,
        user_id: i64,
        space_id: i64,
        filter: &ProjectFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Model>, u64), DbErr>
    where
        C: ConnectionTrait,
    {
        let mut query = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::SpaceId.eq(space_id));

        if let Some(project_type) = filter.project_type {
            query = query.filter(Column::ProjectType.eq(project_type));
        }
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(keyword) = filter.keyword.as_deref().filter(|k| !k.is_empty()) {
            query = query.filter(Column::Title.contains(keyword));
        }

        let paginator = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(db, page_size.max(1));

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows, total))
    }

    /// The most recent project a user created for an assignment.
    pub async fn find_for_assignment<C>(
        db: &C,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::Id)
            .one(db)
            .await
    }
}
