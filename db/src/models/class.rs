//! Classes owned by one teacher inside a space. Deletion is a status flag.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{JoinType, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub space_id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub description: String,
    pub teacher_id: i64,
    pub semester: String,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    pub status: ClassStatus,

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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "class_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ClassStatus {
    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "archived")]
    Archived,

    #[sea_orm(string_value = "deleted")]
    Deleted,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::class_member::Entity")]
    Members,

    #[sea_orm(has_many = "super::class_invite_code::Entity")]
    InviteCodes,

    #[sea_orm(has_many = "super::assignment::Entity")]
    Assignments,
}

impl Related<super::class_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::class_invite_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InviteCodes.def()
    }
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields required to insert a class.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub space_id: i64,
    pub name: String,
    pub code: String,
    pub description: String,
    pub teacher_id: i64,
    pub semester: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Model {
    pub async fn create<C>(db: &C, new: NewClass) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();

        let active_model = ActiveModel {
            space_id: Set(new.space_id),
            name: Set(new.name),
            code: Set(new.code),
            description: Set(new.description),
            teacher_id: Set(new.teacher_id),
            semester: Set(new.semester),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            status: Set(ClassStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_code<C>(db: &C, code: &str) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find().filter(Column::Code.eq(code)).one(db).await
    }

    /// Classes a teacher owns in a space, newest first. Soft-deleted classes are hidden.
    pub async fn find_by_teacher<C>(db: &C, teacher_id: i64, space_id: i64) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::SpaceId.eq(space_id))
            .filter(Column::Status.ne(ClassStatus::Deleted))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Classes in a space where `user_id` holds any membership.
    pub async fn find_by_member<C>(db: &C, user_id: i64, space_id: i64) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .join(JoinType::InnerJoin, Relation::Members.def())
            .filter(super::class_member::Column::UserId.eq(user_id))
            .filter(Column::SpaceId.eq(space_id))
            .filter(Column::Status.ne(ClassStatus::Deleted))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }
}
