//! Class membership. A user holds at most one membership (and so one role) per class.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_class_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub class_id: i64,
    pub user_id: i64,
    pub role: MemberRole,
    pub student_no: Option<String>,

    pub joined_at: DateTime<Utc>,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "class_member_role")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MemberRole {
    #[sea_orm(string_value = "teacher")]
    Teacher,

    #[sea_orm(string_value = "assistant")]
    Assistant,

    #[sea_orm(string_value = "student")]
    Student,
}

impl MemberRole {
    /// Teachers and assistants manage the class; students only take part.
    pub fn is_staff(self) -> bool {
        matches!(self, MemberRole::Teacher | MemberRole::Assistant)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id",
        on_delete = "Cascade"
    )]
    Class,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Member and student totals for one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberCounts {
    pub members: u64,
    pub students: u64,
}

impl Model {
    pub async fn create<C>(
        db: &C,
        class_id: i64,
        user_id: i64,
        role: MemberRole,
        student_no: Option<String>,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let active_model = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            role: Set(role),
            student_no: Set(student_no.filter(|s| !s.is_empty())),
            joined_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find<C>(db: &C, class_id: i64, user_id: i64) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn list_for_class<C>(
        db: &C,
        class_id: i64,
        role: Option<MemberRole>,
    ) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut query = Entity::find().filter(Column::ClassId.eq(class_id));
        if let Some(role) = role {
            query = query.filter(Column::Role.eq(role));
        }
        query
            .order_by_asc(Column::JoinedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Deletes the membership, returning how many rows were removed (0 or 1).
    pub async fn remove<C>(db: &C, class_id: i64, user_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = Entity::delete_many()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn counts_for_class<C>(db: &C, class_id: i64) -> Result<MemberCounts, DbErr>
    where
        C: ConnectionTrait,
    {
        let members = Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .count(db)
            .await?;
        let students = Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Role.eq(MemberRole::Student))
            .count(db)
            .await?;
        Ok(MemberCounts { members, students })
    }
}
