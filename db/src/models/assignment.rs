//! Teacher-issued tasks bound to a class. Projects point here to become submissions.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

use super::student_project::ProjectType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub class_id: i64,
    pub teacher_id: i64,
    pub assignment_type: ProjectType,
    pub source_id: i64,

    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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

    #[sea_orm(has_many = "super::student_project::Entity")]
    Projects,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::student_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub class_id: i64,
    pub teacher_id: i64,
    pub assignment_type: ProjectType,
    pub source_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Model {
    pub async fn create<C>(db: &C, new: NewAssignment) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();

        let active_model = ActiveModel {
            class_id: Set(new.class_id),
            teacher_id: Set(new.teacher_id),
            assignment_type: Set(new.assignment_type),
            source_id: Set(new.source_id),
            title: Set(new.title),
            description: Set(new.description),
            due_date: Set(new.due_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Assignments for a class, soonest due first; undated ones sort last.
    pub async fn list_for_class<C>(db: &C, class_id: i64) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut rows = Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await?;
        rows.sort_by_key(|a| (a.due_date.is_none(), a.due_date, a.id));
        Ok(rows)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| now > due)
    }
}
