use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_project_stages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub project_id: i64,
    /// 1-based position within the project. Unique per project.
    pub stage_order: i32,
    pub stage_name: String,
    pub status: StageStatus,

    pub output_content: Option<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,

    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
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
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "stage_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StageStatus {
    #[sea_orm(string_value = "not_started")]
    NotStarted,

    #[sea_orm(string_value = "in_progress")]
    InProgress,

    #[sea_orm(string_value = "completed")]
    Completed,
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

impl Model {
    /// Inserts a stage. An `InProgress` stage is stamped with `started_at`.
    pub async fn create<C>(
        db: &C,
        project_id: i64,
        stage_order: i32,
        stage_name: &str,
        status: StageStatus,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        let started_at = (status != StageStatus::NotStarted).then_some(now);

        let active_model = ActiveModel {
            project_id: Set(project_id),
            stage_order: Set(stage_order),
            stage_name: Set(stage_name.to_owned()),
            status: Set(status),
            output_content: Set(None),
            score: Set(None),
            feedback: Set(None),
            started_at: Set(started_at),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_order<C>(
        db: &C,
        project_id: i64,
        stage_order: i32,
    ) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::StageOrder.eq(stage_order))
            .one(db)
            .await
    }

    pub async fn list_for_project<C>(db: &C, project_id: i64) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .order_by_asc(Column::StageOrder)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student_project::{Model as Project, NewProject, ProjectType};
    use crate::test_utils::setup_test_db;

    async fn project(db: &DatabaseConnection) -> Project {
        Project::create(
            db,
            NewProject {
                user_id: 1,
                space_id: 1,
                project_type: ProjectType::Script,
                source_id: 1,
                title: "p".into(),
                description: None,
                class_id: None,
                assignment_id: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn stages_are_unique_per_order_and_listed_in_order() {
        let db = setup_test_db().await;
        let p = project(&db).await;

        Model::create(&db, p.id, 2, "second", StageStatus::NotStarted).await.unwrap();
        let first = Model::create(&db, p.id, 1, "first", StageStatus::InProgress)
            .await
            .unwrap();
        assert!(first.started_at.is_some());

        let dup = Model::create(&db, p.id, 1, "again", StageStatus::NotStarted).await;
        assert!(dup.is_err());

        let orders: Vec<i32> = Model::list_for_project(&db, p.id)
            .await
            .unwrap()
            .iter()
            .map(|s| s.stage_order)
            .collect();
        assert_eq!(orders, vec![1, 2]);

        let second = Model::find_by_order(&db, p.id, 2).await.unwrap().unwrap();
        assert_eq!(second.stage_name, "second");
        assert!(second.started_at.is_none());
        assert!(Model::find_by_order(&db, p.id, 3).await.unwrap().is_none());
    }
}
