use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_chat_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub project_id: i64,
    pub stage_id: Option<i64>,
    pub role: ChatRole,
    pub content: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub attachments: Option<serde_json::Value>,

    pub created_at: DateTime<Utc>,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "chat_role")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ChatRole {
    #[sea_orm(string_value = "user")]
    User,

    #[sea_orm(string_value = "assistant")]
    Assistant,
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
    pub async fn create<C>(
        db: &C,
        project_id: i64,
        stage_id: Option<i64>,
        role: ChatRole,
        content: &str,
        attachments: Option<serde_json::Value>,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let active_model = ActiveModel {
            project_id: Set(project_id),
            stage_id: Set(stage_id),
            role: Set(role),
            content: Set(content.to_owned()),
            attachments: Set(attachments),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// The latest `limit` messages of a project (optionally one stage), returned oldest first.
    pub async fn history<C>(
        db: &C,
        project_id: i64,
        stage_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut query = Entity::find().filter(Column::ProjectId.eq(project_id));
        if let Some(stage_id) = stage_id {
            query = query.filter(Column::StageId.eq(stage_id));
        }

        let mut rows = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(db)
            .await?;
        rows.reverse();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student_project::{Model as Project, NewProject, ProjectType};
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn history_keeps_latest_messages_in_chronological_order() {
        let db = setup_test_db().await;
        let project = Project::create(
            &db,
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
        .unwrap();

        for i in 0..4 {
            Model::create(&db, project.id, Some(1), ChatRole::User, &format!("m{i}"), None)
                .await
                .unwrap();
        }
        Model::create(
            &db,
            project.id,
            Some(2),
            ChatRole::Assistant,
            "other stage",
            Some(serde_json::json!([{"name": "notes.md"}])),
        )
        .await
        .unwrap();

        let stage_one = Model::history(&db, project.id, Some(1), 3).await.unwrap();
        let contents: Vec<&str> = stage_one.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m1", "m2", "m3"]);

        let all = Model::history(&db, project.id, None, 50).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all.last().unwrap().attachments.as_ref().unwrap()[0]["name"], "notes.md");
    }
}
