use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010006_create_edu_student_projects"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("edu_student_projects"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("user_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("space_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("class_id")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("assignment_id")).big_integer().null())
                    .col(
                        ColumnDef::new(Alias::new("project_type"))
                            .enumeration(
                                Alias::new("project_type"),
                                vec![
                                    Alias::new("script"),
                                    Alias::new("template"),
                                    Alias::new("bot"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("source_id"))
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Alias::new("title")).string_len(200).not_null())
                    .col(ColumnDef::new(Alias::new("description")).text().null())
                    .col(ColumnDef::new(Alias::new("bot_id")).big_integer().null())
                    .col(
                        ColumnDef::new(Alias::new("current_stage"))
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("project_status"),
                                vec![
                                    Alias::new("in_progress"),
                                    Alias::new("completed"),
                                    Alias::new("abandoned"),
                                ],
                            )
                            .not_null()
                            .default("in_progress"),
                    )
                    .col(ColumnDef::new(Alias::new("total_score")).double().null())
                    .col(ColumnDef::new(Alias::new("teacher_score")).double().null())
                    .col(ColumnDef::new(Alias::new("teacher_comment")).text().null())
                    .col(ColumnDef::new(Alias::new("started_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("completed_at")).timestamp().null())
                    .col(ColumnDef::new(Alias::new("submitted_at")).timestamp().null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("edu_student_projects"), Alias::new("class_id"))
                            .to(Alias::new("edu_classes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("edu_student_projects"), Alias::new("assignment_id"))
                            .to(Alias::new("edu_assignments"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_edu_student_projects_user_space")
                    .table(Alias::new("edu_student_projects"))
                    .col(Alias::new("user_id"))
                    .col(Alias::new("space_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("edu_student_projects"))
                    .to_owned(),
            )
            .await
    }
}
