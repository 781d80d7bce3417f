use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010007_create_edu_project_stages"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("edu_project_stages"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("project_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("stage_order")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("stage_name")).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("stage_status"),
                                vec![
                                    Alias::new("not_started"),
                                    Alias::new("in_progress"),
                                    Alias::new("completed"),
                                ],
                            )
                            .not_null()
                            .default("not_started"),
                    )
                    .col(ColumnDef::new(Alias::new("output_content")).text().null())
                    .col(ColumnDef::new(Alias::new("score")).double().null())
                    .col(ColumnDef::new(Alias::new("feedback")).text().null())
                    .col(ColumnDef::new(Alias::new("started_at")).timestamp().null())
                    .col(ColumnDef::new(Alias::new("completed_at")).timestamp().null())
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
                            .from(Alias::new("edu_project_stages"), Alias::new("project_id"))
                            .to(Alias::new("edu_student_projects"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_edu_project_stages_project_order")
                    .table(Alias::new("edu_project_stages"))
                    .col(Alias::new("project_id"))
                    .col(Alias::new("stage_order"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("edu_project_stages")).to_owned())
            .await
    }
}
