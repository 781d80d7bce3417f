use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010008_create_edu_evaluations"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("edu_evaluations"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("project_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).big_integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("evaluation_type"))
                            .enumeration(
                                Alias::new("evaluation_type"),
                                vec![Alias::new("ai"), Alias::new("teacher")],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("evaluator_id")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("dimension_scores")).json().not_null())
                    .col(ColumnDef::new(Alias::new("total_score")).double().not_null())
                    .col(
                        ColumnDef::new(Alias::new("max_score"))
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(ColumnDef::new(Alias::new("feedback")).text().null())
                    .col(ColumnDef::new(Alias::new("strengths")).json().not_null())
                    .col(ColumnDef::new(Alias::new("improvements")).json().not_null())
                    .col(
                        ColumnDef::new(Alias::new("evaluated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("edu_evaluations"), Alias::new("project_id"))
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
                    .name("idx_edu_evaluations_project")
                    .table(Alias::new("edu_evaluations"))
                    .col(Alias::new("project_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("edu_evaluations")).to_owned())
            .await
    }
}
