use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010005_create_edu_scripts"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("edu_scripts"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("space_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("owner_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("name")).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Alias::new("name_en"))
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Alias::new("difficulty"))
                            .small_integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(Alias::new("duration"))
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(Alias::new("icon"))
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Alias::new("description"))
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Alias::new("visibility"))
                            .enumeration(
                                Alias::new("script_visibility"),
                                vec![
                                    Alias::new("private"),
                                    Alias::new("team"),
                                    Alias::new("public"),
                                ],
                            )
                            .not_null()
                            .default("team"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("background"))
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Alias::new("objectives")).json().not_null())
                    .col(ColumnDef::new(Alias::new("stages")).json().not_null())
                    .col(ColumnDef::new(Alias::new("bot_ids")).json().not_null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
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
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("edu_scripts")).to_owned())
            .await
    }
}
