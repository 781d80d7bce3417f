use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

use crate::Migrator;

const STATUS_COLUMN: usize = 80;

/// Applies every pending migration one step at a time, printing a status line for each.
pub async fn run_all_migrations(url: &str) -> Result<(), DbErr> {
    let db = sea_orm::Database::connect(url).await?;

    println!("Running migrations...");
    let pending = Migrator::get_pending_migrations(&db).await?;
    if pending.is_empty() {
        println!("{}", "Nothing to apply".dimmed());
        return Ok(());
    }

    for migration in pending {
        let label = format!("Applying {}", migration.name().bold());
        let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
        print!("{}{} ", label, dots);
        let _ = io::stdout().flush();

        let start = Instant::now();
        let result = std::panic::AssertUnwindSafe(Migrator::up(&db, Some(1)))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(())) => {
                let time_str = format!("({:.2?})", start.elapsed()).dimmed();
                println!("{} {}", "done".green(), time_str);
            }
            Ok(Err(err)) => {
                println!("{}", "failed".red());
                return Err(err);
            }
            Err(_) => {
                println!("{}", "panicked".red());
                return Err(DbErr::Migration(format!(
                    "migration {} panicked",
                    migration.name()
                )));
            }
        }
    }

    Ok(())
}
