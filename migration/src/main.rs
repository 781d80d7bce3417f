use migration::Migrator;
use std::{env, fs, path::Path};
use util::config::AppConfig;

mod runner;

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let url = config.database_url.clone();
    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&url);
            Ok(())
        }
        Some("fresh") => {
            remove_db_file(&url);
            create_db_dir(&url);
            runner::run_all_migrations(&url).await
        }
        _ => {
            create_db_dir(&url);
            runner::run_all_migrations(&url).await
        }
    };

    if let Err(err) = result {
        eprintln!("Migration failed: {err}");
        std::process::exit(1);
    }
}

/// Extracts the on-disk file for a `sqlite://` URL, ignoring query options.
///
/// Returns `None` for in-memory databases and non-sqlite backends.
fn sqlite_file(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.contains(":memory:") {
        None
    } else {
        Some(path)
    }
}

fn remove_db_file(url: &str) {
    let Some(path) = sqlite_file(url) else {
        println!("Nothing to delete for {url}");
        return;
    };

    let db_path = Path::new(path);
    if db_path.exists() {
        match fs::remove_file(db_path) {
            Ok(()) => println!("Deleted DB: {}", db_path.display()),
            Err(err) => eprintln!("Failed to delete {}: {err}", db_path.display()),
        }
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn create_db_dir(url: &str) {
    if let Some(parent) = sqlite_file(url).and_then(|p| Path::new(p).parent()) {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Failed to create DB directory {}: {err}", parent.display());
        }
    }
}
