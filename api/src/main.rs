use api::auth::middleware::log_request;
use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn_with_state,
};
use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use util::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = init_logging(&config);

    if config.uses_dev_jwt_secret() {
        if config.is_production() {
            error!("JWT_SECRET is not set; refusing to start in production");
            std::process::exit(1);
        }
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let db = match db::connect(&config.database_url).await {
        Ok(db) => db,
        Err(err) => {
            error!(error = %err, "failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(err) = Migrator::up(&db, None).await {
        error!(error = %err, "failed to run migrations");
        std::process::exit(1);
    }

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!(host = %config.host, port = config.port, error = %err, "invalid listen address");
            std::process::exit(1);
        }
    };
    let project_name = config.project_name.clone();

    let app_state = AppState::new(db, config);

    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", routes(app_state.clone()))
        .layer(from_fn_with_state(app_state, log_request))
        .layer(cors);

    info!("Starting {project_name} on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config.log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("api=info,services=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
