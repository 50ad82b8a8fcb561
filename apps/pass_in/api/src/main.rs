use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::run_migrations;
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before anything fallible, so startup errors get colored reports
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    observability::init_metrics()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus recorder: {}", e))?;

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    }

    let state = AppState { config, db };

    // Domain, metrics, /health and /ready routes, all with state applied
    let api_routes = api::routes(&state);

    // create_router adds docs, tracing, security headers, CORS and the 404 fallback
    let app = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting pass.in API with graceful shutdown (30s timeout)"
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match state.db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("pass.in API shutdown complete");
    Ok(())
}
