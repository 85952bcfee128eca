use axum_helpers::server::{create_production_app, create_router_with_root, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
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
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(database = ?config.database, "Connecting to PostgreSQL");
    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        Some(config.connect_retry.clone()),
    )
    .await
    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Database migration failed: {}", e))?;
    }

    let state = AppState { config, db };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the database
    let root_routes = health_router(state.config.app).merge(api::ready_router(state.clone()));

    // Docs and middleware wrap both the API and the root routes
    let app = create_router_with_root::<openapi::ApiDoc>(api_routes, root_routes);

    info!("Starting persons API with graceful shutdown (30s timeout)");

    let AppState { config, db } = state;
    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Persons API shutdown complete");
    Ok(())
}
