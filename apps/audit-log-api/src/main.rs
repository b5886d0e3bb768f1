use axum_helpers::server::{create_production_app, create_router};
use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_events::EventSchema;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Cli, Config};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_cli(Cli::parse())?;

    init_tracing(&config.environment);

    let schema = EventSchema::from_file(&config.schema_file)?;
    info!(path = %config.schema_file.display(), "Event schema loaded");

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    // Connect to MongoDB with retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    info!(
        database = config.mongodb.database(),
        collection = config.mongodb.collection(),
        "Connected to MongoDB"
    );

    let state = AppState {
        config,
        mongo_client,
        schema: Arc::new(schema),
    };

    let router = create_router::<openapi::ApiDoc>(api::routes(&state));

    info!("Starting Audit Log API with graceful shutdown (30s timeout)");

    let client = state.mongo_client.clone();
    create_production_app(
        router,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Audit Log API shutdown complete");
    Ok(())
}
