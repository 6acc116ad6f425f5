//! Facet-Fetch quest ledger API server entry point.

use std::sync::Arc;

use facetfetch_api::bootstrap::deploy_if_needed;
use facetfetch_api::config::AppConfig;
use facetfetch_api::error::AppError;
use facetfetch_api::state::AppState;
use facetfetch_api::{app, telemetry};
use facetfetch_core::clock::SystemClock;
use facetfetch_core::repository::EventRepository;
use facetfetch_event_store::memory_event_repository::InMemoryEventRepository;
use facetfetch_event_store::pg_event_repository::PgEventRepository;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;
    tracing::info!(ledger = %config.ledger_name, "Starting Facet-Fetch API server");

    let result = run(config).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "server stopped with error");
    }

    telemetry::shutdown(tracer_provider);
    result
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    // Select the event store.
    let event_repository: Arc<dyn EventRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;
            sqlx::migrate!("../../migrations").run(&pool).await?;
            tracing::info!("Using PostgreSQL event store");
            Arc::new(PgEventRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; ledger state will not survive a restart");
            Arc::new(InMemoryEventRepository::new())
        }
    };

    // Build application state and deploy the ledger on first start.
    let app_state = AppState::new(&config.ledger_name, Arc::new(SystemClock), event_repository);
    deploy_if_needed(&app_state, &config.deployer, &config.genesis_quests).await?;

    // Start server.
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
