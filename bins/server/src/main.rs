//! Outlay API Server
//!
//! Main entry point for the Outlay backend service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outlay_api::{AppState, create_router};
use outlay_core::recurring::{DailySchedule, spawn_daily};
use outlay_db::connect_with_pool;
use outlay_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outlay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    // Create application state
    let state = AppState::new(db);

    // Start the daily recurring expense pass
    if config.scheduler.enabled {
        let schedule = DailySchedule::new(config.scheduler.run_at_time()?);
        spawn_daily(state.processor.clone(), schedule);
        info!(run_at = %schedule.run_at(), "Recurring expense scheduler enabled");
    } else {
        info!("Recurring expense scheduler disabled");
    }

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
