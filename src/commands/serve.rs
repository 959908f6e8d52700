//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{cors_layer, create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::db::seed;
use crate::infra::{Database, Persistence};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Applies pending migrations
    let db = Arc::new(Database::connect(&config).await?);
    tracing::info!("Database connected");

    let persistence = Persistence::new(db.get_connection());
    seed::ensure_admin(&persistence, &config.admin).await?;

    let mut config = config;
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    let addr = config.server_addr();
    let cors = cors_layer(&config.cors_origin);
    let app = create_router(AppState::from_config(db, config)).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
