use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use panda_api::config::AppConfig;
use panda_api::database::DatabaseManager;
use panda_api::{app, AppState};

/// Panda Market REST API server
#[derive(Debug, Parser)]
#[command(name = "panda-api", version, about)]
struct Cli {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Apply database migrations before serving
    #[arg(long, env = "RUN_MIGRATIONS")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("panda_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::info!("Starting Panda API in {:?} mode", config.environment);

    let pool = if cli.migrate {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to the database")?;
        DatabaseManager::migrate(&pool).await.context("failed to apply migrations")?;
        pool
    } else {
        let pool = DatabaseManager::connect_lazy(&config.database).context("invalid database configuration")?;
        if let Err(e) = DatabaseManager::health_check(&pool).await {
            tracing::warn!("Database not reachable yet: {}", e);
        }
        pool
    };

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; login will fail until it is configured");
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Panda API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(config, pool)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
