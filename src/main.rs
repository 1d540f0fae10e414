use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use devconnector_api::app::{app, cors_layer};
use devconnector_api::config;
use devconnector_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use devconnector_api::AppState;

#[derive(Parser)]
#[command(name = "devconnector-api", version, about = "Developer profile API server")]
struct Args {
    /// Port to listen on (defaults to PORT or 5000)
    #[arg(long)]
    port: Option<u16>,

    /// Keep all data in memory instead of PostgreSQL
    #[arg(long, env = "STORAGE_MEMORY")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting DevConnector API in {:?} mode", config.environment);

    let store: Arc<dyn Store> = if args.memory {
        tracing::warn!("Using in-memory storage; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        DatabaseManager::bootstrap(&pool)
            .await
            .context("failed to prepare database schema")?;
        Arc::new(PgStore::new(pool))
    };

    let state = AppState::new(store, &config.security).context("invalid security configuration")?;

    let mut router = app(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config.security));
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("DevConnector API listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
