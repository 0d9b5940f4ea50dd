use anyhow::Context;
use devhub_api::{repo::PgNotesRepo, routes::create_router, services::Feeds, AppState, Config};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to PostgreSQL: {:?}", e);
            e
        })
        .context("connecting to PostgreSQL")?;

    tracing::info!("Connected to PostgreSQL");

    // Initialize database tables
    let notes = PgNotesRepo::new(pool);
    notes
        .init_tables()
        .await
        .context("initializing notes table")?;
    tracing::info!("Notes table initialized");

    // Feed caches start empty and fill on first request
    let feeds = Feeds::from_config(&config).context("building upstream HTTP client")?;
    tracing::info!(
        "Feed cache TTLs: hackathons={}s news={}s contests={}s",
        config.hackathons_cache_ttl,
        config.news_cache_ttl,
        config.contests_cache_ttl
    );

    let addr = config.bind_addr();
    let state = AppState::new(config, feeds, Arc::new(notes));

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
