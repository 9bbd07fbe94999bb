use postdesk::bootstrap;
use postdesk::config::Config;
use postdesk::infrastructure::http::router::build_router;
use postdesk::infrastructure::observability;
use postdesk::infrastructure::persistence::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    let _observability = observability::init(&config)?;
    tracing::info!("Configuration loaded");

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    let state = bootstrap::build_app_state(db, &config);
    let app = build_router(state);

    let addr = config.server_address();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
