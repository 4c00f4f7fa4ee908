use boardnotify::bootstrap;
use boardnotify::config::Config;
use boardnotify::infrastructure::http::router::build_router;
use boardnotify::infrastructure::observability;
use boardnotify::infrastructure::persistence::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    let _observability = observability::init(&config)?;
    tracing::info!("Configuration loaded");

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    let state = bootstrap::build_app_state(db, &config);
    let app = build_router(state);

    // Start server
    let addr = config.server_address();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
