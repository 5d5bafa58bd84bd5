//! Group Reviews API
//!
//! Main application entry point

use anyhow::Context;
use tracing::info;

use group_reviews::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService},
    server,
    services::AnalyticsService,
    utils::logging,
    AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real deployments set the environment directly
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", group_reviews::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;

    if settings.database.run_migrations {
        info!("Running database migrations...");
        run_migrations(&pool).await?;
    }

    // Initialize services
    let analytics = AnalyticsService::new(&settings)?;
    if !analytics.vk.is_configured() {
        info!("VK token not set, VK analytics will be unavailable");
    }
    if !analytics.telegram.is_configured() {
        info!("Telegram bot token not set, Telegram analytics will be unavailable");
    }

    let state = AppState::new(DatabaseService::new(pool), analytics);

    server::run(&settings, state).await?;

    info!("Server has been shut down.");
    Ok(())
}
