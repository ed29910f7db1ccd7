//! Migrate command - applies SQL migrations and exits

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config);

    let url = config
        .database
        .url
        .context("database.url must be set to run migrations")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&url)
        .await
        .context("failed to connect to the database")?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations applied");

    Ok(())
}
