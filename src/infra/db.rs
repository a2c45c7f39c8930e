use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::infra::config::DatabaseConfig;

pub async fn init_db(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections as u32)
        .connect(config.url.as_str())
        .await?;
    info!("Connected to database!");
    Ok(pool)
}
