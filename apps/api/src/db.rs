use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

/// Opens the pool for the job store and reports how many postings it holds.
///
/// An unreachable table is logged rather than fatal: searches degrade to
/// "source unavailable" until the store comes back.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to the job store...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to the job store")?;

    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM job_postings")
        .fetch_one(&pool)
        .await
    {
        Ok(count) => info!("Job store connected: {count} postings"),
        Err(e) => warn!("Job store connected but job_postings is not readable: {e}"),
    }

    Ok(pool)
}
