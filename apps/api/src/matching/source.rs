//! Job source: the keyword query that produces the raw posting pool.
//!
//! `AppState` holds an `Arc<dyn JobSource>`; Postgres in production,
//! in-memory in tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::job::JobPosting;

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Postings whose major requirement or title contains `keyword`
    /// (case-insensitive), at most `limit` rows, in a stable order.
    async fn search(&self, keyword: &str, limit: i64) -> Result<Vec<JobPosting>>;
}

pub struct PgJobSource {
    pool: PgPool,
}

impl PgJobSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobSource for PgJobSource {
    async fn search(&self, keyword: &str, limit: i64) -> Result<Vec<JobPosting>> {
        let pattern = like_pattern(keyword);

        Ok(sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT id,
                   COALESCE(job_title, '')          AS job_title,
                   department,
                   location,
                   recruit_count,
                   exam_type,
                   COALESCE(major_requirement, '')  AS major_requirement,
                   COALESCE(degree_requirement, '') AS degree_requirement,
                   political_requirement,
                   COALESCE(remarks, '')            AS remarks
            FROM job_postings
            WHERE major_requirement ILIKE $1 OR job_title ILIKE $1
            ORDER BY created_at DESC, id
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}

/// `%keyword%` with LIKE wildcards in the keyword escaped.
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
