use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::engine::MatchingEngine;
use crate::matching::source::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Rule set and bonuses are built once at startup from `Config`.
    pub engine: Arc<MatchingEngine>,
    /// Job table access. Default: PgJobSource over the shared pool.
    pub job_source: Arc<dyn JobSource>,
}
