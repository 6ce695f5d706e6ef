//! Search flow: fetch by major keyword → rank with the engine.
//!
//! A failed fetch is not an error here; it yields an empty result and
//! `source_available = false` so the caller can tell "no matches" apart
//! from "store unreachable".

use serde::Serialize;
use tracing::{info, warn};

use super::engine::MatchingEngine;
use super::source::JobSource;
use crate::models::candidate::CandidateProfile;
use crate::models::job::MatchedJobPosting;

#[derive(Debug, Clone, Serialize)]
pub struct JobSearchOutcome {
    pub matches: Vec<MatchedJobPosting>,
    pub total_fetched: usize,
    pub source_available: bool,
}

impl JobSearchOutcome {
    fn empty(source_available: bool) -> Self {
        Self {
            matches: Vec::new(),
            total_fetched: 0,
            source_available,
        }
    }
}

pub async fn search_jobs(
    source: &dyn JobSource,
    engine: &MatchingEngine,
    profile: &CandidateProfile,
    limit: i64,
) -> JobSearchOutcome {
    let keyword = profile.major.trim();
    if keyword.is_empty() {
        return JobSearchOutcome::empty(true);
    }

    let pool = match source.search(keyword, limit).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!("Job source query failed for keyword '{keyword}': {e:#}");
            return JobSearchOutcome::empty(false);
        }
    };

    let matches = engine.rank_eligible_jobs(profile, &pool);
    info!(
        "Job search for '{keyword}': {} fetched, {} eligible",
        pool.len(),
        matches.len()
    );

    JobSearchOutcome {
        total_fetched: pool.len(),
        matches,
        source_available: true,
    }
}
