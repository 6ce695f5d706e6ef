//! Axum route handlers for the job matching API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::engine::EligibilityReport;
use crate::matching::search::{search_jobs, JobSearchOutcome};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    pub profile: CandidateProfile,
    pub posting: JobPosting,
}

/// POST /api/v1/jobs/match
///
/// Fetches postings matching the candidate's major and returns the eligible
/// ones ranked by similarity. An empty major returns no matches.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(profile): Json<CandidateProfile>,
) -> Result<Json<JobSearchOutcome>, AppError> {
    let outcome = search_jobs(
        state.job_source.as_ref(),
        &state.engine,
        &profile,
        state.config.job_fetch_limit,
    )
    .await;

    Ok(Json(outcome))
}

/// POST /api/v1/jobs/eligibility
///
/// Explains one posting: every rule's decision and, when eligible, the score breakdown.
pub async fn handle_check_eligibility(
    State(state): State<AppState>,
    Json(request): Json<EligibilityRequest>,
) -> Result<Json<EligibilityReport>, AppError> {
    if request.profile.major.trim().is_empty() {
        return Err(AppError::Validation("profile.major cannot be empty".to_string()));
    }

    Ok(Json(state.engine.evaluate(&request.profile, &request.posting)))
}
