pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job matching
        .route("/api/v1/jobs/match", post(matching::handle_match_jobs))
        .route(
            "/api/v1/jobs/eligibility",
            post(matching::handle_check_eligibility),
        )
        // Assistant
        .route(
            "/api/v1/assistant/policy-chat",
            post(assistant::handle_policy_chat),
        )
        .route(
            "/api/v1/assistant/extract-profile",
            post(assistant::handle_extract_profile),
        )
        .with_state(state)
}
