//! Axum route handlers for the assistant API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::prompts::{
    candidate_profile_schema, extract_profile_system, policy_chat_system,
    EXTRACT_PROFILE_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm_client::{ChatTurn, LlmError};
use crate::models::candidate::CandidateProfile;
use crate::state::AppState;

/// Older turns beyond this are dropped before calling the model.
const MAX_HISTORY_TURNS: usize = 20;

#[derive(Debug, Deserialize)]
pub struct PolicyChatRequest {
    pub question: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct PolicyChatResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractProfileRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractProfileResponse {
    pub profile: CandidateProfile,
}

/// POST /api/v1/assistant/policy-chat
pub async fn handle_policy_chat(
    State(state): State<AppState>,
    Json(request): Json<PolicyChatRequest>,
) -> Result<Json<PolicyChatResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let turns = build_turns(request.history, request.question);
    let response = state
        .llm
        .complete_conversation(&turns, &policy_chat_system())
        .await?;
    let answer = response.text().ok_or(LlmError::EmptyContent)?;

    Ok(Json(PolicyChatResponse { answer }))
}

/// POST /api/v1/assistant/extract-profile
///
/// Returns a profile ready to be sent to /api/v1/jobs/match.
pub async fn handle_extract_profile(
    State(state): State<AppState>,
    Json(request): Json<ExtractProfileRequest>,
) -> Result<Json<ExtractProfileResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let prompt = EXTRACT_PROFILE_TEMPLATE.replace("{resume_text}", &request.resume_text);
    let schema = candidate_profile_schema();
    let profile: CandidateProfile = state
        .llm
        .complete_json(&prompt, &extract_profile_system(), Some(&schema))
        .await?;
    info!("Extracted profile: major='{}'", profile.major);

    Ok(Json(ExtractProfileResponse { profile }))
}

/// Keeps the most recent history and appends the new question as a user turn.
fn build_turns(history: Vec<ChatTurn>, question: String) -> Vec<ChatTurn> {
    let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);
    let mut turns: Vec<ChatTurn> = history
        .into_iter()
        .skip(skip)
        .filter(|t| !t.text.trim().is_empty())
        .map(|t| ChatTurn {
            role: match t.role.as_str() {
                "model" | "assistant" => "model",
                _ => "user",
            }
            .to_string(),
            text: t.text,
        })
        .collect();
    turns.push(ChatTurn {
        role: "user".to_string(),
        text: question,
    });
    turns
}
