// Assistant features backed by the completion oracle: policy Q&A and
// profile extraction. All calls go through llm_client.

pub mod handlers;
pub mod prompts;
