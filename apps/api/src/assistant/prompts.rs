use serde_json::{json, Value};

use crate::llm_client::prompts::{EXAM_DOMAIN_SCOPE, JSON_ONLY_SYSTEM};

/// System prompt for the policy chat.
pub fn policy_chat_system() -> String {
    format!(
        "{EXAM_DOMAIN_SCOPE} Answer questions about application rules, eligibility \
        and exam procedures concisely."
    )
}

/// System prompt for extracting a candidate profile from resume text.
pub fn extract_profile_system() -> String {
    format!(
        "{EXAM_DOMAIN_SCOPE} Extract the candidate's application profile from the text. \
        {JSON_ONLY_SYSTEM}"
    )
}

/// Profile extraction prompt template. Replace `{resume_text}` before sending.
pub const EXTRACT_PROFILE_TEMPLATE: &str = "Extract gender, highest degree, major, \
    political status, whether the candidate graduates this year, grassroots work \
    experience (years) and certificates from the following text. Use the original \
    Chinese labels where present.\n\n{resume_text}";

/// Response shape for profile extraction; mirrors `CandidateProfile`.
pub fn candidate_profile_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "gender": {"type": "STRING", "enum": ["male", "female"]},
            "highest_degree": {"type": "STRING"},
            "major": {"type": "STRING"},
            "political_status": {"type": "STRING"},
            "is_fresh_graduate": {"type": "BOOLEAN"},
            "grassroots_experience_years": {"type": "INTEGER"},
            "has_grassroots_experience": {"type": "BOOLEAN"},
            "certificates": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["gender", "highest_degree", "major", "political_status"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateProfile;

    #[test]
    fn test_schema_properties_cover_profile_fields() {
        let schema = candidate_profile_schema();
        let sample = CandidateProfile {
            gender: crate::models::candidate::Gender::Male,
            highest_degree: String::new(),
            major: String::new(),
            political_status: String::new(),
            is_fresh_graduate: false,
            grassroots_experience_years: 0,
            has_grassroots_experience: false,
            certificates: vec![],
        };
        let fields = serde_json::to_value(&sample).unwrap();
        for key in fields.as_object().unwrap().keys() {
            assert!(schema["properties"].get(key).is_some(), "schema missing {key}");
        }
    }

    #[test]
    fn test_extract_template_has_placeholder() {
        assert!(EXTRACT_PROFILE_TEMPLATE.contains("{resume_text}"));
        assert!(extract_profile_system().contains("JSON"));
    }
}
