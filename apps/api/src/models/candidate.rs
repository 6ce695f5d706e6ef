use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// The candidate's self-declared profile. Immutable for the duration of one search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateProfile {
    pub gender: Gender,
    /// Free-text label, mapped onto the degree tier scale (e.g. "本科", "master's").
    pub highest_degree: String,
    pub major: String,
    /// Free-text label such as "群众", "共青团员", "中共党员".
    pub political_status: String,
    #[serde(default)]
    pub is_fresh_graduate: bool,
    #[serde(default)]
    pub grassroots_experience_years: u32,
    #[serde(default)]
    pub has_grassroots_experience: bool,
    #[serde(default)]
    pub certificates: Vec<String>,
}

impl CandidateProfile {
    /// Years of grassroots service that count towards a requirement.
    pub fn effective_grassroots_years(&self) -> u32 {
        if self.has_grassroots_experience {
            self.grassroots_experience_years
        } else {
            0
        }
    }

    /// Case-folded certificate labels.
    pub fn certificates_lower(&self) -> Vec<String> {
        self.certificates.iter().map(|c| c.to_lowercase()).collect()
    }
}
