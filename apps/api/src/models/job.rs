use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One open position as stored in `job_postings`.
///
/// Only the requirement fields, `remarks` and `job_title` are read by the
/// matching engine; everything else is passed through to the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, PartialEq)]
pub struct JobPosting {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub job_title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub recruit_count: Option<i32>,
    pub exam_type: Option<String>,
    #[serde(default)]
    pub major_requirement: String,
    #[serde(default)]
    pub degree_requirement: String,
    pub political_requirement: Option<String>,
    /// Unstructured clause bag: gender limits, cohort limits, certificates, etc.
    #[serde(default)]
    pub remarks: String,
}

impl JobPosting {
    pub fn political_requirement(&self) -> &str {
        self.political_requirement.as_deref().unwrap_or_default()
    }
}

/// A posting that survived every hard rule, annotated with its fit score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchedJobPosting {
    #[serde(flatten)]
    pub posting: JobPosting,
    /// In [0.75, 0.99] for postings produced by the engine.
    pub similarity: f64,
}
