//! Eligibility & ranking engine.
//!
//! Pure and synchronous: takes an already-fetched pool, drops postings that
//! fail any hard rule, scores the rest and returns them best first. Equal
//! scores keep their pool order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::markers::{cohort_markers, FRESH_GRADUATE};
use super::rules::{default_rules, EligibilityRule, MatchContext, RuleDecision};
use super::scoring::{default_bonuses, score, score_breakdown, to_similarity, Bonus, ScoreBreakdown};
use crate::models::candidate::CandidateProfile;
use crate::models::job::{JobPosting, MatchedJobPosting};

#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Graduating year treated as the current fresh-graduate cohort.
    pub graduation_cohort: u16,
}

/// Per-rule result in an eligibility report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleOutcome {
    pub rule: String,
    #[serde(flatten)]
    pub decision: RuleDecision,
}

/// Full audit of one (profile, posting) pair. Unlike ranking, every rule is
/// evaluated so the caller sees all reasons at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub decisions: Vec<RuleOutcome>,
    /// Present only when every rule passed.
    pub score: Option<ScoreBreakdown>,
}

pub struct MatchingEngine {
    rules: Vec<Box<dyn EligibilityRule>>,
    bonuses: Vec<Bonus>,
    fresh_markers: Vec<String>,
}

impl MatchingEngine {
    pub fn new(config: &MatchingConfig) -> Self {
        Self::with_rules(config, default_rules(), default_bonuses())
    }

    pub fn with_rules(
        config: &MatchingConfig,
        rules: Vec<Box<dyn EligibilityRule>>,
        bonuses: Vec<Bonus>,
    ) -> Self {
        let mut fresh_markers: Vec<String> = FRESH_GRADUATE.iter().map(|m| m.to_string()).collect();
        fresh_markers.extend(cohort_markers(config.graduation_cohort));

        Self {
            rules,
            bonuses,
            fresh_markers,
        }
    }

    /// Filters `pool` down to eligible postings and ranks them by similarity.
    ///
    /// An empty major yields an empty result: nothing meaningful can be
    /// matched without one.
    pub fn rank_eligible_jobs(
        &self,
        profile: &CandidateProfile,
        pool: &[JobPosting],
    ) -> Vec<MatchedJobPosting> {
        if profile.major.trim().is_empty() || pool.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(u32, &JobPosting)> = pool
            .iter()
            .filter_map(|posting| {
                let ctx = MatchContext::new(profile, posting, &self.fresh_markers);
                if let Some((rule, reason)) = self.first_rejection(&ctx) {
                    debug!(posting_id = %posting.id, rule, reason = %reason, "posting rejected");
                    return None;
                }
                Some((score(&ctx, &self.bonuses), posting))
            })
            .collect();

        // `sort_by` is stable, so equal scores keep their fetch order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        info!(
            pool = pool.len(),
            eligible = scored.len(),
            "ranked eligible postings"
        );

        scored
            .into_iter()
            .map(|(raw, posting)| MatchedJobPosting {
                posting: posting.clone(),
                similarity: to_similarity(raw),
            })
            .collect()
    }

    /// Runs every rule against one posting and, when eligible, explains its score.
    pub fn evaluate(&self, profile: &CandidateProfile, posting: &JobPosting) -> EligibilityReport {
        let ctx = MatchContext::new(profile, posting, &self.fresh_markers);

        let decisions: Vec<RuleOutcome> = self
            .rules
            .iter()
            .map(|rule| RuleOutcome {
                rule: rule.name().to_string(),
                decision: rule.check(&ctx),
            })
            .collect();
        let eligible = decisions.iter().all(|d| !d.decision.is_reject());
        let score = eligible.then(|| score_breakdown(&ctx, &self.bonuses));

        EligibilityReport {
            eligible,
            decisions,
            score,
        }
    }

    fn first_rejection(&self, ctx: &MatchContext<'_>) -> Option<(&'static str, String)> {
        self.rules.iter().find_map(|rule| match rule.check(ctx) {
            RuleDecision::Pass => None,
            RuleDecision::Reject { reason } => Some((rule.name(), reason)),
        })
    }
}
