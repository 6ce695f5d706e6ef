//! Soft scoring for postings that passed every hard rule.
//!
//! score = BASE_SCORE + Σ weight of every bonus whose predicate holds,
//! capped at MAX_SCORE, reported as `score / 100`.

use serde::{Deserialize, Serialize};

use super::markers::{contains_any, strip_punctuation, CERTIFICATE_GENERIC, PARTY_MEMBER};
use super::rules::MatchContext;
use super::tiers::is_party_member;

pub const BASE_SCORE: u32 = 75;
pub const MAX_SCORE: u32 = 99;

/// One additive bonus: a named predicate and the points it adds.
#[derive(Clone, Copy)]
pub struct Bonus {
    pub name: &'static str,
    pub weight: u32,
    pub applies: fn(&MatchContext<'_>) -> bool,
}

/// Bonuses in fold order. The two certificate bonuses are mutually
/// exclusive: the generic one only applies when the specific one does not.
pub fn default_bonuses() -> Vec<Bonus> {
    vec![
        Bonus {
            name: "major_term",
            weight: 10,
            applies: major_term_in_requirement,
        },
        Bonus {
            name: "major_exact",
            weight: 5,
            applies: major_exact_match,
        },
        Bonus {
            name: "fresh_graduate_preference",
            weight: 5,
            applies: fresh_graduate_preference,
        },
        Bonus {
            name: "party_member",
            weight: 5,
            applies: party_member_match,
        },
        Bonus {
            name: "certificate_held",
            weight: 8,
            applies: certificate_held,
        },
        Bonus {
            name: "certificate_mentioned",
            weight: 2,
            applies: |ctx| !certificate_held(ctx) && contains_any(&ctx.text.remarks, CERTIFICATE_GENERIC),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    /// (bonus name, points) for every bonus that applied.
    pub bonuses: Vec<(String, u32)>,
    /// Uncapped total.
    pub raw: u32,
    pub similarity: f64,
}

/// Folds the bonuses over the base score.
pub fn score(ctx: &MatchContext<'_>, bonuses: &[Bonus]) -> u32 {
    bonuses
        .iter()
        .filter(|b| (b.applies)(ctx))
        .fold(BASE_SCORE, |total, b| total + b.weight)
}

pub fn score_breakdown(ctx: &MatchContext<'_>, bonuses: &[Bonus]) -> ScoreBreakdown {
    let applied: Vec<(String, u32)> = bonuses
        .iter()
        .filter(|b| (b.applies)(ctx))
        .map(|b| (b.name.to_string(), b.weight))
        .collect();
    let raw = BASE_SCORE + applied.iter().map(|(_, w)| w).sum::<u32>();

    ScoreBreakdown {
        base: BASE_SCORE,
        bonuses: applied,
        raw,
        similarity: to_similarity(raw),
    }
}

/// Upper clamp only; the base score already keeps the value above zero.
pub fn to_similarity(raw: u32) -> f64 {
    f64::from(raw.min(MAX_SCORE)) / 100.0
}

fn major_term_in_requirement(ctx: &MatchContext<'_>) -> bool {
    let term = strip_punctuation(&ctx.profile.major).to_lowercase();
    !term.is_empty() && ctx.text.major_requirement.contains(&term)
}

fn major_exact_match(ctx: &MatchContext<'_>) -> bool {
    ctx.posting.major_requirement == ctx.profile.major
}

fn fresh_graduate_preference(ctx: &MatchContext<'_>) -> bool {
    ctx.profile.is_fresh_graduate && ctx.mentions_fresh_graduates(&ctx.text.remarks)
}

fn party_member_match(ctx: &MatchContext<'_>) -> bool {
    is_party_member(&ctx.profile.political_status)
        && contains_any(&ctx.text.political_requirement, PARTY_MEMBER)
}

fn certificate_held(ctx: &MatchContext<'_>) -> bool {
    ctx.profile.certificates.iter().any(|c| {
        let label = strip_punctuation(c).to_lowercase();
        !label.is_empty() && ctx.text.remarks.contains(&label)
    })
}
