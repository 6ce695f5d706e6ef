// Job matching: hard eligibility rules, soft scoring, ranking, and the
// keyword fetch that feeds them. The engine itself performs no I/O.

pub mod engine;
pub mod handlers;
pub mod markers;
pub mod rules;
pub mod scoring;
pub mod search;
pub mod source;
pub mod tiers;
