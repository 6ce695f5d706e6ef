use serde::{Deserialize, Serialize};

use super::markers::{
    contains_any, ASSOCIATE, BACHELOR, DOCTORATE, LEAGUE_MEMBER, MASSES, MASTER, PARTY_MEMBER,
    PROBATIONARY,
};

/// Ordered education level. Derives `Ord` so tiers compare directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeTier {
    Associate = 0,
    Bachelor = 1,
    Master = 2,
    Doctorate = 3,
}

impl DegreeTier {
    /// Maps free text onto a tier, checking the highest tier first so that
    /// "本科及以上" resolves to bachelor. `None` when no keyword matches.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        [
            (DegreeTier::Doctorate, DOCTORATE),
            (DegreeTier::Master, MASTER),
            (DegreeTier::Bachelor, BACHELOR),
            (DegreeTier::Associate, ASSOCIATE),
        ]
        .into_iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(tier, _)| tier)
    }
}

/// Political affiliation, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticalTier {
    Masses = 0,
    LeagueMember = 1,
    ProbationaryPartyMember = 2,
    PartyMember = 3,
}

impl PoliticalTier {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();
        if contains_any(&text, PROBATIONARY) {
            Some(PoliticalTier::ProbationaryPartyMember)
        } else if contains_any(&text, PARTY_MEMBER) {
            Some(PoliticalTier::PartyMember)
        } else if contains_any(&text, LEAGUE_MEMBER) {
            Some(PoliticalTier::LeagueMember)
        } else if is_masses(&text) {
            Some(PoliticalTier::Masses)
        } else {
            None
        }
    }
}

/// Any party-member variant, probationary included.
pub fn is_party_member(status: &str) -> bool {
    contains_any(&status.to_lowercase(), PARTY_MEMBER)
}

/// Exact (trimmed, case-folded) match against the bottom-tier labels.
pub fn is_masses(status: &str) -> bool {
    let status = status.trim().to_lowercase();
    MASSES.iter().any(|m| status == *m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_first_match_wins_from_top() {
        assert_eq!(DegreeTier::parse("本科及以上"), Some(DegreeTier::Bachelor));
        assert_eq!(DegreeTier::parse("bachelor's and above"), Some(DegreeTier::Bachelor));
        assert_eq!(DegreeTier::parse("硕士研究生及以上"), Some(DegreeTier::Master));
        assert_eq!(DegreeTier::parse("PhD"), Some(DegreeTier::Doctorate));
        assert_eq!(DegreeTier::parse("大专及以上"), Some(DegreeTier::Associate));
    }

    #[test]
    fn test_degree_unrecognized_is_none() {
        assert_eq!(DegreeTier::parse(""), None);
        assert_eq!(DegreeTier::parse("学历不限"), None);
    }

    #[test]
    fn test_degree_tiers_are_ordered() {
        assert!(DegreeTier::Associate < DegreeTier::Bachelor);
        assert!(DegreeTier::Master < DegreeTier::Doctorate);
    }

    #[test]
    fn test_political_parse() {
        assert_eq!(PoliticalTier::parse("中共党员"), Some(PoliticalTier::PartyMember));
        assert_eq!(
            PoliticalTier::parse("中共预备党员"),
            Some(PoliticalTier::ProbationaryPartyMember)
        );
        assert_eq!(PoliticalTier::parse("共青团员"), Some(PoliticalTier::LeagueMember));
        assert_eq!(PoliticalTier::parse(" 群众 "), Some(PoliticalTier::Masses));
        assert_eq!(PoliticalTier::parse("无党派人士"), None);
    }

    #[test]
    fn test_party_member_includes_probationary() {
        assert!(is_party_member("中共预备党员"));
        assert!(is_party_member("Probationary Party Member"));
        assert!(!is_party_member("共青团员"));
    }

    #[test]
    fn test_masses_is_exact() {
        assert!(is_masses("Masses"));
        assert!(!is_masses("群众（曾为团员）"));
    }
}
