//! Hard eligibility rules. Each rule is a pure predicate over
//! `(profile, posting)`; the engine runs them in [`default_rules`] order and
//! drops a posting on the first rejection.
//!
//! The rules only reject on a clearly recognized phrase. Text they cannot
//! interpret is treated as "no constraint".

use serde::{Deserialize, Serialize};

use super::markers::{
    contains_any, contains_any_unshadowed, required_grassroots_years, without_phrases, CET4,
    CET6, COMPUTER_LEVEL2, FEMALE_ONLY, FEMALE_TITLE, FRESH_OR_PRIOR, GENDER_OPEN, GRASSROOTS,
    LEAGUE_MEMBER, LEGAL_QUALIFICATION, MALE_ONLY, MALE_TITLE, NO_RESTRICTION, PARTY_MEMBER,
    POSSESSES,
};
use super::tiers::{is_party_member, DegreeTier, PoliticalTier};
use crate::models::candidate::{CandidateProfile, Gender};
use crate::models::job::JobPosting;

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RuleDecision {
    Pass,
    Reject { reason: String },
}

impl RuleDecision {
    pub fn is_reject(&self) -> bool {
        matches!(self, RuleDecision::Reject { .. })
    }

    fn reject(reason: impl Into<String>) -> Self {
        RuleDecision::Reject {
            reason: reason.into(),
        }
    }
}

/// Case-folded views of the posting text, built once per posting.
#[derive(Debug, Clone)]
pub struct PostingText {
    pub title: String,
    pub remarks: String,
    pub major_requirement: String,
    pub degree_requirement: String,
    pub political_requirement: String,
}

impl PostingText {
    pub fn new(posting: &JobPosting) -> Self {
        Self {
            title: posting.job_title.to_lowercase(),
            remarks: posting.remarks.to_lowercase(),
            major_requirement: posting.major_requirement.to_lowercase(),
            degree_requirement: posting.degree_requirement.to_lowercase(),
            political_requirement: posting.political_requirement().to_lowercase(),
        }
    }

    /// Remarks and title together, for clauses that may appear in either.
    pub fn remarks_and_title(&self) -> String {
        format!("{} {}", self.remarks, self.title)
    }
}

/// Everything a rule or bonus may look at for one (profile, posting) pair.
pub struct MatchContext<'a> {
    pub profile: &'a CandidateProfile,
    pub posting: &'a JobPosting,
    pub text: PostingText,
    /// Fresh-graduate phrases including the current cohort's year tokens.
    pub fresh_markers: &'a [String],
}

impl<'a> MatchContext<'a> {
    pub fn new(
        profile: &'a CandidateProfile,
        posting: &'a JobPosting,
        fresh_markers: &'a [String],
    ) -> Self {
        Self {
            profile,
            posting,
            text: PostingText::new(posting),
            fresh_markers,
        }
    }

    /// True when `text` names fresh graduates outside a "fresh or prior" clause.
    pub fn mentions_fresh_graduates(&self, text: &str) -> bool {
        let text = without_phrases(text, FRESH_OR_PRIOR);
        self.fresh_markers.iter().any(|m| text.contains(m.as_str()))
    }
}

pub trait EligibilityRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, ctx: &MatchContext<'_>) -> RuleDecision;
}

/// The production rule set, in evaluation order.
pub fn default_rules() -> Vec<Box<dyn EligibilityRule>> {
    vec![
        Box::new(GenderRule),
        Box::new(FreshGraduateRule),
        Box::new(PoliticalStatusRule),
        Box::new(DegreeRule),
        Box::new(GrassrootsExperienceRule),
        Box::new(CertificateRule),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Gender
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct GenderRule;

impl EligibilityRule for GenderRule {
    fn name(&self) -> &'static str {
        "gender"
    }

    fn check(&self, ctx: &MatchContext<'_>) -> RuleDecision {
        let text = ctx.text.remarks_and_title();
        let title = &ctx.text.title;

        // Open clauses such as "不限男女" contain the restriction markers, and
        // "male only" is a substring of "female only"; both are blanked first.
        match ctx.profile.gender {
            Gender::Male => {
                if contains_any_unshadowed(&text, FEMALE_ONLY, &[GENDER_OPEN])
                    || contains_any(title, FEMALE_TITLE)
                {
                    return RuleDecision::reject("position is restricted to women");
                }
            }
            Gender::Female => {
                if contains_any_unshadowed(&text, MALE_ONLY, &[GENDER_OPEN, FEMALE_ONLY])
                    || contains_any_unshadowed(title, MALE_TITLE, &[FEMALE_TITLE])
                {
                    return RuleDecision::reject("position is restricted to men");
                }
            }
        }
        RuleDecision::Pass
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fresh graduate
// ────────────────────────────────────────────────────────────────────────────

/// Fresh graduates may apply anywhere; everyone else is kept out of
/// cohort-restricted postings.
#[derive(Debug, Clone, Copy)]
pub struct FreshGraduateRule;

impl EligibilityRule for FreshGraduateRule {
    fn name(&self) -> &'static str {
        "fresh_graduate"
    }

    fn check(&self, ctx: &MatchContext<'_>) -> RuleDecision {
        if ctx.profile.is_fresh_graduate {
            return RuleDecision::Pass;
        }
        if ctx.mentions_fresh_graduates(&ctx.text.remarks_and_title()) {
            return RuleDecision::reject("position is reserved for fresh graduates");
        }
        RuleDecision::Pass
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Political status
// ────────────────────────────────────────────────────────────────────────────

/// Checks exactly two thresholds: party membership, and league membership
/// against the bottom tier. No general tier distance is applied.
#[derive(Debug, Clone, Copy)]
pub struct PoliticalStatusRule;

impl EligibilityRule for PoliticalStatusRule {
    fn name(&self) -> &'static str {
        "political_status"
    }

    fn check(&self, ctx: &MatchContext<'_>) -> RuleDecision {
        let requirement = &ctx.text.political_requirement;
        let status = &ctx.profile.political_status;

        if contains_any(requirement, PARTY_MEMBER) && !is_party_member(status) {
            return RuleDecision::reject(format!(
                "requires party membership, candidate is '{status}'"
            ));
        }
        if contains_any(requirement, LEAGUE_MEMBER)
            && PoliticalTier::parse(status) == Some(PoliticalTier::Masses)
        {
            return RuleDecision::reject("requires league membership, candidate is masses");
        }
        RuleDecision::Pass
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Degree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct DegreeRule;

impl EligibilityRule for DegreeRule {
    fn name(&self) -> &'static str {
        "degree"
    }

    fn check(&self, ctx: &MatchContext<'_>) -> RuleDecision {
        // Unrecognized requirement text means no minimum.
        let Some(required) = DegreeTier::parse(&ctx.text.degree_requirement) else {
            return RuleDecision::Pass;
        };
        let held = DegreeTier::parse(&ctx.profile.highest_degree).unwrap_or(DegreeTier::Associate);

        if held < required {
            RuleDecision::reject(format!("requires {required:?}, candidate holds {held:?}"))
        } else {
            RuleDecision::Pass
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Grassroots experience
// ────────────────────────────────────────────────────────────────────────────

/// Numeric form: "<N> years ... grassroots" must be met by effective years.
/// Fallback form: remarks contain both "具有"/"possess" and a grassroots
/// keyword, with no "不限"/"no restriction" anywhere, and the candidate has
/// no grassroots experience. The fallback is a phrase heuristic and can
/// misfire on postings that merely describe the job.
#[derive(Debug, Clone, Copy)]
pub struct GrassrootsExperienceRule;

impl EligibilityRule for GrassrootsExperienceRule {
    fn name(&self) -> &'static str {
        "grassroots_experience"
    }

    fn check(&self, ctx: &MatchContext<'_>) -> RuleDecision {
        let remarks = &ctx.text.remarks;
        let held = ctx.profile.effective_grassroots_years();

        if let Some(required) = required_grassroots_years(remarks) {
            if held < required {
                return RuleDecision::reject(format!(
                    "requires {required} years of grassroots experience, candidate has {held}"
                ));
            }
            return RuleDecision::Pass;
        }

        let requires_experience = contains_any(remarks, POSSESSES)
            && contains_any(remarks, GRASSROOTS)
            && !contains_any(remarks, NO_RESTRICTION);
        if requires_experience && !ctx.profile.has_grassroots_experience {
            return RuleDecision::reject("requires grassroots experience");
        }
        RuleDecision::Pass
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Certificates
// ────────────────────────────────────────────────────────────────────────────

/// Four independent credential checks; the first unmet one is reported.
#[derive(Debug, Clone, Copy)]
pub struct CertificateRule;

impl EligibilityRule for CertificateRule {
    fn name(&self) -> &'static str {
        "certificates"
    }

    fn check(&self, ctx: &MatchContext<'_>) -> RuleDecision {
        let remarks = &ctx.text.remarks;
        let held = ctx.profile.certificates_lower();
        let holds = |markers: &[&str]| held.iter().any(|c| contains_any(c, markers));

        let requirements: [(&[&str], bool, &str); 4] = [
            (CET4, holds(CET4) || holds(CET6), "CET-4"),
            (CET6, holds(CET6), "CET-6"),
            (COMPUTER_LEVEL2, holds(COMPUTER_LEVEL2), "computer level-2"),
            (
                LEGAL_QUALIFICATION,
                holds(LEGAL_QUALIFICATION),
                "legal professional qualification",
            ),
        ];

        for (markers, satisfied, label) in requirements {
            if contains_any(remarks, markers) && !satisfied {
                return RuleDecision::reject(format!("requires {label} certificate"));
            }
        }
        RuleDecision::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            gender: Gender::Male,
            highest_degree: "本科".to_string(),
            major: "计算机科学与技术".to_string(),
            political_status: "群众".to_string(),
            is_fresh_graduate: false,
            grassroots_experience_years: 0,
            has_grassroots_experience: false,
            certificates: vec![],
        }
    }

    fn posting(remarks: &str) -> JobPosting {
        JobPosting {
            job_title: "综合管理岗".to_string(),
            major_requirement: "计算机类".to_string(),
            degree_requirement: "本科及以上".to_string(),
            remarks: remarks.to_string(),
            ..JobPosting::default()
        }
    }

    fn check(
        rule: &dyn EligibilityRule,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> RuleDecision {
        let markers = vec!["应届".to_string(), "2026届".to_string()];
        rule.check(&MatchContext::new(profile, posting, &markers))
    }

    #[test]
    fn test_gender_rule_rejects_male_for_female_only() {
        assert!(check(&GenderRule, &profile(), &posting("限女性")).is_reject());
        assert!(check(&GenderRule, &profile(), &posting("Female only")).is_reject());
    }

    #[test]
    fn test_gender_rule_reads_title_marker() {
        let mut job = posting("");
        job.job_title = "Inspector (Women's Position)".to_string();
        assert!(check(&GenderRule, &profile(), &job).is_reject());

        let mut female = profile();
        female.gender = Gender::Female;
        assert_eq!(check(&GenderRule, &female, &job), RuleDecision::Pass);
    }

    #[test]
    fn test_gender_rule_cross_cases_pass() {
        assert_eq!(check(&GenderRule, &profile(), &posting("限男性")), RuleDecision::Pass);

        let mut female = profile();
        female.gender = Gender::Female;
        assert_eq!(check(&GenderRule, &female, &posting("female only")), RuleDecision::Pass);
        assert_eq!(check(&GenderRule, &female, &posting("women only")), RuleDecision::Pass);
        assert!(check(&GenderRule, &female, &posting("male only")).is_reject());
        assert!(check(&GenderRule, &female, &posting("适合男性")).is_reject());
    }

    #[test]
    fn test_fresh_graduate_rule() {
        let job = posting("限2026届高校毕业生报考");
        assert!(check(&FreshGraduateRule, &profile(), &job).is_reject());

        let mut fresh = profile();
        fresh.is_fresh_graduate = true;
        assert_eq!(check(&FreshGraduateRule, &fresh, &job), RuleDecision::Pass);
        assert_eq!(check(&FreshGraduateRule, &fresh, &posting("")), RuleDecision::Pass);
    }

    #[test]
    fn test_gender_rule_open_clause_passes_both_genders() {
        let mut female = profile();
        female.gender = Gender::Female;
        for remarks in ["不限男女", "男女不限", "性别不限，专业不限"] {
            let job = posting(remarks);
            assert_eq!(check(&GenderRule, &profile(), &job), RuleDecision::Pass, "{remarks}");
            assert_eq!(check(&GenderRule, &female, &job), RuleDecision::Pass, "{remarks}");
        }
    }

    #[test]
    fn test_fresh_graduate_rule_both_tracks_clause_is_open() {
        for remarks in ["应届往届均可", "应届、往届均可", "不限应届毕业生"] {
            assert_eq!(
                check(&FreshGraduateRule, &profile(), &posting(remarks)),
                RuleDecision::Pass,
                "{remarks}"
            );
        }
        assert!(check(&FreshGraduateRule, &profile(), &posting("限应届毕业生")).is_reject());
    }

    #[test]
    fn test_fresh_graduate_marker_in_title() {
        let mut job = posting("");
        job.job_title = "应届生岗位".to_string();
        assert!(check(&FreshGraduateRule, &profile(), &job).is_reject());
    }

    #[test]
    fn test_political_rule_party_requirement() {
        let mut job = posting("");
        job.political_requirement = Some("中共党员".to_string());
        assert!(check(&PoliticalStatusRule, &profile(), &job).is_reject());

        let mut league = profile();
        league.political_status = "共青团员".to_string();
        assert!(check(&PoliticalStatusRule, &league, &job).is_reject());

        let mut probationary = profile();
        probationary.political_status = "中共预备党员".to_string();
        assert_eq!(check(&PoliticalStatusRule, &probationary, &job), RuleDecision::Pass);
    }

    #[test]
    fn test_political_rule_league_requirement_only_blocks_masses() {
        let mut job = posting("");
        job.political_requirement = Some("共青团员".to_string());
        assert!(check(&PoliticalStatusRule, &profile(), &job).is_reject());

        // Unrecognized status is not the bottom tier, so it passes.
        let mut other = profile();
        other.political_status = "无党派人士".to_string();
        assert_eq!(check(&PoliticalStatusRule, &other, &job), RuleDecision::Pass);
    }

    #[test]
    fn test_political_rule_no_requirement() {
        assert_eq!(check(&PoliticalStatusRule, &profile(), &posting("")), RuleDecision::Pass);
    }

    #[test]
    fn test_degree_rule_hierarchy() {
        let mut job = posting("");
        job.degree_requirement = "硕士研究生及以上".to_string();
        assert!(check(&DegreeRule, &profile(), &job).is_reject());

        let mut master = profile();
        master.highest_degree = "硕士".to_string();
        assert_eq!(check(&DegreeRule, &master, &job), RuleDecision::Pass);

        job.degree_requirement = "大专及以上".to_string();
        assert_eq!(check(&DegreeRule, &profile(), &job), RuleDecision::Pass);
    }

    #[test]
    fn test_degree_rule_unparsed_requirement_is_open() {
        let mut job = posting("");
        job.degree_requirement = "学历不限".to_string();
        let mut unknown = profile();
        unknown.highest_degree = "高中".to_string();
        assert_eq!(check(&DegreeRule, &unknown, &job), RuleDecision::Pass);
    }

    #[test]
    fn test_grassroots_numeric_requirement() {
        let job = posting("具有2年以上基层工作经历");
        assert!(check(&GrassrootsExperienceRule, &profile(), &job).is_reject());

        let mut veteran = profile();
        veteran.has_grassroots_experience = true;
        veteran.grassroots_experience_years = 2;
        assert_eq!(check(&GrassrootsExperienceRule, &veteran, &job), RuleDecision::Pass);

        veteran.grassroots_experience_years = 1;
        assert!(check(&GrassrootsExperienceRule, &veteran, &job).is_reject());
    }

    #[test]
    fn test_grassroots_years_ignored_without_flag() {
        let mut candidate = profile();
        candidate.grassroots_experience_years = 5;
        let job = posting("3年以上基层工作经历");
        assert!(check(&GrassrootsExperienceRule, &candidate, &job).is_reject());
    }

    #[test]
    fn test_grassroots_phrase_fallback() {
        let job = posting("具有两年以上基层工作经历");
        assert!(check(&GrassrootsExperienceRule, &profile(), &job).is_reject());

        let mut experienced = profile();
        experienced.has_grassroots_experience = true;
        assert_eq!(check(&GrassrootsExperienceRule, &experienced, &job), RuleDecision::Pass);

        let open = posting("具有基层工作经历者优先，专业不限");
        assert_eq!(check(&GrassrootsExperienceRule, &profile(), &open), RuleDecision::Pass);
    }

    #[test]
    fn test_certificate_cet4_accepts_cet6() {
        let job = posting("须取得大学英语四级证书");
        assert!(check(&CertificateRule, &profile(), &job).is_reject());

        let mut holder = profile();
        holder.certificates = vec!["CET-6".to_string()];
        assert_eq!(check(&CertificateRule, &holder, &job), RuleDecision::Pass);
    }

    #[test]
    fn test_certificate_cet6_requires_cet6() {
        let job = posting("要求英语六级");
        let mut holder = profile();
        holder.certificates = vec!["英语四级".to_string()];
        assert!(check(&CertificateRule, &holder, &job).is_reject());
    }

    #[test]
    fn test_certificate_checks_are_independent() {
        let job = posting("计算机二级；法律职业资格证书（A证）");
        let mut holder = profile();
        holder.certificates = vec!["计算机二级".to_string()];
        let decision = check(&CertificateRule, &holder, &job);
        assert!(matches!(decision, RuleDecision::Reject { reason } if reason.contains("legal")));

        holder.certificates.push("法律职业资格A证".to_string());
        assert_eq!(check(&CertificateRule, &holder, &job), RuleDecision::Pass);
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<_> = default_rules().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "gender",
                "fresh_graduate",
                "political_status",
                "degree",
                "grassroots_experience",
                "certificates"
            ]
        );
    }
}
