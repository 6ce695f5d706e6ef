//! Keyword tables for the free-text eligibility clauses found in postings.
//!
//! All entries are lowercase; callers case-fold the text before matching.
//! Postings are written mostly in Chinese, the English variants cover
//! translated and hand-entered records.

use std::sync::LazyLock;

use regex::Regex;

pub const FEMALE_ONLY: &[&str] = &[
    "限女",
    "只招女",
    "适合女性",
    "female only",
    "female-only",
    "women only",
    "restricted to women",
    "suited for women",
    "suitable for women",
];

pub const MALE_ONLY: &[&str] = &[
    "限男",
    "只招男",
    "适合男性",
    "male only",
    "male-only",
    "men only",
    "restricted to men",
    "suited for men",
    "suitable for men",
];

pub const FEMALE_TITLE: &[&str] = &["（女）", "(女)", "女性岗位", "women's position", "female position"];

pub const MALE_TITLE: &[&str] = &["（男）", "(男)", "男性岗位", "men's position", "male position"];

/// Clauses that open a posting to both genders. "不限男女" contains "限男",
/// so these are blanked before either gender's markers are searched.
pub const GENDER_OPEN: &[&str] = &[
    "不限男女",
    "男女不限",
    "不限性别",
    "性别不限",
    "男女均可",
    "男女皆可",
    "no gender restriction",
    "open to both genders",
];

/// Cohort-independent fresh-graduate phrasing. Year tokens come from [`cohort_markers`].
pub const FRESH_GRADUATE: &[&str] = &["应届", "fresh graduate", "fresh-graduate", "new graduate"];

/// Clauses that admit fresh and prior graduates alike. They mention "应届"
/// without restricting to it, so they are blanked before the fresh-graduate search.
pub const FRESH_OR_PRIOR: &[&str] = &[
    "不限应届",
    "应届、往届",
    "应届往届",
    "应届或往届",
    "应届及往届",
    "应届和往届",
    "往届、应届",
    "往届应届",
    "往届或应届",
    "往届及应届",
    "fresh or previous graduates",
    "fresh and previous graduates",
    "not limited to fresh graduates",
];

pub const PARTY_MEMBER: &[&str] = &["党员", "party member"];

pub const LEAGUE_MEMBER: &[&str] = &["团员", "league member"];

/// Candidate statuses that sit on the bottom political tier. Compared for equality.
pub const MASSES: &[&str] = &["群众", "masses", "general public"];

pub const PROBATIONARY: &[&str] = &["预备党员", "probationary"];

pub const DOCTORATE: &[&str] = &["博士", "doctor", "phd", "ph.d"];
pub const MASTER: &[&str] = &["硕士", "研究生", "master", "postgraduate"];
pub const BACHELOR: &[&str] = &["本科", "学士", "bachelor", "undergraduate"];
pub const ASSOCIATE: &[&str] = &["大专", "专科", "associate", "junior college"];

pub const GRASSROOTS: &[&str] = &["基层", "grassroots"];
pub const POSSESSES: &[&str] = &["具有", "possess"];
pub const NO_RESTRICTION: &[&str] = &["不限", "no restriction"];

pub const CET4: &[&str] = &["四级", "cet-4", "cet4", "cet 4", "level-4 english", "english level 4"];
pub const CET6: &[&str] = &["六级", "cet-6", "cet6", "cet 6", "level-6 english", "english level 6"];
pub const COMPUTER_LEVEL2: &[&str] = &[
    "计算机二级",
    "computer level-2",
    "computer level 2",
    "ncre level 2",
];
pub const LEGAL_QUALIFICATION: &[&str] = &[
    "法律职业资格",
    "司法考试",
    "a证",
    "bar exam",
    "legal professional qualification",
];

/// Generic credential wording in remarks.
pub const CERTIFICATE_GENERIC: &[&str] = &["证书", "资格", "certificate", "qualification"];

/// "<N> 年 ... 基层" / "<N> years ... grassroots". Two digits at most so
/// graduation years such as "2025年" are never read as a service count.
static GRASSROOTS_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\D)(\d{1,2})\s*\+?\s*(?:年|years?)[^。；;.]*?(?:基层|grassroots)")
        .expect("grassroots pattern is valid")
});

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{P}+").expect("punctuation pattern is valid"));

pub fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

/// Replaces every occurrence of `phrases` with a space.
pub fn without_phrases(text: &str, phrases: &[&str]) -> String {
    phrases
        .iter()
        .fold(text.to_string(), |cleaned, phrase| cleaned.replace(phrase, " "))
}

/// Like [`contains_any`], but ignores occurrences that are part of a
/// `shadowing` phrase ("male only" inside "female only", "限男" inside "不限男女").
/// Shadowing tables are blanked in order.
pub fn contains_any_unshadowed(text: &str, markers: &[&str], shadowing: &[&[&str]]) -> bool {
    let cleaned = shadowing
        .iter()
        .fold(text.to_string(), |cleaned, phrases| without_phrases(&cleaned, phrases));
    contains_any(&cleaned, markers)
}

/// Year tokens that mark a posting as reserved for the given graduating cohort.
pub fn cohort_markers(cohort: u16) -> Vec<String> {
    vec![
        format!("{cohort}届"),
        format!("{cohort}年毕业"),
        format!("{cohort} graduates"),
        format!("class of {cohort}"),
    ]
}

/// Required years of grassroots service, if remarks state a number.
pub fn required_grassroots_years(remarks: &str) -> Option<u32> {
    GRASSROOTS_YEARS
        .captures(remarks)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Removes punctuation and trims; inner whitespace is kept.
pub fn strip_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, "").trim().to_string()
}
