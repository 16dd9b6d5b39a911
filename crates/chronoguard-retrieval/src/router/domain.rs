//! Keyword domain detection.

use std::sync::LazyLock;

use regex::Regex;

pub const WORLD_ECONOMY: &str = "world-economy";
pub const ROLES: &str = "roles";
pub const FINANCE: &str = "finance";
pub const GENERIC: &str = "generic";

const WORLD_ECONOMY_KEYWORDS: &[&str] = &[
    "gdp",
    "per capita",
    "historical statistics",
    "maddison",
    "world economy",
    "industrial revolution",
];
const MACRO_TERMS: &[&str] = &["population", "growth", "economy"];
const ROLE_KEYWORDS: &[&str] = &["ceo", "chief executive", "leadership", "chairman", "president of"];
const FINANCE_KEYWORDS: &[&str] = &["revenue", "earnings", "q1", "q2", "q3", "q4", "10-k", "10-q"];

static HISTORIC_YEAR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b1[0-9]{3}\b").ok());

fn mentions(q: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| q.contains(k))
}

/// Coarse domain of a query, used to select the policy profile.
pub fn detect_domain(query: &str) -> &'static str {
    let q = query.to_lowercase();
    if mentions(&q, WORLD_ECONOMY_KEYWORDS) {
        return WORLD_ECONOMY;
    }
    let historic = HISTORIC_YEAR.as_ref().is_some_and(|re| re.is_match(&q));
    if historic && mentions(&q, MACRO_TERMS) {
        return WORLD_ECONOMY;
    }
    if mentions(&q, ROLE_KEYWORDS) {
        return ROLES;
    }
    if mentions(&q, FINANCE_KEYWORDS) {
        return FINANCE;
    }
    GENERIC
}
