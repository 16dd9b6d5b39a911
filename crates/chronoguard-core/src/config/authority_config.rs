use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::AuthorityTier;

/// Minimum authority score for each ladder tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    pub filing: f64,
    pub regulator: f64,
    pub official_site: f64,
    pub reliable_press: f64,
    pub blog: f64,
    pub unknown: f64,
}

impl AuthorityConfig {
    /// Highest tier whose minimum `score` meets.
    pub fn tier_for(&self, score: f64) -> AuthorityTier {
        [
            (self.filing, AuthorityTier::Filing),
            (self.regulator, AuthorityTier::Regulator),
            (self.official_site, AuthorityTier::OfficialSite),
            (self.reliable_press, AuthorityTier::ReliablePress),
            (self.blog, AuthorityTier::Blog),
            (self.unknown, AuthorityTier::Unknown),
        ]
        .into_iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, tier)| tier)
        .unwrap_or(AuthorityTier::Unknown)
    }
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            filing: defaults::AUTHORITY_FILING,
            regulator: defaults::AUTHORITY_REGULATOR,
            official_site: defaults::AUTHORITY_OFFICIAL_SITE,
            reliable_press: defaults::AUTHORITY_RELIABLE_PRESS,
            blog: defaults::AUTHORITY_BLOG,
            unknown: defaults::AUTHORITY_UNKNOWN,
        }
    }
}
