//! Keyword-tier relevance scoring.
//!
//! Matching is case-insensitive substring containment. Each keyword adds its
//! tier's points once when it occurs anywhere in the text.

use pulse_core::KeywordTiers;
use tracing::debug;

pub const COMPANY_POINTS: u32 = 3;
pub const STOCK_POINTS: u32 = 2;
pub const TARIFF_POINTS: u32 = 2;
pub const PHILIPPINES_POINTS: u32 = 1;

/// Which keyword contexts a piece of text touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextFlags {
    pub has_company: bool,
    pub has_philippines: bool,
    pub has_tariff: bool,
}

impl ContextFlags {
    /// Tariff talk tied either to the Philippines or to a tracked company.
    pub fn is_on_topic(&self) -> bool {
        self.has_tariff && (self.has_philippines || self.has_company)
    }
}

#[derive(Debug, Clone)]
struct Tier {
    keywords: Vec<String>,
    points: u32,
}

impl Tier {
    fn new(keywords: &[String], points: u32) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            points,
        }
    }

    fn score(&self, lowered: &str) -> u32 {
        self.keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .count() as u32
            * self.points
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    companies: Tier,
    stock_terms: Tier,
    tariff_terms: Tier,
    philippines_terms: Tier,
}

impl RelevanceScorer {
    pub fn new(tiers: &KeywordTiers) -> Self {
        Self {
            companies: Tier::new(&tiers.companies, COMPANY_POINTS),
            stock_terms: Tier::new(&tiers.stock_terms, STOCK_POINTS),
            tariff_terms: Tier::new(&tiers.tariff_terms, TARIFF_POINTS),
            philippines_terms: Tier::new(&tiers.philippines_terms, PHILIPPINES_POINTS),
        }
    }

    pub fn score(&self, text: &str) -> u32 {
        let lowered = text.to_lowercase();
        [
            &self.companies,
            &self.stock_terms,
            &self.tariff_terms,
            &self.philippines_terms,
        ]
        .iter()
        .map(|tier| tier.score(&lowered))
        .sum()
    }

    pub fn context(&self, text: &str) -> ContextFlags {
        let lowered = text.to_lowercase();
        ContextFlags {
            has_company: self.companies.matches(&lowered),
            has_philippines: self.philippines_terms.matches(&lowered),
            has_tariff: self.tariff_terms.matches(&lowered),
        }
    }

    /// Gate for search results over `title` and `body`.
    ///
    /// Returns the relevance score when the text is on topic and scores at
    /// least `min_score`, `None` otherwise.
    pub fn admit(&self, title: &str, body: &str, min_score: u32) -> Option<u32> {
        let text = format!("{} {}", title, body);
        if !self.context(&text).is_on_topic() {
            debug!("Rejected off-topic result: {:.60}", title);
            return None;
        }

        let score = self.score(&text);
        if score < min_score {
            debug!("Rejected low relevance ({}) result: {:.60}", score, title);
            return None;
        }
        Some(score)
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(&KeywordTiers::default())
    }
}
