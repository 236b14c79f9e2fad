use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "TARIFF_PULSE_CONFIG";
/// File picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "tariff-pulse.toml";

const MAX_COMMENT_DEPTH_LIMIT: u32 = 64;

const DEFAULT_THREAD_URL: &str =
    "https://www.reddit.com/r/Philippines/comments/1lvofdb/trump_imposes_20_tariff_for_rate_for_philippines/";

/// Keyword lists scored at different weights by the relevance scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTiers {
    /// Company names and tickers, 3 points each.
    pub companies: Vec<String>,
    /// Financial and stock terms, 2 points each.
    pub stock_terms: Vec<String>,
    /// Tariff and trade terms, 2 points each.
    pub tariff_terms: Vec<String>,
    /// Geographic and demographic terms, 1 point each.
    pub philippines_terms: Vec<String>,
}

impl Default for KeywordTiers {
    fn default() -> Self {
        Self {
            companies: strings(&[
                "JFC",
                "URC",
                "CNPF",
                "GSMI",
                "MONDE",
                "jollibee",
                "universal robina",
                "century pacific",
                "ginebra san miguel",
                "monde nissin",
            ]),
            stock_terms: strings(&[
                "stock",
                "shares",
                "PSE",
                "PSEI",
                "price",
                "trading",
                "market cap",
                "investor",
                "earnings",
                "revenue",
            ]),
            tariff_terms: strings(&[
                "tariff",
                "trump tariff",
                "20% tariff",
                "17% tariff",
                "trade war",
                "export",
                "import",
                "duty",
                "reciprocal",
            ]),
            philippines_terms: strings(&["philippines", "philippine", "filipino", "manila"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed thread scraped in full.
    pub thread_url: String,
    pub search_terms: Vec<String>,
    pub search_sort: String,
    pub search_limit: u32,
    /// Community name used when an item carries none.
    pub default_subreddit: String,
    pub max_comment_depth: u32,
    /// Search hits scoring below this are dropped.
    pub min_relevance: u32,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Attempts beyond the first for transient failures.
    pub max_retries: u32,
    pub search_concurrency: usize,
    pub requests_per_minute: u32,
    pub output_dir: PathBuf,
    pub detailed_file: String,
    pub daily_file: String,
    pub keyword_tiers: KeywordTiers,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            thread_url: DEFAULT_THREAD_URL.to_string(),
            search_terms: strings(&[
                "philippines tariff jollibee stock",
                "JFC stock trump tariff",
                "URC universal robina tariff impact",
                "CNPF century pacific tariff stock",
                "philippine food exports tariff stock market",
                "PSE food sector trump tariff",
                "monde nissin MONDE tariff impact",
                "ginebra GSMI tariff stock price",
                "philippine food companies 20% tariff",
                "jollibee JFC investor tariff concerns",
            ]),
            search_sort: "relevance".to_string(),
            search_limit: 10,
            default_subreddit: "Philippines".to_string(),
            max_comment_depth: 4,
            min_relevance: 3,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            request_timeout_secs: 30,
            max_retries: 2,
            search_concurrency: 1,
            requests_per_minute: 30,
            output_dir: PathBuf::from("."),
            detailed_file: "reddit_sentiment_detailed.csv".to_string(),
            daily_file: "reddit_daily_summary.csv".to_string(),
            keyword_tiers: KeywordTiers::default(),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration: `$TARIFF_PULSE_CONFIG`, then
    /// `./tariff-pulse.toml`, then built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }

        debug!("No configuration file found, using defaults");
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_comment_depth > MAX_COMMENT_DEPTH_LIMIT {
            return Err(invalid("max_comment_depth", self.max_comment_depth));
        }
        if !(1..=100).contains(&self.search_limit) {
            return Err(invalid("search_limit", self.search_limit));
        }
        if self.search_concurrency == 0 {
            return Err(invalid("search_concurrency", self.search_concurrency));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", self.request_timeout_secs));
        }
        if self.requests_per_minute == 0 {
            return Err(invalid("requests_per_minute", self.requests_per_minute));
        }
        if self.user_agent.trim().is_empty() {
            return Err(invalid("user_agent", "<empty>"));
        }

        let tiers = &self.keyword_tiers;
        for (field, tier) in [
            ("keyword_tiers.companies", &tiers.companies),
            ("keyword_tiers.stock_terms", &tiers.stock_terms),
            ("keyword_tiers.tariff_terms", &tiers.tariff_terms),
            ("keyword_tiers.philippines_terms", &tiers.philippines_terms),
        ] {
            if tier.is_empty() {
                return Err(invalid(field, "[]"));
            }
            // A blank keyword is a substring of every text
            if let Some(blank) = tier.iter().find(|keyword| keyword.trim().is_empty()) {
                return Err(invalid(field, format!("{:?}", blank)));
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn detailed_path(&self) -> PathBuf {
        self.output_dir.join(&self.detailed_file)
    }

    pub fn daily_path(&self) -> PathBuf {
        self.output_dir.join(&self.daily_file)
    }
}

fn invalid(field: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_comment_depth, 4);
        assert_eq!(config.min_relevance, 3);
        assert_eq!(config.search_terms.len(), 10);
        assert_eq!(config.default_subreddit, "Philippines");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            search_terms = ["jollibee tariff"]
            search_concurrency = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.search_terms, vec!["jollibee tariff".to_string()]);
        assert_eq!(config.search_concurrency, 4);
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.keyword_tiers, KeywordTiers::default());
    }

    #[test]
    fn test_keyword_tier_override() {
        let config = AppConfig::from_toml_str(
            r#"
            [keyword_tiers]
            companies = ["SM"]
            "#,
        )
        .unwrap();

        assert_eq!(config.keyword_tiers.companies, vec!["SM".to_string()]);
        assert_eq!(
            config.keyword_tiers.tariff_terms,
            KeywordTiers::default().tariff_terms
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = AppConfig::from_toml_str("search_limit = 0");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "search_limit"
        ));

        let result = AppConfig::from_toml_str("search_concurrency = 0");
        assert!(result.is_err());

        let result = AppConfig::from_toml_str("[keyword_tiers]\ncompanies = []");
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_keywords_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [keyword_tiers]
            companies = ["JFC", ""]
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, ref value })
                if field == "keyword_tiers.companies" && value == r#""""#
        ));

        let result = AppConfig::from_toml_str(
            r#"
            [keyword_tiers]
            tariff_terms = ["tariff", "  "]
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. })
                if field == "keyword_tiers.tariff_terms"
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = AppConfig::from_toml_str("search_limit = \"ten\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_subreddit = \"phinvest\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_subreddit, "phinvest");

        let missing = AppConfig::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_output_paths() {
        let config = AppConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(
            config.detailed_path(),
            PathBuf::from("out/reddit_sentiment_detailed.csv")
        );
        assert_eq!(config.daily_path(), PathBuf::from("out/reddit_daily_summary.csv"));
    }
}
