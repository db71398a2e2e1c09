//! Configuration management

use midex_core::imex::{EligibilityConfig, JournalRule};
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default IMEx Central endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:8800";

/// Default source database label stamped into exports and registry records.
pub const DEFAULT_SOURCE: &str = "intact";

/// Default directory for batch-run CSV reports.
pub const DEFAULT_REPORTS_DIR: &str = "./reports";

/// Batch driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub registry: RegistryConfig,
    /// Source database label (exports, registry admin records)
    pub source: String,
    /// Directory receiving processed.csv and the assignment reports
    pub reports_dir: String,
    pub eligibility: EligibilityConfig,
}

/// Registry endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl RegistryConfig {
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from environment and defaults
    ///
    /// Environment variables:
    /// - `MIDEX_REGISTRY_URL`: IMEx Central endpoint
    /// - `MIDEX_REGISTRY_USER` / `MIDEX_REGISTRY_PASSWORD`: credentials
    /// - `MIDEX_SOURCE`: source database label
    /// - `MIDEX_REPORTS_DIR`: report output directory
    /// - `MIDEX_ELIGIBLE_JOURNALS`: `Journal:year` pairs, comma-separated
    /// - `MIDEX_ADMIN_GROUP` / `MIDEX_ADMIN_USER`: registry admin records
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut eligibility = EligibilityConfig::default();
        if let Ok(journals) = std::env::var("MIDEX_ELIGIBLE_JOURNALS") {
            eligibility.journals = parse_journal_rules(&journals)?;
        }
        eligibility.admin_group = std::env::var("MIDEX_ADMIN_GROUP").ok();
        eligibility.admin_user = std::env::var("MIDEX_ADMIN_USER").ok();

        let config = Config {
            registry: RegistryConfig {
                url: std::env::var("MIDEX_REGISTRY_URL")
                    .unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string()),
                username: std::env::var("MIDEX_REGISTRY_USER").ok(),
                password: std::env::var("MIDEX_REGISTRY_PASSWORD").ok(),
            },
            source: std::env::var("MIDEX_SOURCE").unwrap_or_else(|_| DEFAULT_SOURCE.to_string()),
            reports_dir: std::env::var("MIDEX_REPORTS_DIR")
                .unwrap_or_else(|_| DEFAULT_REPORTS_DIR.to_string()),
            eligibility,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.registry.url.is_empty() {
            anyhow::bail!("Registry URL cannot be empty");
        }
        if self.source.is_empty() {
            anyhow::bail!("Source label cannot be empty");
        }
        if self.registry.username.is_some() != self.registry.password.is_some() {
            anyhow::bail!("Registry credentials require both user and password");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: RegistryConfig {
                url: DEFAULT_REGISTRY_URL.to_string(),
                username: None,
                password: None,
            },
            source: DEFAULT_SOURCE.to_string(),
            reports_dir: DEFAULT_REPORTS_DIR.to_string(),
            eligibility: EligibilityConfig::default(),
        }
    }
}

/// Parse `Journal:year` pairs, comma-separated
fn parse_journal_rules(value: &str) -> anyhow::Result<Vec<JournalRule>> {
    let mut rules = Vec::new();
    for pair in value.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (journal, year) = pair
            .rsplit_once(':')
            .ok_or_else(|| anyhow::anyhow!("Invalid journal rule: {}", pair))?;
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid year in journal rule: {}", pair))?;
        rules.push(JournalRule::new(journal.trim(), year));
    }
    if rules.is_empty() {
        anyhow::bail!("No journal rules in MIDEX_ELIGIBLE_JOURNALS");
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_journal_rules() {
        let rules = parse_journal_rules("Cell:2006, Proteomics:2005").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], JournalRule::new("Cell", 2006));
        assert_eq!(rules[1], JournalRule::new("Proteomics", 2005));

        assert!(parse_journal_rules("Cell").is_err());
        assert!(parse_journal_rules("Cell:abc").is_err());
        assert!(parse_journal_rules("").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_credentials_pairing() {
        let mut config = Config::default();
        config.registry.username = Some("curator".to_string());
        assert!(config.validate().is_err());

        config.registry.password = Some("secret".to_string());
        assert!(config.validate().is_ok());
        assert!(config.registry.credentials().is_some());
    }
}
