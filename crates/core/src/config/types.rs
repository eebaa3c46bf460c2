use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Top-level configuration. Only the catalog section is mandatory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub assistant: Option<AssistantConfig>,
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Catalog source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to the product CSV file
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/products.csv")
}

/// Query engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Result cap applied when a query gives no limit (default: 10)
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Size of the featured sample when no limit is given (default: 8)
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
    /// Fixed shuffle seed for the featured sample; random per process when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_seed: Option<u64>,
    /// Recommendation scoring weights
    #[serde(default)]
    pub ranking: RankingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            featured_count: default_featured_count(),
            featured_seed: None,
            ranking: RankingConfig::default(),
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_featured_count() -> usize {
    8
}

/// Recommendation scoring weights.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    /// Weight for the normalized rating component (0.0-1.0).
    #[serde(default = "default_rating_weight")]
    pub rating_weight: f64,
    /// Weight for the budget-savings component (0.0-1.0).
    #[serde(default = "default_price_weight")]
    pub price_weight: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            // Rating dominates; price only tips close calls under a budget
            rating_weight: default_rating_weight(),
            price_weight: default_price_weight(),
        }
    }
}

fn default_rating_weight() -> f64 {
    0.7
}

fn default_price_weight() -> f64 {
    0.3
}

/// External assistant (LLM agent) configuration
///
/// The credential is carried opaquely for the agent framework sitting in
/// front of this service; nothing here calls the provider directly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Provider API key
    pub api_key: String,
    /// Model identifier handed to the agent framework
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Config copy safe to expose over the API, with secrets stripped.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
    pub engine: EngineConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant: Option<SanitizedAssistantConfig>,
}

/// Sanitized assistant config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAssistantConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            catalog: config.catalog.clone(),
            server: config.server.clone(),
            engine: config.engine.clone(),
            assistant: config.assistant.as_ref().map(|a| SanitizedAssistantConfig {
                api_key_configured: !a.api_key.is_empty(),
                model: a.model.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[catalog]
path = "data/products.csv"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.path.to_str().unwrap(), "data/products.csv");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.engine.default_limit, 10);
        assert_eq!(config.engine.featured_count, 8);
        assert!(config.engine.featured_seed.is_none());
        assert!(config.assistant.is_none());
    }

    #[test]
    fn test_deserialize_missing_catalog_section_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[catalog]
path = "/data/catalog.csv"

[server]
host = "127.0.0.1"
port = 9000

[engine]
default_limit = 25
featured_count = 4
featured_seed = 42

[engine.ranking]
rating_weight = 0.6
price_weight = 0.4

[assistant]
api_key = "sk-test"
model = "gpt-4o-mini"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.engine.default_limit, 25);
        assert_eq!(config.engine.featured_seed, Some(42));
        assert_eq!(config.engine.ranking.price_weight, 0.4);

        let assistant = config.assistant.as_ref().unwrap();
        assert_eq!(assistant.api_key, "sk-test");
        assert_eq!(assistant.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_ranking_defaults() {
        let ranking = RankingConfig::default();
        assert_eq!(ranking.rating_weight, 0.7);
        assert_eq!(ranking.price_weight, 0.3);
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let config = Config {
            catalog: CatalogConfig::default(),
            server: ServerConfig::default(),
            engine: EngineConfig::default(),
            assistant: Some(AssistantConfig {
                api_key: "super-secret".to_string(),
                model: Some("gpt-4o".to_string()),
            }),
        };

        let sanitized = SanitizedConfig::from(&config);
        let assistant = sanitized.assistant.as_ref().unwrap();
        assert!(assistant.api_key_configured);
        assert_eq!(assistant.model.as_deref(), Some("gpt-4o"));

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
    }

    #[test]
    fn test_sanitized_config_without_assistant() {
        let config = Config {
            catalog: CatalogConfig::default(),
            server: ServerConfig::default(),
            engine: EngineConfig::default(),
            assistant: None,
        };
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.assistant.is_none());
    }
}
