use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Read configuration from a TOML file, then apply `SHOPSIGHT_*` environment
/// overrides on top (`SHOPSIGHT_SERVER_PORT=9000` beats `[server] port`).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHOPSIGHT_").split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Parse configuration straight from a TOML string, without env overrides.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_str_loader_fills_defaults() {
        let config = load_config_from_str(
            r#"
[catalog]
path = "products.csv"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog.path.to_str().unwrap(), "products.csv");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.engine.default_limit, 10);
        assert!(config.assistant.is_none());
    }

    #[test]
    fn test_str_loader_parses_assistant_and_ranking() {
        let config = load_config_from_str(
            r#"
[catalog]
path = "products.csv"

[engine.ranking]
rating_weight = 0.5
price_weight = 0.5

[assistant]
api_key = "sk-local"
"#,
        )
        .unwrap();
        assert_eq!(config.engine.ranking.rating_weight, 0.5);
        assert_eq!(config.assistant.unwrap().api_key, "sk-local");
    }

    #[test]
    fn test_str_loader_requires_catalog_section() {
        let result = load_config_from_str("[server]\nport = 8080\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_file_loader_missing_file() {
        let err = load_config(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_file_loader_reads_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[catalog]
path = "data/products.csv"

[server]
host = "127.0.0.1"
port = 3000

[engine]
default_limit = 5
featured_count = 3
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.engine.default_limit, 5);
        assert_eq!(config.engine.featured_count, 3);
    }
}
