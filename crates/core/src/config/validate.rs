use super::{types::Config, ConfigError};

/// Reject configurations that parse but cannot work:
/// - port 0 or an empty catalog path
/// - zero engine caps or negative ranking weights
/// - a present assistant section with a blank api_key
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server section
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Catalog validation
    if config.catalog.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.path cannot be empty".to_string(),
        ));
    }

    // Engine validation
    if config.engine.default_limit == 0 {
        return Err(ConfigError::ValidationError(
            "engine.default_limit cannot be 0".to_string(),
        ));
    }
    if config.engine.featured_count == 0 {
        return Err(ConfigError::ValidationError(
            "engine.featured_count cannot be 0".to_string(),
        ));
    }
    if config.engine.ranking.rating_weight < 0.0 || config.engine.ranking.price_weight < 0.0 {
        return Err(ConfigError::ValidationError(
            "engine.ranking weights cannot be negative".to_string(),
        ));
    }

    // Assistant validation
    if let Some(assistant) = &config.assistant {
        if assistant.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "assistant.api_key cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
