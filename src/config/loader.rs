//! Configuration parsing.
//!
//! Host plugin systems hand the middleware its configuration as an
//! in-memory document, so parsing never touches the filesystem.

use thiserror::Error;

use crate::config::schema::Config;

/// Source format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Error type for configuration parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a configuration document. Missing fields take their defaults.
pub fn parse_config(source: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    let config: Config = match format {
        ConfigFormat::Toml => toml::from_str(source)?,
        ConfigFormat::Json => serde_json::from_str(source)?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingTracePolicy;

    #[test]
    fn test_empty_toml_is_default() {
        let config = parse_config("", ConfigFormat::Toml).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_generate_policy() {
        let config = parse_config(
            r#"
            dummy = true
            missing_trace = "generate"
            "#,
            ConfigFormat::Toml,
        )
        .unwrap();

        assert!(config.dummy);
        assert_eq!(config.missing_trace, MissingTracePolicy::Generate);
    }

    #[test]
    fn test_json_plugin_config() {
        let config = parse_config(r#"{"dummy": false}"#, ConfigFormat::Json).unwrap();
        assert_eq!(config.missing_trace, MissingTracePolicy::Skip);

        let config = parse_config(r#"{"missing_trace": "skip"}"#, ConfigFormat::Json).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = parse_config(r#"missing_trace = "always""#, ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));

        let err = parse_config(r#"{"dummy": "yes"}"#, ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
