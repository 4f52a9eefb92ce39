//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Environment variable that does not parse
    #[error("Invalid value '{value}' for environment variable {var}. {hint}")]
    InvalidEnv {
        var: String,
        value: String,
        hint: String,
    },

    /// Metrics namespace that prometheus would reject
    #[error("Invalid metrics namespace '{0}'. Use [a-zA-Z_][a-zA-Z0-9_]* or leave it empty.")]
    InvalidNamespace(String),

    /// Metric construction failed
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create an environment error with a hint
    pub fn invalid_env(
        var: impl Into<String>,
        value: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::InvalidEnv {
            var: var.into(),
            value: value.into(),
            hint: hint.into(),
        }
    }
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_version_lists_supported() {
        let err = ConfigError::UnsupportedVersion {
            found: 7,
            supported: vec![1],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported configuration version 7. Supported versions: 1"
        );
    }

    #[test]
    fn test_invalid_env_message() {
        let err = ConfigError::invalid_env("GETTY_CATCH_PANICS", "maybe", "Use true or false.");
        let msg = err.to_string();
        assert!(msg.contains("GETTY_CATCH_PANICS"));
        assert!(msg.contains("maybe"));
    }
}
