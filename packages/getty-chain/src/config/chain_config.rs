//! Chain cache settings

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigExportV1;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable names read by [`ChainConfig::from_env`]
pub const ENV_CACHED_BY_DEFAULT: &str = "GETTY_CACHED_BY_DEFAULT";
pub const ENV_CATCH_PANICS: &str = "GETTY_CATCH_PANICS";
pub const ENV_LOG_SWALLOWED_FAILURES: &str = "GETTY_LOG_SWALLOWED_FAILURES";
pub const ENV_METRICS_NAMESPACE: &str = "GETTY_METRICS_NAMESPACE";

/// Settings shared by every chain started from one cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Whether `start` begins a cached chain (otherwise an uncached one)
    pub cached_by_default: bool,

    /// Capture accessor panics as failures instead of unwinding through the chain
    pub catch_panics: bool,

    /// Emit a debug event for every failure a default policy swallows
    pub log_swallowed_failures: bool,

    /// Prefix for the cache's prometheus metrics; empty for none
    pub metrics_namespace: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            cached_by_default: true,
            catch_panics: true,
            log_swallowed_failures: false,
            metrics_namespace: "getty".to_string(),
        }
    }
}

impl ChainConfig {
    pub fn cached_by_default(mut self, enabled: bool) -> Self {
        self.cached_by_default = enabled;
        self
    }

    pub fn catch_panics(mut self, enabled: bool) -> Self {
        self.catch_panics = enabled;
        self
    }

    pub fn log_swallowed_failures(mut self, enabled: bool) -> Self {
        self.log_swallowed_failures = enabled;
        self
    }

    pub fn metrics_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metrics_namespace = namespace.into();
        self
    }

    /// Check that the settings can build a cache
    pub fn validate(&self) -> ConfigResult<()> {
        let ns = &self.metrics_namespace;
        if ns.is_empty() {
            return Ok(());
        }
        let mut chars = ns.chars();
        let head_ok = chars
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
        if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(())
        } else {
            Err(ConfigError::InvalidNamespace(ns.clone()))
        }
    }

    /// Defaults overlaid with `GETTY_*` environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Overlay variables from an arbitrary lookup (the environment in production)
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_CACHED_BY_DEFAULT) {
            self.cached_by_default = parse_flag(ENV_CACHED_BY_DEFAULT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CATCH_PANICS) {
            self.catch_panics = parse_flag(ENV_CATCH_PANICS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_SWALLOWED_FAILURES) {
            self.log_swallowed_failures = parse_flag(ENV_LOG_SWALLOWED_FAILURES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_METRICS_NAMESPACE) {
            self.metrics_namespace = raw.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Load from a YAML file (schema v1)
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !ConfigExportV1::SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: ConfigExportV1::SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = export.chain.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            chain: Some(self.clone()),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

fn parse_flag(var: &str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_env(
            var,
            raw,
            "Use one of: true, false, 1, 0, yes, no, on, off.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChainConfig::default();
        assert!(config.cached_by_default);
        assert!(config.catch_panics);
        assert!(!config.log_swallowed_failures);
        assert_eq!(config.metrics_namespace, "getty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = ChainConfig::default()
            .with_overrides(lookup(&[
                (ENV_CACHED_BY_DEFAULT, "false"),
                (ENV_CATCH_PANICS, "OFF"),
                (ENV_LOG_SWALLOWED_FAILURES, "1"),
                (ENV_METRICS_NAMESPACE, " svc_chain "),
            ]))
            .unwrap();

        assert!(!config.cached_by_default);
        assert!(!config.catch_panics);
        assert!(config.log_swallowed_failures);
        assert_eq!(config.metrics_namespace, "svc_chain");
    }

    #[test]
    fn test_env_rejects_garbage_flag() {
        let result = ChainConfig::default().with_overrides(lookup(&[(ENV_CATCH_PANICS, "maybe")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    fn test_namespace_validation() {
        assert!(ChainConfig::default().metrics_namespace("").validate().is_ok());
        assert!(ChainConfig::default().metrics_namespace("_a1").validate().is_ok());
        assert!(matches!(
            ChainConfig::default().metrics_namespace("1abc").validate(),
            Err(ConfigError::InvalidNamespace(_))
        ));
        assert!(ChainConfig::default()
            .metrics_namespace("has-dash")
            .validate()
            .is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ChainConfig::default()
            .cached_by_default(false)
            .metrics_namespace("app");

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("cached_by_default: false"));

        let recovered = ChainConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(recovered, config);
    }

    #[test]
    fn test_yaml_loading_partial() {
        let yaml_content = r#"
version: 1
chain:
  catch_panics: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = ChainConfig::from_yaml(temp_file.path()).unwrap();
        assert!(!config.catch_panics);
        assert!(config.cached_by_default);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = ChainConfig::from_yaml_str("chain:\n  catch_panics: false\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = ChainConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field() {
        let result = ChainConfig::from_yaml_str("version: 1\nchain:\n  cache_size: 3\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }
}
