//! Configuration
//!
//! Settings come from three places, later ones winning:
//! - `ChainConfig::default()`
//! - a versioned YAML file (`ChainConfig::from_yaml`)
//! - `GETTY_*` environment variables (`ChainConfig::from_env`)
//!
//! # Examples
//!
//! ```rust,ignore
//! use getty_chain::config::ChainConfig;
//!
//! let config = ChainConfig::from_yaml("getty.yaml")?
//!     .with_overrides(|var| std::env::var(var).ok())?;
//! ```

pub mod chain_config;
pub mod error;
pub mod io;

pub use chain_config::{
    ChainConfig, ENV_CACHED_BY_DEFAULT, ENV_CATCH_PANICS, ENV_LOG_SWALLOWED_FAILURES,
    ENV_METRICS_NAMESPACE,
};
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
