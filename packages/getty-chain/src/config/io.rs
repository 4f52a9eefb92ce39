//! Configuration I/O (YAML schema)
//!
//! Defines the YAML schema types. Loading lives in chain_config.rs.

use super::chain_config::ChainConfig;
use serde::{Deserialize, Serialize};

/// YAML Schema v1
///
/// ```yaml
/// version: 1
/// chain:
///   cached_by_default: true
///   catch_panics: true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<ChainConfig>,
}

impl ConfigExportV1 {
    pub const SUPPORTED_VERSIONS: &'static [u32] = &[1];
}
