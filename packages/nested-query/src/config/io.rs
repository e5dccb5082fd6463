//! Configuration I/O (YAML loading)
//!
//! Defines YAML schema types. Loading lives on `QueryConfig` in query_config.rs.

use super::query_config::MappingEquality;
use serde::{Deserialize, Serialize};

/// YAML Schema v1
///
/// ```yaml
/// version: 1
/// preset: strict
/// overrides:
///   max_depth: 64
///   mapping_equality: unsupported
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1). Optional here so that a missing
    /// field maps to `ConfigError::MissingVersion` instead of a YAML error.
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

fn default_preset() -> String {
    "balanced".to_string()
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_equality: Option<MappingEquality>,
}
