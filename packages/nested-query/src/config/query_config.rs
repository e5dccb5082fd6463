//! Query configuration
//!
//! Traversal limits and deep-equality policy for the query engine.

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, ConfigOverrides};
use super::preset::QueryPreset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_depth`
pub const MAX_DEPTH_LIMIT: usize = 1_000_000;

/// Supported YAML schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// How two mapping nodes compare under deep equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingEquality {
    /// Same key set, pairwise deep-equal values, key order ignored
    Structural,
    /// Comparing two mappings fails with `QueryError::InvalidInput`
    Unsupported,
}

impl Default for MappingEquality {
    fn default() -> Self {
        Self::Structural
    }
}

/// Query engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Maximum nesting depth below the root (1..=1_000_000)
    pub max_depth: usize,

    /// Maximum nodes visited per query (None = unlimited)
    pub max_nodes: Option<usize>,

    /// Mapping-to-mapping comparison policy
    pub mapping_equality: MappingEquality,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::from_preset(QueryPreset::Balanced)
    }
}

impl QueryConfig {
    /// Create from preset
    pub fn from_preset(preset: QueryPreset) -> Self {
        match preset {
            QueryPreset::Strict => Self {
                max_depth: 512,
                max_nodes: Some(1_000_000),
                mapping_equality: MappingEquality::Structural,
            },
            QueryPreset::Balanced => Self {
                max_depth: 10_000,
                max_nodes: None,
                mapping_equality: MappingEquality::Structural,
            },
            QueryPreset::Permissive => Self {
                max_depth: MAX_DEPTH_LIMIT,
                max_nodes: None,
                mapping_equality: MappingEquality::Structural,
            },
        }
    }

    /// Builder: Set max depth
    pub fn max_depth(mut self, v: usize) -> Self {
        self.max_depth = v;
        self
    }

    /// Builder: Set node budget
    pub fn max_nodes(mut self, v: Option<usize>) -> Self {
        self.max_nodes = v;
        self
    }

    /// Builder: Set mapping equality policy
    pub fn mapping_equality(mut self, v: MappingEquality) -> Self {
        self.mapping_equality = v;
        self
    }

    /// Apply YAML overrides on top of this config
    fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(depth) = overrides.max_depth {
            self.max_depth = depth;
        }
        if let Some(nodes) = overrides.max_nodes {
            self.max_nodes = Some(nodes);
        }
        if let Some(eq) = overrides.mapping_equality {
            self.mapping_equality = eq;
        }
        self
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from YAML string (v1 schema)
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = QueryPreset::from_str(&file.preset)
            .map_err(|_| ConfigError::UnknownPreset(file.preset.clone()))?;

        let mut config = Self::from_preset(preset);
        if let Some(overrides) = file.overrides {
            config = config.apply(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as YAML (v1 schema, balanced base with every field overridden)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: QueryPreset::Balanced.as_str().to_string(),
            overrides: Some(ConfigOverrides {
                max_depth: Some(self.max_depth),
                max_nodes: self.max_nodes,
                mapping_equality: Some(self.mapping_equality),
            }),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Validatable for QueryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_depth",
                self.max_depth,
                1,
                MAX_DEPTH_LIMIT,
                "Depth limit must allow at least the root's children",
            ));
        }

        if self.max_nodes == Some(0) {
            return Err(ConfigError::Validation(
                "max_nodes must be at least 1, or omitted for unlimited".to_string(),
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "QueryConfig"
    }
}
