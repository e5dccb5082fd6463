//! Preset configurations
//!
//! Presets provide complete default query limits for common use cases.

use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryPreset {
    /// Untrusted input: shallow depth, bounded node budget
    ///
    /// - max_depth=512
    /// - max_nodes=1_000_000
    Strict,

    /// Default: generous depth, no node budget
    ///
    /// - max_depth=10_000
    Balanced,

    /// Machine-generated documents with extreme nesting
    ///
    /// - max_depth=1_000_000
    Permissive,
}

impl QueryPreset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "balanced" => Ok(Self::Balanced),
            "permissive" => Ok(Self::Permissive),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: strict, balanced, permissive",
                s
            )),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Balanced => "balanced",
            Self::Permissive => "permissive",
        }
    }
}

impl Default for QueryPreset {
    fn default() -> Self {
        Self::Balanced
    }
}
