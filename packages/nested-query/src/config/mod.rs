//! Query configuration
//!
//! Two tiers:
//! - Preset: `QueryConfig::from_preset(QueryPreset::Strict)`
//! - YAML v1: `QueryConfig::from_yaml("query.yaml")?`
//!
//! Builder setters cover anything in between:
//!
//! ```rust
//! use nested_query::config::{MappingEquality, QueryConfig, QueryPreset, Validatable};
//!
//! let config = QueryConfig::from_preset(QueryPreset::Strict)
//!     .max_depth(64)
//!     .mapping_equality(MappingEquality::Unsupported);
//! assert!(config.validate().is_ok());
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod query_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, ConfigOverrides};
pub use preset::QueryPreset;
pub use query_config::{MappingEquality, QueryConfig, MAX_DEPTH_LIMIT};
pub use validation::Validatable;
