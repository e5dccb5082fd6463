//! Common test utilities for nested-query
//!
//! Shared fixtures and helpers for integration and property tests.

mod fixtures;

pub use fixtures::*;
