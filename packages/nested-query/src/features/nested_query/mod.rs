//! Nested-Structure Query Engine
//!
//! Searches an arbitrarily nested mix of sequences and mappings for a key or
//! a value.
//!
//! # Architecture
//!
//! ```text
//! application/     NestedQueryUseCase (entry point, owns QueryConfig)
//!       ↓
//! infrastructure/  QueryEngine → Walker (explicit stack, cycle guard)
//!                              → DeepEqual (pairwise work-list)
//!       ↓
//! domain/          PathSegment, TraversalStats, VisitOrder
//! ```
//!
//! # Ordering
//!
//! Key queries are depth-first and children-first: in `{a: 1, b: {a: 2}}`
//! the value under `a` is `2`. Sequence elements are visited in index order,
//! mapping fields in insertion order.
//!
//! # Example
//!
//! ```rust
//! use nested_query::features::nested_query::{NestedQueryUseCase, NestedQueryUseCaseImpl};
//! use nested_query::Document;
//!
//! let (doc, root) = Document::parse_json(r#"{"a": 1, "b": {"a": 2}}"#).unwrap();
//! let usecase = NestedQueryUseCaseImpl::default();
//! let found = usecase.find_first_value_by_key(&doc, root, "a").unwrap();
//! assert_eq!(found.and_then(|n| n.as_i64()), Some(2));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer (primary interface)
pub use application::{NestedQueryUseCase, NestedQueryUseCaseImpl};

// Re-export domain types
pub use domain::{format_path, PathSegment, TraversalStats, VisitOrder};

// Re-export infrastructure (internal use - prefer application layer)
#[doc(hidden)]
pub use infrastructure::{DeepEqual, QueryEngine, Walker};
