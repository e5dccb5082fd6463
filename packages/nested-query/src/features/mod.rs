//! Feature slices

pub mod nested_query;
