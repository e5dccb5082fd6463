//! Stress tests: pathological nesting and traversal limits

mod common;

use common::*;
use nested_query::{
    contains_key, contains_value, deep_equal, find_first_value_by_key, find_path_by_key,
    ErrorKind, NestedQueryUseCase, NestedQueryUseCaseImpl, PathSegment, QueryConfig, QueryError,
    QueryPreset,
};
use serde_json::json;

#[test]
fn test_deep_nesting_does_not_overflow_stack() {
    let depth = 200_000;
    let (doc, root) = nested_sequences(depth);
    let usecase = NestedQueryUseCaseImpl::new(QueryConfig::from_preset(QueryPreset::Permissive))
        .unwrap();

    let (found, stats) = usecase.contains_key_with_stats(&doc, root, "a").unwrap();
    assert!(!found);
    assert_eq!(stats.nodes_visited, depth + 1);
    assert_eq!(stats.max_depth_reached, depth);
}

#[test]
fn test_deep_nesting_contains_value() {
    let (doc, root) = nested_sequences(100_000);
    let (needle_doc, needle) = json_doc(json!(7));
    let usecase = NestedQueryUseCaseImpl::new(QueryConfig::from_preset(QueryPreset::Permissive))
        .unwrap();
    assert!(usecase
        .contains_value(&doc, root, &needle_doc, needle)
        .unwrap());
}

#[test]
fn test_deep_equal_on_deep_structures() {
    let (a, ra) = nested_sequences(50_000);
    let (b, rb) = nested_sequences(50_000);
    let usecase = NestedQueryUseCaseImpl::new(QueryConfig::from_preset(QueryPreset::Permissive))
        .unwrap();
    assert!(usecase.deep_equal(&a, ra, &b, rb).unwrap());
}

#[test]
fn test_default_depth_limit_reports_error() {
    let (doc, root) = nested_sequences(20_000);
    let err = contains_key(&doc, root, "a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DepthLimitExceeded);
    assert!(matches!(err, QueryError::DepthLimitExceeded { limit: 10_000 }));
}

#[test]
fn test_depth_limit_is_inclusive() {
    let (doc, root) = nested_sequences(64);
    let usecase = NestedQueryUseCaseImpl::new(QueryConfig::default().max_depth(64)).unwrap();
    assert!(!usecase.contains_key(&doc, root, "a").unwrap());

    let usecase = NestedQueryUseCaseImpl::new(QueryConfig::default().max_depth(63)).unwrap();
    assert!(usecase.contains_key(&doc, root, "a").is_err());
}

#[test]
fn test_node_budget_from_strict_preset() {
    let config = QueryConfig::from_preset(QueryPreset::Strict).max_nodes(Some(10));
    let usecase = NestedQueryUseCaseImpl::new(config).unwrap();
    let (doc, root) = json_doc(json!([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));
    let err = usecase.contains_key(&doc, root, "a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NodeBudgetExceeded);
}

#[test]
fn test_wide_structure_within_budget() {
    let items: Vec<_> = (0..10_000).map(|i| json!({ "i": i })).collect();
    let (doc, root) = json_doc(json!(items));
    let (needle_doc, needle) = json_doc(json!({"i": 9_999}));
    assert!(contains_value(&doc, root, &needle_doc, needle).unwrap());
}

#[test]
fn test_doubling_dag_key_queries_stay_linear() {
    let levels = 64;
    let (doc, root) = doubling_dag(levels);
    let usecase = NestedQueryUseCaseImpl::default();

    // Every level adds itself plus one skipped entry of its shared child
    let (found, stats) = usecase.contains_key_with_stats(&doc, root, "missing").unwrap();
    assert!(!found);
    assert_eq!(stats.nodes_visited, 2 * levels + 2);

    assert!(contains_key(&doc, root, "k").unwrap());
    assert_eq!(
        find_first_value_by_key(&doc, root, "k").unwrap().and_then(|n| n.as_i64()),
        Some(1)
    );
    let path = find_path_by_key(&doc, root, "k").unwrap().unwrap();
    assert_eq!(path.len(), levels + 1);
    assert!(path[..levels].iter().all(|s| *s == PathSegment::Index(0)));
}

#[test]
fn test_doubling_dag_value_queries_stay_linear() {
    let (doc, root) = doubling_dag(64);
    let usecase = NestedQueryUseCaseImpl::default();

    let (absent_doc, absent) = json_doc(json!({"k": 2}));
    let (found, stats) = usecase
        .contains_value_with_stats(&doc, root, &absent_doc, absent)
        .unwrap();
    assert!(!found);
    assert_eq!(stats.nodes_visited, 2 * 64 + 2);

    let (small, small_root) = doubling_dag(10);
    assert!(contains_value(&doc, root, &small, small_root).unwrap());

    let (copy, copy_root) = doubling_dag(64);
    assert!(deep_equal(&doc, root, &copy, copy_root).unwrap());
}
