//! Tests for the redundant/unused index analysis.

use mongokit::analyzer::{find_redundant_indexes, find_unused_indexes};
use mongokit::models::{IndexDescriptor, IndexDirection, IndexKey, IndexUsageRecord};

fn descriptor(name: &str, fields: &[(&str, i32)]) -> IndexDescriptor {
    IndexDescriptor {
        name: name.to_string(),
        keys: fields
            .iter()
            .map(|(field, direction)| {
                let direction = if *direction >= 0 {
                    IndexDirection::Ascending
                } else {
                    IndexDirection::Descending
                };
                IndexKey::new(*field, direction)
            })
            .collect(),
    }
}

fn usage(name: &str, ops_count: u64) -> IndexUsageRecord {
    IndexUsageRecord {
        name: name.to_string(),
        ops_count,
        since: None,
        host: None,
        shard: None,
        key: None,
        spec: None,
    }
}

#[test]
fn no_prefix_relation_yields_empty_set() {
    let descriptors = vec![
        descriptor("a_1", &[("a", 1)]),
        descriptor("b_1", &[("b", 1)]),
        descriptor("c_1_d_1", &[("c", 1), ("d", 1)]),
    ];
    assert!(find_redundant_indexes(&descriptors).is_empty());
}

#[test]
fn shorter_prefix_is_flagged_longer_is_not() {
    let short = descriptor("a_1", &[("a", 1)]);
    let long = descriptor("a_1_b_1", &[("a", 1), ("b", 1)]);

    for descriptors in [vec![short.clone(), long.clone()], vec![long, short]] {
        let redundant = find_redundant_indexes(&descriptors);
        assert!(redundant.contains("a_1"));
        assert!(!redundant.contains("a_1_b_1"));
    }
}

#[test]
fn result_is_invariant_under_input_permutation() {
    let a = descriptor("a_1", &[("a", 1)]);
    let ab = descriptor("a_1_b_1", &[("a", 1), ("b", 1)]);
    let c = descriptor("c_1", &[("c", 1)]);

    let forward = find_redundant_indexes(&[a.clone(), ab.clone(), c.clone()]);
    let backward = find_redundant_indexes(&[c, ab, a]);
    assert_eq!(forward, backward);
}

#[test]
fn transitive_chain_flags_every_proper_prefix() {
    let descriptors = vec![
        descriptor("a_1", &[("a", 1)]),
        descriptor("a_1_b_1", &[("a", 1), ("b", 1)]),
        descriptor("a_1_b_1_c_1", &[("a", 1), ("b", 1), ("c", 1)]),
    ];
    let redundant = find_redundant_indexes(&descriptors);
    assert!(redundant.contains("a_1"));
    assert!(redundant.contains("a_1_b_1"));
    assert!(!redundant.contains("a_1_b_1_c_1"));
    assert_eq!(redundant.len(), 2);
}

#[test]
fn id_index_is_not_flagged_alongside_prefix_pair() {
    // descriptors {_id_}, {a_1}, {a_1_b_1} → redundant = {a_1}
    let descriptors = vec![
        descriptor("_id_", &[("_id", 1)]),
        descriptor("a_1", &[("a", 1)]),
        descriptor("a_1_b_1", &[("a", 1), ("b", 1)]),
    ];
    let redundant = find_redundant_indexes(&descriptors);
    assert_eq!(redundant.into_iter().collect::<Vec<_>>(), vec!["a_1".to_string()]);
}

#[test]
fn direction_must_match_for_prefix() {
    let descriptors = vec![
        descriptor("a_-1", &[("a", -1)]),
        descriptor("a_1_b_1", &[("a", 1), ("b", 1)]),
    ];
    assert!(find_redundant_indexes(&descriptors).is_empty());
}

#[test]
fn redundant_index_is_reported_once_across_pairs() {
    let descriptors = vec![
        descriptor("a_1", &[("a", 1)]),
        descriptor("a_1_b_1", &[("a", 1), ("b", 1)]),
        descriptor("a_1_c_1", &[("a", 1), ("c", 1)]),
    ];
    let redundant = find_redundant_indexes(&descriptors);
    assert_eq!(redundant.len(), 1);
    assert!(redundant.contains("a_1"));
}

#[test]
fn empty_input_yields_empty_set() {
    assert!(find_redundant_indexes(&[]).is_empty());
}

#[test]
fn redundancy_check_is_idempotent() {
    let descriptors = vec![
        descriptor("a_1", &[("a", 1)]),
        descriptor("a_1_b_1", &[("a", 1), ("b", 1)]),
    ];
    let first = find_redundant_indexes(&descriptors);
    let second = find_redundant_indexes(&descriptors);
    assert_eq!(first, second);
}

#[test]
fn unused_indexes_keep_input_order() {
    let records = vec![usage("z_1", 0), usage("m_1", 3), usage("a_1", 0), usage("b_1", 0)];
    assert_eq!(find_unused_indexes(&records), vec!["z_1", "a_1", "b_1"]);
}

#[test]
fn unused_scenario_zero_and_nonzero() {
    let records = vec![usage("x", 0), usage("y", 5)];
    assert_eq!(find_unused_indexes(&records), vec!["x"]);
}

#[test]
fn all_used_yields_empty_sequence() {
    let records = vec![usage("a_1", 1), usage("b_1", 900)];
    assert!(find_unused_indexes(&records).is_empty());
}

#[test]
fn unused_check_is_idempotent() {
    let records = vec![usage("a_1", 0), usage("b_1", 2)];
    assert_eq!(find_unused_indexes(&records), find_unused_indexes(&records));
}
