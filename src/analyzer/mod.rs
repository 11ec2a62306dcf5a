//! Redundant and unused index analysis.
//!
//! Pure functions over typed snapshots of a collection's index catalog and
//! usage counters. No driver calls, no side effects; the caller decides
//! what to do with the advice.

use std::collections::BTreeSet;

use crate::models::{IndexDescriptor, IndexUsageRecord};

/// True when `shorter.keys` is a strict ordered prefix of `longer.keys`,
/// comparing field name and direction at every position.
///
/// A descriptor with an empty key list is malformed catalog data and never
/// participates in the prefix relation.
fn is_strict_prefix(shorter: &IndexDescriptor, longer: &IndexDescriptor) -> bool {
    if shorter.keys.is_empty() || shorter.keys.len() >= longer.keys.len() {
        return false;
    }
    shorter.keys.iter().zip(&longer.keys).all(|(a, b)| a == b)
}

/// Names of indexes made redundant by another index.
///
/// For every unordered pair of descriptors, the one whose key sequence is a
/// strict ordered prefix of the other's is flagged: any query it serves is
/// also served by the longer index. Equal-length key sequences never flag
/// each other, and the longer index of a pair is never flagged.
pub fn find_redundant_indexes(descriptors: &[IndexDescriptor]) -> BTreeSet<String> {
    let mut redundant = BTreeSet::new();
    for i in 0..descriptors.len() {
        for j in (i + 1)..descriptors.len() {
            let (a, b) = (&descriptors[i], &descriptors[j]);
            if is_strict_prefix(a, b) {
                redundant.insert(a.name.clone());
            } else if is_strict_prefix(b, a) {
                redundant.insert(b.name.clone());
            }
        }
    }
    redundant
}

/// Names of indexes with zero recorded operations, in input order.
///
/// Counters reset on server restart; callers must surface that caveat
/// alongside the result.
pub fn find_unused_indexes(usage: &[IndexUsageRecord]) -> Vec<String> {
    usage
        .iter()
        .filter(|record| record.ops_count == 0)
        .map(|record| record.name.clone())
        .collect()
}
