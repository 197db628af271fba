//! Key-ordered views over unordered maps.
//!
//! Per-file lookups (line -> declaration, line -> comment) live in hash maps;
//! association needs them as ordered sequences.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Drain `map` into a vector of pairs in ascending key order
pub fn sort_map_by_key<K, V>(map: HashMap<K, V>) -> Vec<(K, V)>
where
    K: Ord + Hash + Eq,
{
    sort_map_by(map, |a, b| a.cmp(b))
}

/// Drain `map` into a vector of pairs ordered by a caller-supplied key comparator
pub fn sort_map_by<K, V, F>(map: HashMap<K, V>, mut compare: F) -> Vec<(K, V)>
where
    K: Hash + Eq,
    F: FnMut(&K, &K) -> Ordering,
{
    let mut pairs: Vec<(K, V)> = map.into_iter().collect();
    pairs.sort_by(|(a, _), (b, _)| compare(a, b));
    pairs
}
