use std::collections::BTreeMap;

use llrb_tree::llrb_tree_map;
use llrb_tree::{Error, LLRBTreeMap};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rstest::rstest;
use simplelog::{Config, LevelFilter, TestLogger};
use static_assertions::assert_eq_size;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

// An empty map is a single null pointer.
assert_eq_size!(LLRBTreeMap<u64, u64>, usize);

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

fn key_strategy() -> impl Strategy<Value = i64> {
    // Use a range that's smaller than TEST_SIZE to ensure key collisions
    -500i64..500i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn entries_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)
}

fn to_vec(map: &LLRBTreeMap<i64, i64>) -> Vec<(i64, i64)> {
    map.iter().map(|(&k, &v)| (k, v)).collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Discard(i64),
    PopKey(i64),
    Get(i64),
    ContainsKey(i64),
    FirstKeyValue,
    LastKeyValue,
    PopMinItem,
    PopMaxItem,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Discard),
        2 => key_strategy().prop_map(MapOp::PopKey),
        1 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopMinItem),
        1 => Just(MapOp::PopMaxItem),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both LLRBTreeMap and BTreeMap and asserts
    /// identical results and a valid tree at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut llrb: LLRBTreeMap<i64, i64> = LLRBTreeMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(llrb.insert(*k, *v), model.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    let expected = model.remove(k).map(drop).ok_or(Error::KeyNotFound);
                    prop_assert_eq!(llrb.remove(k), expected, "remove({})", k);
                }
                MapOp::Discard(k) => {
                    llrb.discard(k);
                    model.remove(k);
                }
                MapOp::PopKey(k) => {
                    let expected = model.remove(k).ok_or(Error::KeyNotFound);
                    prop_assert_eq!(llrb.pop_key(k), expected, "pop_key({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(llrb.get(k), model.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(llrb.contains_key(k), model.contains_key(k), "contains_key({})", k);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(llrb.first_key_value(), model.first_key_value());
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(llrb.last_key_value(), model.last_key_value());
                }
                MapOp::PopMinItem => {
                    prop_assert_eq!(llrb.pop_min_item(), model.pop_first().ok_or(Error::EmptyCollection));
                }
                MapOp::PopMaxItem => {
                    prop_assert_eq!(llrb.pop_max_item(), model.pop_last().ok_or(Error::EmptyCollection));
                }
            }
            prop_assert!(llrb.is_valid(), "invalid after {:?}", op);
        }

        prop_assert_eq!(llrb.len(), model.len());
        prop_assert!(llrb.iter().map(|(&k, &v)| (k, v)).eq(model.into_iter()));
    }

    /// Every traversal order agrees with BTreeMap.
    #[test]
    fn iter_matches_btreemap(entries in entries_strategy()) {
        let llrb: LLRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.iter().copied().collect();

        prop_assert!(llrb.iter().eq(model.iter()));
        prop_assert!(llrb.iter_rev().eq(model.iter().rev()));
        prop_assert!(llrb.keys().eq(model.keys()));
        prop_assert!(llrb.keys_rev().eq(model.keys().rev()));
        prop_assert!(llrb.values().eq(model.values()));
        prop_assert!(llrb.values_rev().eq(model.values().rev()));
        prop_assert!(llrb.clone().into_iter().eq(model.clone()));
        prop_assert!(llrb.clone().into_keys().eq(model.clone().into_keys()));
        prop_assert!(llrb.into_values().rev().eq(model.into_values().rev()));
    }

    /// Mutation through `get_mut`, `iter_mut`, and `values_mut` matches BTreeMap.
    #[test]
    fn mutable_access_matches_btreemap(
        entries in entries_strategy(),
        probes in proptest::collection::vec(key_strategy(), 0..100),
    ) {
        let mut llrb: LLRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut model: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for k in &probes {
            if let Some(v) = llrb.get_mut(k) {
                *v = v.wrapping_mul(3);
            }
            if let Some(v) = model.get_mut(k) {
                *v = v.wrapping_mul(3);
            }
        }
        for (k, v) in &mut llrb {
            *v = v.wrapping_add(*k);
        }
        for (k, v) in &mut model {
            *v = v.wrapping_add(*k);
        }
        for v in llrb.values_mut() {
            *v = v.wrapping_neg();
        }
        for v in model.values_mut() {
            *v = v.wrapping_neg();
        }

        prop_assert!(llrb.iter().eq(model.iter()));
        prop_assert!(llrb.is_valid());
    }

    /// Discarding keys that were never inserted leaves the map unchanged.
    #[test]
    fn discard_absent_keys_is_a_no_op(
        keys in proptest::collection::btree_set(key_strategy(), 0..500),
        probes in proptest::collection::vec(key_strategy(), 0..TEST_SIZE),
    ) {
        // Keep only even keys in the map and probe with odd ones, so every probe misses but
        // its search path still diverges at arbitrary depths.
        let mut llrb: LLRBTreeMap<i64, i64> = keys.iter().map(|&k| (k * 2, k)).collect();
        let before = llrb.clone();

        for k in probes.iter().map(|k| k * 2 + 1) {
            llrb.discard(&k);
            prop_assert_eq!(llrb.pop_key(&k), Err(Error::KeyNotFound));
            prop_assert!(llrb.is_valid());
        }

        prop_assert_eq!(&llrb, &before);
        prop_assert_eq!(llrb.len(), keys.len());
    }

    /// `insert` followed by `pop_key` hands back the value and removes the key.
    #[test]
    fn insert_then_pop_key_round_trips(entries in entries_strategy(), k in key_strategy(), v in value_strategy()) {
        let mut llrb: LLRBTreeMap<i64, i64> = entries.into_iter().collect();
        llrb.insert(k, v);
        prop_assert_eq!(llrb.pop_key(&k), Ok(v));
        prop_assert!(!llrb.contains_key(&k));
        prop_assert!(llrb.is_valid());
    }

    /// Draining by extremum yields sorted (or reverse-sorted) entries, then reports emptiness.
    #[test]
    fn drain_by_extremum_is_sorted(entries in entries_strategy()) {
        let model: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let mut llrb: LLRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut drained = Vec::new();
        while let Ok(item) = llrb.pop_min_item() {
            drained.push(item);
        }
        prop_assert!(drained.iter().copied().eq(model.iter().map(|(&k, &v)| (k, v))));
        prop_assert_eq!(llrb.pop_min_item(), Err(Error::EmptyCollection));

        let mut llrb: LLRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut drained = Vec::new();
        while let Ok(key) = llrb.pop_max_key() {
            drained.push(key);
        }
        prop_assert!(drained.iter().eq(model.keys().rev()));
        prop_assert_eq!(llrb.pop_max_key(), Err(Error::EmptyCollection));
    }

    #[test]
    fn clone_produces_equal_map(entries in entries_strategy()) {
        let llrb: LLRBTreeMap<i64, i64> = entries.into_iter().collect();
        let copy = llrb.clone();
        prop_assert_eq!(&copy, &llrb);
        prop_assert!(copy.is_valid());
    }

    /// Tests that equal maps produce equal hashes.
    #[test]
    fn hash_consistent_for_equal_maps(entries in entries_strategy()) {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let map1: LLRBTreeMap<i64, i64> = entries.iter().copied().collect();
        // Same contents, inserted in ascending order, so the tree shape differs.
        let map2: LLRBTreeMap<i64, i64> = entries.iter().copied().collect::<BTreeMap<_, _>>().into_iter().collect();

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        map1.hash(&mut h1);
        map2.hash(&mut h2);

        prop_assert_eq!(&map1, &map2);
        prop_assert_eq!(h1.finish(), h2.finish(), "equal maps should have equal hashes");
    }

    #[test]
    fn ord_matches_btreemap(a in entries_strategy(), b in entries_strategy()) {
        let llrb_a: LLRBTreeMap<i64, i64> = a.iter().copied().collect();
        let llrb_b: LLRBTreeMap<i64, i64> = b.iter().copied().collect();
        let model_a: BTreeMap<i64, i64> = a.into_iter().collect();
        let model_b: BTreeMap<i64, i64> = b.into_iter().collect();
        prop_assert_eq!(llrb_a.cmp(&llrb_b), model_a.cmp(&model_b));
        prop_assert_eq!(llrb_a == llrb_b, model_a == model_b);
    }
}

// ─── Size-parameterized scenarios ────────────────────────────────────────────

/// Fills, half-empties, refills, and empties a map in ascending and then descending key order.
#[rstest]
fn insert_remove_scenario(#[values(0, 1, 10, 100)] size: i32) {
    let mut map = LLRBTreeMap::new();
    let mut items: Vec<(i32, String)> = (0..size).map(|k| (k, k.to_string())).collect();

    for pass in 0..2 {
        if pass == 1 {
            items.reverse();
        }

        for (k, v) in &items {
            assert!(!map.contains_key(k));
            map.insert(*k, v.clone());
            assert!(map.contains_key(k));
        }
        assert!(map.is_valid());
        for (k, v) in &items {
            assert_eq!(&map[k], v);
        }
        assert_eq!(map.keys().count(), items.len());

        let split = items.len() / 2;
        let (kept, popped) = items.split_at(split);

        for (k, v) in popped {
            assert_eq!(map.pop_key(k), Ok(v.clone()));
        }
        for (k, _) in popped {
            assert!(!map.contains_key(k));
        }
        for (k, v) in kept {
            assert_eq!(&map[k], v);
        }
        assert!(map.is_valid());
        assert_eq!(map.len(), split);

        for (k, v) in popped.iter().rev() {
            map.insert(*k, v.clone());
        }
        for (k, v) in kept.iter().rev() {
            assert_eq!(map.pop_key(k), Ok(v.clone()));
        }
        for (k, v) in popped {
            assert_eq!(&map[k], v);
        }
        assert!(map.is_valid());

        for (k, _) in popped {
            assert_eq!(map.remove(k), Ok(()));
        }
        assert_eq!(map.keys().count(), 0);
        assert_eq!(map.len(), 0);
    }
}

#[rstest]
fn pop_min_max_scenario(#[values(0, 1, 10, 100)] size: i32) {
    let items: Vec<(i32, String)> = (0..size).map(|k| (k, k.to_string())).collect();
    let mut map: LLRBTreeMap<i32, String> = items.iter().cloned().collect();

    for item in &items {
        assert_eq!(map.pop_min_item().as_ref(), Ok(item));
        assert!(map.is_valid());
    }
    assert_eq!(map.pop_min_item(), Err(Error::EmptyCollection));

    map.extend(items.iter().cloned());
    for item in items.iter().rev() {
        assert_eq!(map.pop_max_item().as_ref(), Ok(item));
        assert!(map.is_valid());
    }
    assert_eq!(map.keys().count(), 0);
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn ascending_inserts_yield_sorted_items() {
    let mut map = LLRBTreeMap::new();
    for k in 0..10 {
        map.insert(k, -k);
    }
    let items: Vec<(i64, i64)> = to_vec(&map);
    assert_eq!(items, (0..10).map(|k| (k, -k)).collect::<Vec<_>>());
    assert_eq!(map.len(), 10);
    assert!(map.is_valid());
}

#[test]
fn clear_empties_map() {
    init_logger();
    let mut map: LLRBTreeMap<i64, i64> = (0..10).map(|k| (k, -k)).collect();
    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.iter().next(), None);
}

#[test]
fn trace_logging_reaches_the_test_logger() {
    init_logger();
    assert_eq!(log::max_level(), LevelFilter::Trace);
    let mut map: LLRBTreeMap<i64, i64> = (0..4).map(|k| (k, k)).collect();
    assert_eq!(map.into_iter().count(), 4);
    map = LLRBTreeMap::from([(1, 1)]);
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn pop_key_from_the_middle() {
    let mut map: LLRBTreeMap<i64, i64> = (0..10).map(|k| (k, -k)).collect();
    assert_eq!(map.pop_key(&5), Ok(-5));
    assert!(!map.contains_key(&5));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 6, 7, 8, 9]);
    assert!(map.is_valid());
}

/// Shuffled upserts and discards of 512 keys over 10 rounds, checked against a BTreeMap after
/// every round. The second pass starts from a map that already holds every key.
#[test]
fn shuffled_insert_discard_matches_model() {
    const TOTAL: usize = 512;
    const ROUNDS: usize = 10;

    init_logger();
    let mut rng = StdRng::seed_from_u64(10);

    for pass in 0..2 {
        let mut map: LLRBTreeMap<usize, usize> = if pass == 1 {
            (0..TOTAL).map(|k| (k, k)).collect()
        } else {
            LLRBTreeMap::new()
        };
        let mut model: BTreeMap<usize, usize> = map.iter().map(|(&k, &v)| (k, v)).collect();

        let mut items: Vec<usize> = (0..TOTAL).cycle().take(TOTAL * ROUNDS).collect();
        items.shuffle(&mut rng);

        for round in items.chunks(TOTAL) {
            for &value in round {
                if rng.random_bool(0.5) {
                    map.insert(value, value);
                    model.insert(value, value);
                } else {
                    map.discard(&value);
                    model.remove(&value);
                }
            }
            assert!(map.is_valid());
            assert_eq!(
                map.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(),
                model.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn copy_is_independent() {
    let original: LLRBTreeMap<i64, i64> = (0..10).map(|k| (k, -k)).collect();
    let mut copy = original.clone();

    copy.insert(100, 100);
    copy.discard(&0);
    if let Some(v) = copy.get_mut(&1) {
        *v = 1;
    }

    assert_eq!(to_vec(&original), (0..10).map(|k| (k, -k)).collect::<Vec<_>>());
    assert_eq!(copy.len(), 10);
    assert_eq!(copy.get(&1), Some(&1));
    assert!(original.is_valid());
    assert!(copy.is_valid());
}

// ─── Errors and defaults ─────────────────────────────────────────────────────

#[test]
fn missing_keys_report_key_not_found() {
    let mut map = LLRBTreeMap::from([(1, "a")]);
    assert_eq!(map.try_get(&2), Err(Error::KeyNotFound));
    assert_eq!(map.remove(&2), Err(Error::KeyNotFound));
    assert_eq!(map.pop_key(&2), Err(Error::KeyNotFound));
    assert_eq!(map.len(), 1);
    assert!(map.is_valid());
}

#[test]
fn defaults_are_returned_only_when_absent() {
    let mut map = LLRBTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
    assert_eq!(map.get_or(&1, &"z"), &"a");
    assert_eq!(map.get_or(&9, &"z"), &"z");
    assert_eq!(map.pop_key_or(&9, "z"), "z");
    assert_eq!(map.pop_key_or(&2, "z"), "b");
    assert_eq!(map.pop_min_value_or("z"), "a");
    assert_eq!(map.pop_max_value_or("z"), "c");
    assert_eq!(map.pop_min_value_or("z"), "z");
    assert_eq!(map.pop_max_value_or("z"), "z");
    assert_eq!(map.pop_min_key_or(0), 0);
    assert_eq!(map.pop_max_key_or(0), 0);
    assert_eq!(map.pop_min_item_or((0, "z")), (0, "z"));
    assert_eq!(map.pop_max_item_or((0, "z")), (0, "z"));
}

#[test]
fn empty_map_reports_empty_collection() {
    let mut map: LLRBTreeMap<i32, i32> = LLRBTreeMap::new();
    assert_eq!(map.pop_min_item(), Err(Error::EmptyCollection));
    assert_eq!(map.pop_max_item(), Err(Error::EmptyCollection));
    assert_eq!(map.pop_min_value(), Err(Error::EmptyCollection));
    assert_eq!(map.pop_max_value(), Err(Error::EmptyCollection));
    assert_eq!(map.pop_min_key(), Err(Error::EmptyCollection));
    assert_eq!(map.pop_max_key(), Err(Error::EmptyCollection));
    assert!(map.is_valid());
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let map = LLRBTreeMap::from([(1, 1)]);
    let _ = map[&2];
}

#[test]
fn insert_keeps_the_stored_key() {
    // Keys that compare equal but are distinguishable.
    #[derive(Debug)]
    struct Tagged(i32, &'static str);
    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }
    impl Eq for Tagged {}
    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.cmp(&other.0)
        }
    }

    let mut map = LLRBTreeMap::new();
    map.insert(Tagged(1, "first"), 1);
    assert_eq!(map.insert(Tagged(1, "second"), 2), Some(1));
    assert_eq!(map.first_key_value().map(|(k, v)| (k.1, *v)), Some(("first", 2)));
}

// ─── Iterators and formatting ────────────────────────────────────────────────

#[test]
fn iterators_are_fused_and_default_empty() {
    let map = LLRBTreeMap::from([(1, 1)]);
    let mut iter = map.iter();
    assert_eq!(iter.next(), Some((&1, &1)));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);

    assert_eq!(llrb_tree_map::Iter::<u8, u8>::default().count(), 0);
    assert_eq!(llrb_tree_map::Keys::<u8, u8>::default().count(), 0);
    assert_eq!(llrb_tree_map::Values::<u8, u8>::default().count(), 0);
    assert_eq!(llrb_tree_map::IterMut::<u8, u8>::default().count(), 0);
    assert_eq!(llrb_tree_map::ValuesMut::<u8, u8>::default().count(), 0);
    assert_eq!(llrb_tree_map::IntoIter::<u8, u8>::default().len(), 0);
    assert_eq!(llrb_tree_map::IntoKeys::<u8, u8>::default().len(), 0);
    assert_eq!(llrb_tree_map::IntoValues::<u8, u8>::default().len(), 0);
}

#[test]
fn reverse_iteration_is_independent_of_forward() {
    let map: LLRBTreeMap<i32, i32> = (0..10).map(|k| (k, k * k)).collect();
    let mut forward = map.iter();
    let mut backward = map.iter_rev();
    assert_eq!(forward.next(), Some((&0, &0)));
    assert_eq!(backward.next(), Some((&9, &81)));
    assert_eq!(forward.count() + backward.count(), 18);
}

#[test]
fn debug_formats_like_a_map() {
    let map = LLRBTreeMap::from([(2, "b"), (1, "a")]);
    assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
    assert_eq!(format!("{:?}", map.keys()), "[1, 2]");
    assert_eq!(format!("{:?}", map.values_rev()), r#"["b", "a"]"#);
    assert_eq!(format!("{:?}", map.into_iter()), r#"[(1, "a"), (2, "b")]"#);
}

#[test]
fn extend_from_references() {
    let source = LLRBTreeMap::from([(1, 10), (2, 20)]);
    let mut map = LLRBTreeMap::from([(2, 0), (3, 30)]);
    map.extend(&source);
    assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, 10), (2, 20), (3, 30)]);
}
