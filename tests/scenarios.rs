//! Behavioural tests for the public index API.
//!
//! Covers the fixed scenarios plus a model check that replays seeded
//! random operation sequences against `BTreeSet`.

use std::collections::BTreeSet;

use skip_index::{ConfigError, IndexError, SkipList, SkipListConfig};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn new_list(seed: u64) -> SkipList<u32> {
    SkipList::new(SkipListConfig::new(32, 0.25).with_seed(seed)).unwrap()
}

fn filled(seed: u64, keys: impl IntoIterator<Item = u32>) -> SkipList<u32> {
    let mut list = new_list(seed);
    for key in keys {
        assert!(list.insert(key));
    }
    list
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn scenario_insert_in_order() {
    let list = filled(1, 0..10);

    assert_eq!(list.len(), 10);
    assert!(list.contains(&5));
    assert!(!list.contains(&50));
}

#[test]
fn scenario_remove_one() {
    let mut list = filled(1, 0..10);

    assert!(list.remove(&5));
    assert!(!list.contains(&5));
    assert_eq!(list.len(), 9);
    for key in (0..10).filter(|&k| k != 5) {
        assert!(list.contains(&key), "key {} lost", key);
    }
    list.validate().unwrap();
}

#[test]
fn scenario_duplicate_insert() {
    let mut list = new_list(1);

    assert!(list.insert(7));
    assert!(!list.insert(7));
    assert_eq!(list.len(), 1);
}

#[test]
fn scenario_remove_from_empty() {
    let mut list = new_list(1);

    for key in [0, 1, u32::MAX] {
        assert!(!list.remove(&key));
        assert_eq!(list.try_remove(&key), Err(IndexError::KeyNotFound));
    }
    assert_eq!(list.len(), 0);
}

#[test]
fn scenario_zero_max_height_rejected() {
    let result = SkipList::<u32>::new(SkipListConfig::new(0, 0.25));

    assert_eq!(
        result.unwrap_err(),
        IndexError::InvalidConfiguration(ConfigError::ZeroMaxHeight)
    );
}

#[test]
fn scenario_probability_out_of_range_rejected() {
    for p in [0.0, 1.0, -0.5, 2.0] {
        assert!(matches!(
            SkipList::<u32>::new(SkipListConfig::new(32, p)),
            Err(IndexError::InvalidConfiguration(ConfigError::ProbabilityOutOfRange(_)))
        ));
    }
}

#[test]
fn scenario_large_max_height_accepted() {
    for max_height in [65, 100] {
        let config = SkipListConfig::new(max_height, 0.25).with_seed(max_height as u64);
        let mut list = SkipList::<u32>::new(config).unwrap();

        for key in 0..1_000 {
            assert!(list.insert(key));
        }
        assert_eq!(list.max_height(), max_height);
        assert_eq!(list.len(), 1_000);
        list.validate().unwrap();
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn inserted_keys_found_others_not() {
    let keys: Vec<u32> = (0..2_000).map(|k| k * 2).collect();
    let list = filled(7, keys.iter().copied().rev());

    for key in &keys {
        assert!(list.contains(key));
        assert!(!list.contains(&(key + 1)));
    }
}

#[test]
fn failed_operations_leave_index_unchanged() {
    let mut list = filled(3, (0..500).map(|k| k * 5));
    let root = list.shape_root();
    let keys: Vec<u32> = list.iter().copied().collect();

    // Duplicate inserts and absent removes
    for key in (0..500).map(|k| k * 5) {
        assert!(!list.insert(key));
    }
    for key in (0..500).map(|k| k * 5 + 1) {
        assert!(!list.remove(&key));
    }

    assert_eq!(list.shape_root(), root);
    assert_eq!(list.len(), 500);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), keys);
}

#[test]
fn len_tracks_inserts_and_removes() {
    let mut list = filled(9, 0..1_000);
    assert_eq!(list.len(), 1_000);

    for key in (0..1_000).step_by(4) {
        assert!(list.remove(&key));
    }
    assert_eq!(list.len(), 750);
}

/// Replay a seeded mix of inserts and removes against `BTreeSet`,
/// checking every invariant after each mutation.
#[test]
fn matches_btreeset_model() {
    const OPS: usize = 5_000;
    const KEY_SPACE: u32 = 512;

    for seed in 0..8u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut list = new_list(seed);
        let mut model = BTreeSet::new();

        for _ in 0..OPS {
            let key = rng.gen_range(0..KEY_SPACE);
            if rng.gen_bool(0.6) {
                assert_eq!(list.insert(key), model.insert(key), "insert {}", key);
            } else {
                assert_eq!(list.remove(&key), model.remove(&key), "remove {}", key);
            }

            list.validate().unwrap();
            assert_eq!(list.len(), model.len());
        }

        assert!(list.iter().eq(model.iter()));
        assert_eq!(list.first(), model.iter().next());
    }
}

#[test]
fn drain_to_empty_resets_height() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut keys: Vec<u32> = (0..3_000).collect();
    let mut list = filled(77, keys.iter().copied());
    assert!(list.height() > 1);

    while !keys.is_empty() {
        let idx = rng.gen_range(0..keys.len());
        let key = keys.swap_remove(idx);
        assert_eq!(list.try_remove(&key), Ok(key));
    }

    assert!(list.is_empty());
    assert_eq!(list.height(), 1);
    list.validate().unwrap();
}
