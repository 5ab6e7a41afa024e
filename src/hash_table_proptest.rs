#![cfg(test)]
#![allow(clippy::arithmetic_side_effects)]

// Property tests for HashTable, checked against std's HashMap as a model.
//
// After every operation the table must agree with the model on the touched key and
// on its length, and the bucket count must stay a power of two and never shrink.

use crate::{HashTable, InvalidArgument};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, i32),
    Put(Option<u8>, i32),
    Remove(u8),
    Get(u8),
    Mutate(u8, i32),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    // Keys are drawn from a small range so updates and removals hit existing entries
    prop_oneof![
        6 => (0u8..32, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (proptest::option::of(0u8..32), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => (0u8..32).prop_map(Op::Remove),
        2 => (0u8..32).prop_map(Op::Get),
        1 => (0u8..32, -1000i32..1000).prop_map(|(k, d)| Op::Mutate(k, d)),
        1 => Just(Op::Clear),
    ]
}

fn check_shape(map: &HashTable<u8, i32>, model: &HashMap<u8, i32>) -> Result<(), TestCaseError> {
    prop_assert_eq!(map.len(), model.len());
    prop_assert_eq!(map.is_empty(), model.is_empty());
    prop_assert!(map.capacity().is_power_of_two());
    prop_assert_eq!(map.iter().count(), model.len());
    Ok(())
}

proptest! {
    #[test]
    fn prop_matches_std_model(
        capacity_exp in 0u32..6,
        load_factor in prop_oneof![Just(0.75f32), 0.25f32..4.0],
        ops in proptest::collection::vec(arb_op(), 1..300),
    ) {
        let mut map: HashTable<u8, i32> =
            HashTable::with_capacity_and_load_factor(1i64 << capacity_exp, load_factor)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut model: HashMap<u8, i32> = HashMap::new();
        let mut capacity = map.capacity();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                }
                Op::Put(Some(k), v) => {
                    prop_assert_eq!(map.put(Some(k), v), Ok(model.insert(k, v)));
                }
                Op::Put(None, v) => {
                    let before = map.len();
                    prop_assert_eq!(map.put(None, v), Err(InvalidArgument::NullKey));
                    prop_assert_eq!(map.len(), before);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k).is_some());
                    prop_assert_eq!(map.get(&k), None);
                }
                Op::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k));
                }
                Op::Mutate(k, d) => {
                    if let Some(v) = map.get_mut(&k) {
                        *v = v.wrapping_add(d);
                    }
                    if let Some(v) = model.get_mut(&k) {
                        *v = v.wrapping_add(d);
                    }
                    prop_assert_eq!(map.get(&k), model.get(&k));
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            // Capacity never shrinks
            prop_assert!(map.capacity() >= capacity);
            capacity = map.capacity();
            check_shape(&map, &model)?;
        }

        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }

    #[test]
    fn prop_growth_preserves_entries(keys in proptest::collection::hash_set(any::<u32>(), 0..500)) {
        let mut map = HashTable::new();
        for &k in &keys {
            prop_assert_eq!(map.insert(k, u64::from(k) * 3), None);
        }

        prop_assert_eq!(map.len(), keys.len());
        prop_assert!(map.len() < map.threshold());
        for &k in &keys {
            prop_assert_eq!(map.get(&k), Some(&(u64::from(k) * 3)));
        }

        let copy = map.clone();
        prop_assert_eq!(&copy, &map);
        prop_assert_eq!(copy.to_string(), map.to_string());
    }

    #[test]
    fn prop_remove_all_empties(keys in proptest::collection::vec(any::<i16>(), 0..200)) {
        let mut map: HashTable<i16, usize> = keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();
        let capacity = map.capacity();

        for k in &keys {
            map.remove(k);
        }

        prop_assert!(map.is_empty());
        prop_assert_eq!(map.capacity(), capacity);
        prop_assert_eq!(map.iter().next(), None);
    }
}
