// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

#[cfg(test)]
mod property_tests {
    use proptest::{
        collection::vec,
        prelude::*,
        proptest,
    };

    use crate::{
        config::Config,
        skiplist::list::SkipList,
    };

    fn seeded(seed: u64) -> SkipList<i16> {
        SkipList::with_config(Config::default().with_seed(seed)).unwrap()
    }

    proptest! {
        #[test]
        fn test_adds_keep_order(values in vec(any::<i16>(), 0..200), seed in any::<u64>()) {
            let mut list = seeded(seed);
            for v in values.iter() {
                prop_assert!(list.add(*v));
            }
            list.assert_invariants();

            let mut expected = values.clone();
            expected.sort();
            prop_assert_eq!(list.len(), expected.len());
            prop_assert_eq!(list.to_vec(), expected);
        }

        #[test]
        fn test_random_operations_match_model(
            operations in vec((0..4u8, -50i16..50, any::<prop::sample::Index>()), 1..300),
            seed in any::<u64>()
        ) {
            let mut list = seeded(seed);
            let mut model: Vec<i16> = Vec::new();

            for (op, value, index) in operations {
                match op {
                    // remove by value
                    1 => {
                        let removed = list.remove_value(&value);
                        let position = model.iter().position(|v| *v == value);
                        prop_assert_eq!(removed, position.is_some());
                        if let Some(position) = position {
                            model.remove(position);
                        }
                    },
                    // remove by index
                    2 if !model.is_empty() => {
                        let at = index.index(model.len());
                        prop_assert_eq!(list.remove(at), Ok(model.remove(at)));
                    },
                    // positional read
                    3 if !model.is_empty() => {
                        let at = index.index(model.len());
                        prop_assert_eq!(list.get(at), Ok(&model[at]));
                    },
                    _ => {
                        list.add(value);
                        let at = model.partition_point(|v| *v <= value);
                        model.insert(at, value);
                    },
                }
                prop_assert_eq!(list.len(), model.len());
            }

            list.assert_invariants();
            prop_assert_eq!(list.to_vec(), model.clone());
            for probe in -50i16..50 {
                prop_assert_eq!(list.contains(&probe), model.contains(&probe));
                prop_assert_eq!(list.index_of(&probe), model.iter().position(|v| *v == probe));
                prop_assert_eq!(list.last_index_of(&probe), model.iter().rposition(|v| *v == probe));
            }
        }

        #[test]
        fn test_same_adds_same_hash(values in vec(any::<i16>(), 0..100), a in any::<u64>(), b in any::<u64>()) {
            let mut first = seeded(a);
            let mut second = seeded(b);
            first.add_all(values.iter().copied());
            second.add_all(values.iter().copied());
            prop_assert_eq!(first.hash_code(), second.hash_code());
            prop_assert!(first == second);
        }

        #[test]
        fn test_quantiles_are_monotonic(
            values in vec(any::<i16>(), 1..200),
            q1 in 0.0f64..1.0,
            q2 in 0.0f64..1.0,
            seed in any::<u64>()
        ) {
            let mut list = seeded(seed);
            list.add_all(values);
            let (low, high) = if q1 <= q2 { (q1, q2) } else { (q2, q1) };
            prop_assert!(list.get_quantile(low).unwrap() <= list.get_quantile(high).unwrap());
        }

        #[test]
        fn test_retain_all_matches_filter(
            values in vec(0i16..20, 0..100),
            keep in vec(0i16..20, 0..10),
            seed in any::<u64>()
        ) {
            let mut list = seeded(seed);
            list.add_all(values.iter().copied());
            let mut expected: Vec<i16> = values.iter().copied().filter(|v| keep.contains(v)).collect();
            expected.sort();

            let changed = list.retain_all(&keep);
            list.assert_invariants();
            prop_assert_eq!(changed, expected.len() != values.len());
            prop_assert_eq!(list.to_vec(), expected);
        }

        #[test]
        fn test_sub_list_copies_range(values in vec(any::<i16>(), 0..100), a in 0usize..100, b in 0usize..100, seed in any::<u64>()) {
            let mut list = seeded(seed);
            list.add_all(values);
            let (from, to) = (a.min(b).min(list.len()), a.max(b).min(list.len()));

            let sub = list.sub_list(from, to).unwrap();
            sub.assert_invariants();
            prop_assert_eq!(sub.to_vec(), list.to_vec()[from..to].to_vec());
        }
    }
}
