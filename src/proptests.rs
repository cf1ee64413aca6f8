use super::*;

use crate::Strategy as LookupStrategy;
use proptest::prelude::*;
// `Strategy` below is proptest's trait; the lookup enum goes by
// `LookupStrategy` in this module.
use proptest::strategy::Strategy;

fn cfg_strategy() -> impl Strategy<Value = GenConfig> {
    (1usize..=128, 1usize..=16, 0usize..=24, any::<u64>()).prop_map(
        |(count, key_len, value_len, seed)| GenConfig {
            count,
            key_len,
            value_len,
            seed: Some(seed),
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// Every strategy agrees the generated query is present, for any seed
    /// and any dataset size.
    #[test]
    fn prop_kv_strategy_parity(cfg in cfg_strategy()) {
        let data = KvDataset::generate(&cfg);

        prop_assert!(linear_scan_records(&data.records, &data.query));
        prop_assert!(hash_contains_kv(&data.map, &data.query));

        let mut sorted = data.records.clone();
        sort_records(&mut sorted);
        prop_assert!(binary_search_records(&sorted, &data.query));

        for strategy in LookupStrategy::ALL {
            let report = run_kv(&data, strategy, 2);
            prop_assert!(report.is_ok(), "{} failed: {:?}", strategy.name(), report);
        }
    }

    #[test]
    fn prop_int_strategy_parity(cfg in cfg_strategy()) {
        let data = IntDataset::generate(&cfg);

        prop_assert!(linear_scan_ints(&data.items, data.query));
        prop_assert!(hash_contains_int(&data.set, data.query));

        let mut sorted = data.items.clone();
        sort_ints(&mut sorted);
        prop_assert!(binary_search_ints(&sorted, data.query));

        for strategy in LookupStrategy::ALL {
            prop_assert!(run_ints(&data, strategy, 2).is_ok());
        }
    }

    /// Binary search after sorting locates every element the slice holds,
    /// and linear scan and hash membership agree element by element.
    #[test]
    fn prop_int_lookup_agreement(items in prop::collection::vec(any::<i64>(), 1..=200)) {
        let set: HashSet<i64> = items.iter().copied().collect();
        let mut sorted = items.clone();
        sort_ints(&mut sorted);

        for &item in &items {
            prop_assert!(linear_scan_ints(&items, item));
            prop_assert!(hash_contains_int(&set, item));
            prop_assert!(binary_search_ints(&sorted, item));
        }
    }

    /// Linear scan and binary search agree with hash-set membership for
    /// arbitrary probes, present or not.
    #[test]
    fn prop_int_absent_agreement(
        items in prop::collection::vec(any::<i64>(), 1..=200),
        probe in any::<i64>(),
    ) {
        let set: HashSet<i64> = items.iter().copied().collect();
        let mut sorted = items.clone();
        sort_ints(&mut sorted);

        let expected = set.contains(&probe);
        prop_assert_eq!(linear_scan_ints(&items, probe), expected);
        prop_assert_eq!(binary_search_ints(&sorted, probe), expected);
    }

    #[test]
    fn prop_sort_idempotent(items in prop::collection::vec(any::<i64>(), 0..=200)) {
        let mut items = items;
        sort_ints(&mut items);
        let once = items.clone();
        sort_ints(&mut items);
        prop_assert_eq!(items, once);
    }

    /// Sorting keeps records intact as a multiset: same keys, same values,
    /// keys in non-decreasing order afterwards.
    #[test]
    fn prop_sort_records_permutes(cfg in cfg_strategy()) {
        let data = KvDataset::generate(&cfg);
        let mut sorted = data.records.clone();
        sort_records(&mut sorted);

        prop_assert_eq!(sorted.len(), data.records.len());
        prop_assert!(sorted.windows(2).all(|w| w[0].key <= w[1].key));
        for record in &data.records {
            prop_assert!(sorted.contains(record));
        }
    }
}
