use std::sync::Arc;

use cw_core::{GroupedIndex, SignalRecord};
use cw_runtime::{aggregate, partition, shard_ranges, WorkerOutput};
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = SignalRecord> {
    (6u8..10, 0i64..20, 0i64..100)
        .prop_map(|(hour, signal, cars)| SignalRecord::new(format!("{hour:02}:00:00"), signal, cars))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_shards_concatenate_to_input(
        records in prop::collection::vec(record_strategy(), 0..64),
        workers in 1usize..12,
    ) {
        let shards = partition(Arc::from(records.clone()), workers).unwrap();
        prop_assert_eq!(shards.len(), workers);

        let rejoined: Vec<SignalRecord> = shards
            .iter()
            .flat_map(|shard| shard.records().iter().cloned())
            .collect();
        prop_assert_eq!(rejoined, records);

        let sizes: Vec<usize> = shards.iter().map(|shard| shard.len()).collect();
        let max = sizes.iter().copied().max().unwrap_or(0);
        let min = sizes.iter().copied().min().unwrap_or(0);
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn prop_ranges_cover_without_gaps(len in 0usize..500, workers in 1usize..32) {
        let ranges = shard_ranges(len, workers);
        let mut cursor = 0;
        for range in &ranges {
            prop_assert_eq!(range.start, cursor);
            cursor = range.end;
        }
        prop_assert_eq!(cursor, len);
    }

    #[test]
    fn prop_merge_ignores_completion_order(
        (records, workers, order) in (prop::collection::vec(record_strategy(), 0..64), 1usize..8)
            .prop_flat_map(|(records, workers)| {
                let order: Vec<usize> = (0..workers).collect();
                (Just(records), Just(workers), Just(order).prop_shuffle())
            }),
        grouped in any::<bool>(),
    ) {
        let shards = partition(Arc::from(records.clone()), workers).unwrap();
        let outputs: Vec<WorkerOutput> = shards
            .iter()
            .map(|shard| {
                let local = shard.records().to_vec();
                if grouped {
                    WorkerOutput::Grouped(local.into_iter().collect())
                } else {
                    WorkerOutput::Forwarded(local)
                }
            })
            .collect();

        let in_order = aggregate(outputs.clone());
        let shuffled = aggregate(order.iter().map(|&i| outputs[i].clone()));
        let reference: GroupedIndex = records.into_iter().collect();

        prop_assert!(in_order.equivalent(&shuffled));
        prop_assert!(shuffled.equivalent(&reference));
    }
}
