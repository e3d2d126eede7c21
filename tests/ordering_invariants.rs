// ==============================================
// CROSS-MODE INVARIANT TESTS (integration)
// ==============================================
//
// Behavior that must hold for both ordering modes, exercised only through
// the public API.

use std::sync::{Arc, Mutex};

use evictkit::prelude::*;

const MODES: [OrderingMode; 2] = [OrderingMode::Insertion, OrderingMode::Access];

type Log = Arc<Mutex<Vec<(u32, u32)>>>;

fn map_with_log(capacity: usize, mode: OrderingMode) -> (OrderedEvictingMap<u32, u32>, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let map = OrderedMapBuilder::new()
        .capacity(capacity)
        .ordering(mode)
        .on_evict(move |k, v| sink.lock().unwrap().push((k, v)))
        .build();
    (map, log)
}

// ==============================================
// Configuration
// ==============================================

mod configuration {
    use super::*;

    #[test]
    fn zero_capacity_rejected_everywhere() {
        for mode in MODES {
            assert!(OrderedEvictingMap::<u32, u32>::new(Some(0), mode).is_err());
            assert!(
                OrderedEvictingMap::<u32, u32>::with_config(MapConfig {
                    capacity: Some(0),
                    ordering: mode,
                })
                .is_err()
            );
            assert!(
                OrderedMapBuilder::<u32, u32>::new()
                    .capacity(0)
                    .ordering(mode)
                    .try_build()
                    .is_err()
            );
        }
    }

    #[test]
    fn config_error_is_a_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(OrderedEvictingMap::<u8, u8>::new(Some(0), OrderingMode::Access).unwrap_err());
        assert!(err.to_string().contains("capacity"));
    }
}

// ==============================================
// Capacity and eviction
// ==============================================

mod eviction {
    use super::*;

    #[test]
    fn len_never_exceeds_capacity() {
        for mode in MODES {
            for capacity in 1..6 {
                let (mut map, _) = map_with_log(capacity, mode);
                for k in 0..50 {
                    map.put(k % 13, k);
                    map.get(&(k % 7));
                    assert!(map.len() <= capacity, "{mode}: cap {capacity}");
                }
                map.check_invariants().unwrap();
            }
        }
    }

    #[test]
    fn victim_is_always_head_of_traversal() {
        for mode in MODES {
            let (mut map, log) = map_with_log(4, mode);
            for k in 0..4 {
                map.put(k, k);
            }
            for round in 0..20u32 {
                map.get(&(round % 5));
                let expected = map.entries().first().copied();
                let before = log.lock().unwrap().len();
                map.put(100 + round, round);
                let log = log.lock().unwrap();
                assert_eq!(log.len(), before + 1);
                assert_eq!(log.last().copied(), expected, "{mode}");
            }
        }
    }

    #[test]
    fn each_eviction_reported_exactly_once() {
        for mode in MODES {
            let (mut map, log) = map_with_log(3, mode);
            for k in 0..100 {
                map.put(k, k * 2);
            }
            let log = log.lock().unwrap();
            assert_eq!(log.len(), 97);
            let mut keys: Vec<_> = log.iter().map(|(k, _)| *k).collect();
            keys.dedup();
            assert_eq!(keys.len(), 97);
            assert!(log.iter().all(|(k, v)| *v == k * 2));
        }
    }

    #[test]
    fn explicit_removals_are_not_evictions() {
        for mode in MODES {
            let (mut map, log) = map_with_log(5, mode);
            for k in 0..5 {
                map.put(k, k);
            }
            map.remove(&0);
            map.pop_lru();
            map.clear();
            assert!(log.lock().unwrap().is_empty(), "{mode}");
        }
    }
}

// ==============================================
// Ordering
// ==============================================

mod ordering {
    use super::*;

    #[test]
    fn new_keys_append_at_the_end() {
        for mode in MODES {
            let mut map = OrderedEvictingMap::unbounded(mode);
            for k in [5, 3, 9, 1] {
                map.put(k, ());
                assert_eq!(map.keys().last(), Some(&k));
            }
        }
    }

    #[test]
    fn removal_preserves_relative_order() {
        for mode in MODES {
            let mut map = OrderedEvictingMap::unbounded(mode);
            for k in 0..6 {
                map.put(k, k);
            }
            map.remove(&2);
            map.remove(&4);
            assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 1, 3, 5]);
        }
    }

    #[test]
    fn pure_queries_never_reorder() {
        for mode in MODES {
            let mut map = OrderedEvictingMap::unbounded(mode);
            for k in 0..5 {
                map.put(k, k);
            }
            let before = map.entries();
            for k in 0..8 {
                let _ = map.peek(&k);
                let _ = map.contains(&k);
                let _ = map.recency_rank(&k);
            }
            let _ = map.len();
            let _ = map.is_empty();
            let _ = map.peek_lru();
            let _ = map.peek_mru();
            assert_eq!(map.entries(), before, "{mode}");
        }
    }

    #[test]
    fn get_reorders_only_in_access_mode() {
        let mut insertion = OrderedEvictingMap::unbounded(OrderingMode::Insertion);
        let mut access = OrderedEvictingMap::unbounded(OrderingMode::Access);
        for k in 0..3 {
            insertion.put(k, ());
            access.put(k, ());
        }
        insertion.get(&0);
        access.get(&0);
        assert_eq!(insertion.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(access.keys().copied().collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn entries_snapshot_is_detached() {
        for mode in MODES {
            let mut map = OrderedEvictingMap::unbounded(mode);
            map.put("a", 1);
            let snapshot = map.entries();
            map.put("a", 2);
            map.put("b", 3);
            assert_eq!(snapshot, vec![("a", 1)]);
        }
    }
}

// ==============================================
// Generic use through the trait hierarchy
// ==============================================

mod traits {
    use super::*;

    fn churn<M: RecencyMap<u32, u32>>(map: &mut M) -> Vec<u32> {
        for k in 0..10 {
            map.put(k, k);
        }
        map.touch(&7);
        map.remove(&8);
        std::iter::from_fn(|| map.pop_lru().map(|(k, _)| k)).collect()
    }

    #[test]
    fn recency_map_through_generics() {
        let mut access = OrderedEvictingMap::new(Some(4), OrderingMode::Access).unwrap();
        assert_eq!(churn(&mut access), vec![6, 9, 7]);

        let mut insertion = OrderedEvictingMap::new(Some(4), OrderingMode::Insertion).unwrap();
        assert_eq!(churn(&mut insertion), vec![6, 7, 9]);
    }
}
