#![no_main]

use std::collections::HashMap;

use evictkit::OrderedEvictingMap;
use evictkit::config::OrderingMode;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on OrderedEvictingMap
//
// The first byte picks capacity and ordering mode; the rest is decoded as
// (op, key) pairs over put, get, peek, touch, remove, pop_lru, clear and
// shrink_to_fit.
fuzz_target!(|data: &[u8]| {
    let Some((&header, ops)) = data.split_first() else {
        return;
    };

    let mode = if header & 0x80 == 0 {
        OrderingMode::Insertion
    } else {
        OrderingMode::Access
    };
    let capacity = match header & 0x0f {
        0 => None,
        n => Some(usize::from(n)),
    };

    let mut map: OrderedEvictingMap<u8, u32> = OrderedEvictingMap::new(capacity, mode).unwrap();
    let mut shadow: HashMap<u8, u32> = HashMap::new();

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let key = pair[1] % 32;
        let value = step as u32;

        match pair[0] % 7 {
            0 => {
                let was_present = map.contains(&key);
                let lru = map.peek_lru().map(|(k, _)| *k);
                let previous = map.put(key, value);
                assert_eq!(previous, shadow.insert(key, value));
                assert_eq!(map.peek(&key), Some(&value));

                if !was_present && capacity.is_some_and(|cap| shadow.len() > cap) {
                    let victim = lru.unwrap();
                    assert!(!map.contains(&victim));
                    shadow.remove(&victim);
                }
            },
            1 => {
                let got = map.get(&key).copied();
                assert_eq!(got, shadow.get(&key).copied());
                if got.is_some() && mode == OrderingMode::Access {
                    assert_eq!(map.peek_mru().map(|(k, _)| *k), Some(key));
                }
            },
            2 => {
                assert_eq!(map.peek(&key), shadow.get(&key));
            },
            3 => {
                assert_eq!(map.touch(&key), shadow.contains_key(&key));
            },
            4 => {
                assert_eq!(map.remove(&key), shadow.remove(&key));
            },
            5 => {
                if let Some((k, v)) = map.pop_lru() {
                    assert_eq!(shadow.remove(&k), Some(v));
                } else {
                    assert!(shadow.is_empty());
                }
            },
            _ => {
                if step % 16 == 0 {
                    map.clear();
                    shadow.clear();
                } else {
                    map.shrink_to_fit();
                }
            },
        }

        assert_eq!(map.len(), shadow.len());
        if let Some(cap) = capacity {
            assert!(map.len() <= cap);
        }
    }

    map.check_invariants().unwrap();
});
