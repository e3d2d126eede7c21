//! # Map Trait Hierarchy
//!
//! Generic code can be written against these traits instead of the concrete
//! [`OrderedEvictingMap`](crate::OrderedEvictingMap), following the same
//! layering as a cache policy hierarchy: universal operations first,
//! removal second, recency-specific operations last.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreMap<K, V>                │
//!   │  put(&mut, K, V) → Option<V>            │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains / len / is_empty / capacity   │
//!   │  clear(&mut)                            │
//!   └───────────────────┬─────────────────────┘
//!                       ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableMap<K, V>              │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K])                     │
//!   └───────────────────┬─────────────────────┘
//!                       ▼
//!   ┌─────────────────────────────────────────┐
//!   │           RecencyMap<K, V>              │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//!
//!   EvictionListener<K, V>   (blanket impl for FnMut(K, V))
//! ```
//!
//! ## Purity
//!
//! [`CoreMap::get`] takes `&mut self` because under access ordering a hit
//! reorders the map. [`CoreMap::contains`], [`CoreMap::len`] and
//! [`CoreMap::capacity`] take `&self` and never reorder.

use std::num::NonZeroUsize;

/// Operations every ordered map supports.
///
/// # Example
///
/// ```
/// use evictkit::OrderedEvictingMap;
/// use evictkit::config::OrderingMode;
/// use evictkit::traits::CoreMap;
///
/// fn warm<M: CoreMap<u64, String>>(map: &mut M, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         map.put(*key, value.to_string());
///     }
/// }
///
/// let mut map = OrderedEvictingMap::unbounded(OrderingMode::Insertion);
/// warm(&mut map, &[(1, "one"), (2, "two")]);
/// assert_eq!(map.len(), 2);
/// ```
pub trait CoreMap<K, V> {
    /// Inserts or updates `key`, returning the previous value if it existed.
    ///
    /// May evict the least-recently-used entry when the map is bounded.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`. Under access ordering a hit counts as a use.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks for `key` without affecting order.
    fn contains(&self, key: &K) -> bool;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry bound, or `None` when unbounded.
    fn capacity(&self) -> Option<NonZeroUsize>;

    /// Removes all entries. Never reported as evictions.
    fn clear(&mut self);
}

/// Maps that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use evictkit::OrderedEvictingMap;
/// use evictkit::config::OrderingMode;
/// use evictkit::traits::{CoreMap, MutableMap};
///
/// let mut map = OrderedEvictingMap::unbounded(OrderingMode::Access);
/// map.put(1, "one");
/// map.put(2, "two");
/// map.put(3, "three");
///
/// let removed = map.remove_batch(&[1, 99, 3]);
/// assert_eq!(removed, vec![Some("one"), None, Some("three")]);
/// assert_eq!(map.len(), 1);
/// ```
pub trait MutableMap<K, V>: CoreMap<K, V> {
    /// Removes `key` and returns its value. Never reported as an eviction.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys; results are in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Operations on the recency (traversal) order.
pub trait RecencyMap<K, V>: MutableMap<K, V> {
    /// Removes and returns the least-recently-used entry.
    ///
    /// This is an explicit removal, not an eviction: listeners do not fire.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// The least-recently-used entry, without removing it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as used without reading it. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in traversal order; 0 is least-recently-used.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Receives entries removed because the map exceeded its capacity.
///
/// Called synchronously, exactly once per eviction, before the `put` that
/// caused it returns. Explicit `remove`, `pop_lru` and `clear` do not call
/// it.
///
/// Any `FnMut(K, V)` is a listener:
///
/// ```
/// use evictkit::OrderedMapBuilder;
/// use std::sync::{Arc, Mutex};
///
/// let evicted = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&evicted);
/// let mut map = OrderedMapBuilder::new()
///     .capacity(1)
///     .on_evict(move |k, v| sink.lock().unwrap().push((k, v)))
///     .build();
///
/// map.put("a", 1);
/// map.put("b", 2);
/// assert_eq!(*evicted.lock().unwrap(), vec![("a", 1)]);
/// ```
pub trait EvictionListener<K, V> {
    fn on_evict(&mut self, key: K, value: V);
}

impl<K, V, F> EvictionListener<K, V> for F
where
    F: FnMut(K, V),
{
    #[inline]
    fn on_evict(&mut self, key: K, value: V) {
        self(key, value)
    }
}
