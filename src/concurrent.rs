//! # Shared Ordered Map
//!
//! [`ConcurrentOrderedMap`] puts an [`OrderedEvictingMap`] behind one
//! `parking_lot::RwLock` so it can be shared between threads.
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                   ConcurrentOrderedMap<K, V>                     │
//!   │                                                                  │
//!   │   shared: Arc<Shared<K, V>>          (one per map, not handle)   │
//!   │     map:      RwLock<OrderedEvictingMap<K, V>>                   │
//!   │     listener: RwLock<Option<Arc<dyn Fn(K, V) + Send + Sync>>>    │
//!   └──────────────────────────────────────────────────────────────────┘
//!
//!   put(k, v)
//!   ═══════════════════════════════════════════════════════════════════
//!     1. write lock on map
//!     2. insert; detach the evicted entry (if any)
//!     3. unlock
//!     4. clone the current listener Arc
//!     5. listener(evicted_key, evicted_value)      ← no lock held
//!     6. return previous value
//! ```
//!
//! ## Lock Usage
//!
//! | Method                                   | Lock  |
//! |------------------------------------------|-------|
//! | `put`, `get`, `get_with`, `touch`        | write |
//! | `remove`, `pop_lru`, `clear`             | write |
//! | `set_capacity`                           | write |
//! | `peek`, `contains`, `len`, `entries`     | read  |
//! | `recency_rank`, `capacity`               | read  |
//!
//! `get` needs the write lock because under access ordering a hit moves the
//! entry. Listeners always run after the lock is released, so a listener may
//! call back into the same map.

use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::{MapConfig, OrderingMode};
use crate::error::{ConfigError, InvariantError};
use crate::map::{BoxedListener, OrderedEvictingMap};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::MapMetricsSnapshot;
use crate::traits::EvictionListener;

type SharedListener<K, V> = Arc<dyn Fn(K, V) + Send + Sync>;

struct Shared<K, V> {
    map: RwLock<OrderedEvictingMap<K, V>>,
    listener: RwLock<Option<SharedListener<K, V>>>,
}

/// Thread-safe handle to an ordered, optionally bounded map.
///
/// Cloning the handle shares the same map and listener. Installing or
/// clearing the listener through any handle affects every clone, including
/// ones made earlier.
///
/// # Example
///
/// ```
/// use evictkit::concurrent::ConcurrentOrderedMap;
/// use evictkit::config::OrderingMode;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let evictions = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&evictions);
/// let map = ConcurrentOrderedMap::new(Some(2), OrderingMode::Access)
///     .unwrap()
///     .with_on_evict(move |_k: u32, _v: String| {
///         counter.fetch_add(1, Ordering::Relaxed);
///     });
///
/// let handle = map.clone();
/// std::thread::spawn(move || {
///     handle.put(1, "one".to_string());
///     handle.put(2, "two".to_string());
/// })
/// .join()
/// .unwrap();
///
/// map.put(3, "three".to_string());
/// assert_eq!(map.len(), 2);
/// assert_eq!(evictions.load(Ordering::Relaxed), 1);
/// ```
pub struct ConcurrentOrderedMap<K, V> {
    shared: Arc<Shared<K, V>>,
}

impl<K, V> Clone for ConcurrentOrderedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, V> fmt::Debug for ConcurrentOrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.shared.map.read();
        f.debug_struct("ConcurrentOrderedMap")
            .field("len", &map.len())
            .field("capacity", &map.capacity())
            .field("ordering", &map.ordering_mode())
            .field("has_listener", &self.shared.listener.read().is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for ConcurrentOrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::wrap(OrderedEvictingMap::default(), None)
    }
}

impl<K, V> ConcurrentOrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared map. Returns [`ConfigError`] for `Some(0)`.
    pub fn new(capacity: Option<usize>, ordering: OrderingMode) -> Result<Self, ConfigError> {
        Self::with_config(MapConfig { capacity, ordering })
    }

    pub fn with_config(config: MapConfig) -> Result<Self, ConfigError> {
        OrderedEvictingMap::with_config(config).map(|map| Self::wrap(map, None))
    }

    fn wrap(map: OrderedEvictingMap<K, V>, listener: Option<SharedListener<K, V>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                map: RwLock::new(map),
                listener: RwLock::new(listener),
            }),
        }
    }

    /// Installs `f` as the eviction listener and returns the handle.
    pub fn with_on_evict<F>(self, f: F) -> Self
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        self.set_on_evict(f);
        self
    }

    /// Installs `f` as the eviction listener of the shared map, replacing
    /// any previous one. Every handle reports through it from now on.
    pub fn set_on_evict<F>(&self, f: F)
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        *self.shared.listener.write() = Some(Arc::new(f));
    }

    /// Removes the eviction listener. Returns `true` if one was installed.
    pub fn clear_on_evict(&self) -> bool {
        self.shared.listener.write().take().is_some()
    }

    pub fn has_eviction_listener(&self) -> bool {
        self.shared.listener.read().is_some()
    }

    /// Inserts or updates `key`, returning the previous value.
    ///
    /// An entry evicted to make room is passed to the listener after the
    /// write lock is released and before this call returns.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let (previous, evicted) = self.shared.map.write().put_detached(key, value);
        if let Some((key, value)) = evicted {
            self.notify_evicted(key, value);
        }
        previous
    }

    /// Looks up `key` and clones its value. Reorders under access ordering.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shared.map.write().get(key).cloned()
    }

    /// Looks up `key` and applies `f` to the value inside the lock.
    ///
    /// ```
    /// use evictkit::concurrent::ConcurrentOrderedMap;
    /// use evictkit::config::OrderingMode;
    ///
    /// let map = ConcurrentOrderedMap::new(None, OrderingMode::Insertion).unwrap();
    /// map.put("key", vec![1, 2, 3]);
    /// assert_eq!(map.get_with(&"key", |v| v.len()), Some(3));
    /// ```
    pub fn get_with<F, R>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.shared.map.write().get(key).map(f)
    }

    /// Clones the value for `key` without affecting order.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shared.map.read().peek(key).cloned()
    }

    pub fn peek_with<F, R>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.shared.map.read().peek(key).map(f)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shared.map.read().contains(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.shared.map.write().touch(key)
    }

    /// Removes `key`. The listener is not called.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shared.map.write().remove(key)
    }

    /// Removes several keys under one write lock; results are in input order.
    pub fn remove_batch(&self, keys: &[K]) -> Vec<Option<V>> {
        let mut map = self.shared.map.write();
        keys.iter().map(|k| map.remove(k)).collect()
    }

    /// Removes the least-recently-used entry. The listener is not called.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.shared.map.write().pop_lru()
    }

    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.shared.map.read().recency_rank(key)
    }

    pub fn len(&self) -> usize {
        self.shared.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.map.read().is_empty()
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.shared.map.read().capacity()
    }

    pub fn ordering_mode(&self) -> OrderingMode {
        self.shared.map.read().ordering_mode()
    }

    /// Consistent snapshot of all entries from LRU to MRU.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.shared.map.read().entries()
    }

    /// Changes the capacity bound; see
    /// [`OrderedEvictingMap::set_capacity`]. Evicted entries reach the
    /// listener after the lock is released.
    pub fn set_capacity(&self, capacity: Option<NonZeroUsize>) -> usize {
        let evicted = self.shared.map.write().set_capacity_detached(capacity);
        let count = evicted.len();
        if let Some(listener) = self.current_listener() {
            for (key, value) in evicted {
                listener(key, value);
            }
        }
        count
    }

    /// Removes every entry. The listener is not called.
    pub fn clear(&self) {
        self.shared.map.write().clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.shared.map.read().check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> MapMetricsSnapshot {
        self.shared.map.read().metrics_snapshot()
    }

    fn current_listener(&self) -> Option<SharedListener<K, V>> {
        self.shared.listener.read().clone()
    }

    fn notify_evicted(&self, key: K, value: V) {
        if let Some(listener) = self.current_listener() {
            listener(key, value);
        }
    }
}

impl<K, V> ConcurrentOrderedMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
{
    /// Wraps an existing map.
    ///
    /// A listener already installed on `map` keeps receiving evictions. It
    /// runs outside the map lock but behind a mutex of its own, so it must
    /// not cause another eviction of this map from inside the callback.
    pub fn from_map(mut map: OrderedEvictingMap<K, V>) -> Self {
        let listener = map.take_listener().map(|inner| {
            tracing::debug!("carrying existing eviction listener into shared map");
            serialized(inner)
        });
        Self::wrap(map, listener)
    }
}

/// Adapts a `FnMut` listener taken from a plain map to the shared `Fn` form.
fn serialized<K, V>(inner: BoxedListener<K, V>) -> SharedListener<K, V>
where
    K: 'static,
    V: 'static,
{
    let inner = Mutex::new(inner);
    Arc::new(move |key: K, value: V| inner.lock().on_evict(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_basic_ops() {
        let map = ConcurrentOrderedMap::new(Some(3), OrderingMode::Access).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.put(1, "a"), None);
        assert_eq!(map.put(1, "b"), Some("a"));
        assert_eq!(map.get(&1), Some("b"));
        assert_eq!(map.peek(&2), None);
        assert!(map.contains(&1));
        assert_eq!(map.capacity(), NonZeroUsize::new(3));
        assert_eq!(map.ordering_mode(), OrderingMode::Access);
        assert_eq!(map.remove(&1), Some("b"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(ConcurrentOrderedMap::<u8, u8>::new(Some(0), OrderingMode::Insertion).is_err());
    }

    #[test]
    fn test_listener_runs_after_unlock() {
        let map = ConcurrentOrderedMap::new(Some(1), OrderingMode::Access).unwrap();
        let observer = map.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let map = map.with_on_evict(move |k: u32, v: u32| {
            // Would deadlock if the write lock were still held.
            let len = observer.len();
            sink.lock().unwrap().push((k, v, len));
        });

        map.put(1, 10);
        map.put(2, 20);
        assert_eq!(*seen.lock().unwrap(), vec![(1, 10, 1)]);
    }

    #[test]
    fn test_listener_can_reenter_with_writes() {
        let base = ConcurrentOrderedMap::new(Some(2), OrderingMode::Insertion).unwrap();
        let archive = ConcurrentOrderedMap::new(None, OrderingMode::Insertion).unwrap();
        let reentrant = base.clone();
        let sink = archive.clone();
        let map = base.with_on_evict(move |k: u32, v: u32| {
            sink.put(k, v);
            reentrant.remove(&(k + 100));
        });

        map.put(1, 1);
        map.put(101, 0);
        map.put(2, 2);
        map.check_invariants().unwrap();
        assert_eq!(archive.entries(), vec![(1, 1)]);
        assert_eq!(map.entries(), vec![(2, 2)]);
    }

    #[test]
    fn test_set_capacity_notifies() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let map = ConcurrentOrderedMap::new(None, OrderingMode::Insertion)
            .unwrap()
            .with_on_evict(move |_: u8, _: u8| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        for k in 0..10 {
            map.put(k, k);
        }
        assert_eq!(map.set_capacity(NonZeroUsize::new(4)), 6);
        assert_eq!(count.load(Ordering::SeqCst), 6);
        assert_eq!(map.entries().first(), Some(&(6, 6)));
    }

    #[test]
    fn test_parallel_puts_respect_capacity() {
        let evicted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evicted);
        let map = ConcurrentOrderedMap::new(Some(64), OrderingMode::Access)
            .unwrap()
            .with_on_evict(move |_: u32, _: u32| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let map = map.clone();
                thread::spawn(move || {
                    for i in 0..250u32 {
                        let key = t * 1000 + i;
                        map.put(key, i);
                        map.get(&key);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(map.len(), 64);
        assert_eq!(evicted.load(Ordering::SeqCst), 1000 - 64);
        map.check_invariants().unwrap();
    }

    #[test]
    fn test_from_map_keeps_existing_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut inner = OrderedEvictingMap::new(Some(2), OrderingMode::Insertion).unwrap();
        let mut calls = 0;
        inner.set_on_evict(move |k: u8, v: u8| {
            calls += 1;
            sink.lock().unwrap().push((k, v, calls));
        });

        let map = ConcurrentOrderedMap::from_map(inner);
        assert!(map.has_eviction_listener());
        let other = map.clone();
        map.put(1, 10);
        map.put(2, 20);
        other.put(3, 30);
        map.put(4, 40);
        assert_eq!(*seen.lock().unwrap(), vec![(1, 10, 1), (2, 20, 2)]);
    }

    #[test]
    fn test_listener_set_and_cleared_through_any_handle() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let map = ConcurrentOrderedMap::new(Some(1), OrderingMode::Access).unwrap();
        let other = map.clone();
        assert!(!other.has_eviction_listener());

        other.set_on_evict(move |_: u8, _: u8| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(map.has_eviction_listener());
        map.put(1, 1);
        map.put(2, 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(map.clear_on_evict());
        assert!(!other.has_eviction_listener());
        other.put(3, 3);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!other.clear_on_evict());
    }

    #[test]
    fn test_from_map_and_debug() {
        let mut inner = OrderedEvictingMap::unbounded(OrderingMode::Access);
        inner.put("x", 1);
        inner.set_on_evict(|_, _| {});
        let map = ConcurrentOrderedMap::from_map(inner);
        assert!(map.has_eviction_listener());
        assert_eq!(map.peek_with(&"x", |v| v + 1), Some(2));
        assert_eq!(map.recency_rank(&"x"), Some(0));
        assert!(map.touch(&"x"));
        assert_eq!(map.remove_batch(&["x", "y"]), vec![Some(1), None]);
        assert_eq!(map.pop_lru(), None);
        let rendered = format!("{map:?}");
        assert!(rendered.contains("ConcurrentOrderedMap"));
        map.clear();
    }
}
