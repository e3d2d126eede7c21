//! # Ordered Evicting Map
//!
//! A hash map that remembers the order of its entries, either by first
//! insertion or by most recent use, and optionally holds at most `capacity`
//! entries by evicting the least-recently-used one.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     OrderedEvictingMap<K, V>                         │
//!   │                                                                      │
//!   │   ┌────────────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<K, SlotId>  (index)                                 │ │
//!   │   │    "x" ──────────────────────┐                                 │ │
//!   │   │    "y" ────────────────┐     │                                 │ │
//!   │   │    "z" ──────────┐     │     │                                 │ │
//!   │   └──────────────────┼─────┼─────┼─────────────────────────────────┘ │
//!   │                      ▼     ▼     ▼                                   │
//!   │   ┌────────────────────────────────────────────────────────────────┐ │
//!   │   │  IntrusiveList<Entry<K, V>>  (traversal order, in SlotArena)   │ │
//!   │   │                                                                │ │
//!   │   │  head ──► [x: 1] ◄──► [y: 2] ◄──► [z: 3] ◄── tail              │ │
//!   │   │           (LRU)                    (MRU)                       │ │
//!   │   └────────────────────────────────────────────────────────────────┘ │
//!   │                                                                      │
//!   │   capacity: Option<NonZeroUsize>   ordering: Insertion | Access      │
//!   │   on_evict: Option<Box<dyn EvictionListener<K, V> + Send + Sync>>    │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   put(w) on a full map (capacity = 3)
//!   ═══════════════════════════════════════════════════════════════════════
//!     before:  head ──► [x] ◄──► [y] ◄──► [z] ◄── tail
//!     1. push [w] at tail                      (len = 4)
//!     2. pop [x] from head, drop from index    (len = 3)
//!     3. on_evict(x, value_of_x)
//!     after:   head ──► [y] ◄──► [z] ◄──► [w] ◄── tail
//!
//!   get(y) under Access ordering
//!   ═══════════════════════════════════════════════════════════════════════
//!     index lookup: O(1), move_to_back: O(1)
//!     after:   head ──► [z] ◄──► [w] ◄──► [y] ◄── tail
//!
//!   get(y) under Insertion ordering: order untouched.
//! ```
//!
//! ## Methods
//!
//! | Method              | Complexity | Reorders (Access mode) | Notes                       |
//! |---------------------|------------|------------------------|-----------------------------|
//! | `put(k, v)`         | O(1)*      | yes                    | may evict one LRU entry     |
//! | `get(&k)`           | O(1)       | yes                    | **not** a pure query        |
//! | `get_mut(&k)`       | O(1)       | yes                    |                             |
//! | `peek(&k)`          | O(1)       | no                     | pure lookup                 |
//! | `touch(&k)`         | O(1)       | yes                    |                             |
//! | `remove(&k)`        | O(1)       | n/a                    | listener not called         |
//! | `pop_lru()`         | O(1)       | n/a                    | listener not called         |
//! | `contains` / `len`  | O(1)       | no                     |                             |
//! | `entries()`         | O(n)       | no                     | owned snapshot, LRU → MRU   |
//! | `recency_rank(&k)`  | O(n)       | no                     | 0 = LRU                     |
//! | `set_capacity(..)`  | O(evicted) | n/a                    | evictions reach listener    |
//! | `clear()`           | O(n)       | n/a                    | listener not called         |
//!
//! ## Reentrancy
//!
//! Mutating methods take `&mut self` and the listener is owned by the map,
//! so a listener has no path back to the map that is evicting into it; the
//! borrow checker rejects such code. For shared use across threads see
//! `ConcurrentOrderedMap` (feature `concurrency`), which runs listeners
//! after releasing its lock.
//!
//! ## Thread Safety
//!
//! `OrderedEvictingMap` is `Send` and `Sync` when `K` and `V` are (listeners
//! must be `Send + Sync`), and performs no internal locking.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;

use rustc_hash::FxHashMap;

use crate::config::{MapConfig, OrderingMode};
use crate::ds::intrusive_list::{self, IntrusiveList};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::MapMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::MapMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, MetricsSnapshotProvider, OrderedMapMetricsReadRecorder,
    OrderedMapMetricsRecorder,
};
use crate::traits::{CoreMap, EvictionListener, MutableMap, RecencyMap};

/// Upper bound on up-front allocation for bounded maps.
const MAX_PREALLOC: usize = 4096;

pub(crate) type BoxedListener<K, V> = Box<dyn EvictionListener<K, V> + Send + Sync>;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Hash map with deterministic traversal order and optional LRU eviction.
///
/// # Example
///
/// ```
/// use evictkit::OrderedEvictingMap;
/// use evictkit::config::OrderingMode;
///
/// let mut cache = OrderedEvictingMap::new(Some(3), OrderingMode::Access).unwrap();
/// cache.put(1, "A");
/// cache.put(2, "B");
/// cache.put(3, "C");
///
/// assert_eq!(cache.get(&1), Some(&"A"));
/// cache.put(4, "D"); // evicts 2, the least recently used
///
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.entries(), vec![(3, "C"), (1, "A"), (4, "D")]);
/// ```
pub struct OrderedEvictingMap<K, V> {
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<Entry<K, V>>,
    capacity: Option<NonZeroUsize>,
    ordering: OrderingMode,
    on_evict: Option<BoxedListener<K, V>>,
    #[cfg(feature = "metrics")]
    metrics: MapMetrics,
}

impl<K, V> OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a map with an optional capacity bound.
    ///
    /// Returns [`ConfigError`] when `capacity` is `Some(0)`.
    ///
    /// ```
    /// use evictkit::OrderedEvictingMap;
    /// use evictkit::config::OrderingMode;
    ///
    /// let map: OrderedEvictingMap<u32, u32> =
    ///     OrderedEvictingMap::new(None, OrderingMode::Insertion).unwrap();
    /// assert_eq!(map.capacity(), None);
    ///
    /// assert!(OrderedEvictingMap::<u32, u32>::new(Some(0), OrderingMode::Access).is_err());
    /// ```
    pub fn new(capacity: Option<usize>, ordering: OrderingMode) -> Result<Self, ConfigError> {
        Self::with_config(MapConfig { capacity, ordering })
    }

    /// Creates a map from a [`MapConfig`].
    pub fn with_config(config: MapConfig) -> Result<Self, ConfigError> {
        match config.validate() {
            Ok(capacity) => Ok(Self::from_parts(capacity, config.ordering, None)),
            Err(err) => {
                tracing::debug!(
                    capacity = ?config.capacity,
                    ordering = %config.ordering,
                    error = %err,
                    "rejected ordered map configuration"
                );
                Err(err)
            },
        }
    }

    /// Creates a map that never evicts.
    pub fn unbounded(ordering: OrderingMode) -> Self {
        Self::from_parts(None, ordering, None)
    }

    /// Creates a map holding at most `capacity` entries.
    pub fn bounded(capacity: NonZeroUsize, ordering: OrderingMode) -> Self {
        Self::from_parts(Some(capacity), ordering, None)
    }

    pub(crate) fn from_parts(
        capacity: Option<NonZeroUsize>,
        ordering: OrderingMode,
        on_evict: Option<BoxedListener<K, V>>,
    ) -> Self {
        let prealloc = capacity.map_or(0, |n| n.get().min(MAX_PREALLOC));
        Self {
            index: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            list: IntrusiveList::with_capacity(prealloc),
            capacity,
            ordering,
            on_evict,
            #[cfg(feature = "metrics")]
            metrics: MapMetrics::default(),
        }
    }

    /// Installs `f` as the eviction listener, replacing any previous one.
    pub fn set_on_evict<F>(&mut self, f: F)
    where
        F: FnMut(K, V) + Send + Sync + 'static,
    {
        self.on_evict = Some(Box::new(f));
    }

    /// Installs a listener type, replacing any previous one.
    pub fn set_eviction_listener<L>(&mut self, listener: L)
    where
        L: EvictionListener<K, V> + Send + Sync + 'static,
    {
        self.on_evict = Some(Box::new(listener));
    }

    pub(crate) fn replace_listener(&mut self, listener: Option<BoxedListener<K, V>>) {
        self.on_evict = listener;
    }

    pub(crate) fn take_listener(&mut self) -> Option<BoxedListener<K, V>> {
        self.on_evict.take()
    }

    /// Removes the eviction listener. Returns `true` if one was installed.
    pub fn clear_on_evict(&mut self) -> bool {
        self.take_listener().is_some()
    }

    pub fn has_eviction_listener(&self) -> bool {
        self.on_evict.is_some()
    }

    /// Entry bound, or `None` when unbounded.
    #[inline]
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    #[inline]
    pub fn ordering_mode(&self) -> OrderingMode {
        self.ordering
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Inserts or updates `key`.
    ///
    /// - Existing key: the value is replaced and the previous one returned.
    ///   Under [`OrderingMode::Access`] the entry moves to the MRU end; under
    ///   [`OrderingMode::Insertion`] it keeps its position. Updates never
    ///   evict.
    /// - New key: appended at the MRU end. If that takes the map over
    ///   capacity, the LRU entry is removed and handed to the eviction
    ///   listener before this call returns.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let (previous, evicted) = self.put_detached(key, value);
        if let Some((key, value)) = evicted {
            self.notify_evicted(key, value);
        }
        previous
    }

    /// Same as [`put`](Self::put) but returns the evicted entry instead of
    /// calling the listener.
    pub(crate) fn put_detached(&mut self, key: K, value: V) -> (Option<V>, Option<(K, V)>) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .list
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
            debug_assert!(previous.is_some(), "index points at a freed slot");
            if self.ordering.tracks_access() {
                self.list.move_to_back(id);
            }
            return (previous, None);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.list.push_back(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        let evicted = if self.exceeds_capacity() {
            self.evict_lru()
        } else {
            None
        };

        debug_assert_eq!(self.index.len(), self.list.len());
        (None, evicted)
    }

    /// Looks up `key`.
    ///
    /// Under [`OrderingMode::Access`] a hit counts as a use and moves the
    /// entry to the MRU end, so this is **not** a pure query; use
    /// [`peek`](Self::peek) or [`contains`](Self::contains) for that.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.lookup_and_promote(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Mutable lookup with the same ordering effect as [`get`](Self::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.lookup_and_promote(key)?;
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Looks up `key` without affecting order, in either mode.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let id = *self.index.get(key)?;
        let value = self.list.get(id).map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        if value.is_some() {
            (&self.metrics).record_peek_found();
        }
        value
    }

    /// Returns `true` if `key` is present. Never reorders.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Marks `key` as used without reading it.
    ///
    /// Returns whether the key is present. Under [`OrderingMode::Insertion`]
    /// the order is left alone.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.ordering.tracks_access() {
            self.list.move_to_back(id);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();
        true
    }

    /// Removes `key` and returns its value. The eviction listener is not
    /// called.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let entry = self.list.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        debug_assert_eq!(self.index.len(), self.list.len());
        Some((entry.key, entry.value))
    }

    /// Removes and returns the least-recently-used entry.
    ///
    /// This is an explicit removal; the eviction listener is not called.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.list.pop_front()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    /// The least-recently-used entry: first in traversal order, next to be
    /// evicted.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.front().map(|entry| (&entry.key, &entry.value))
    }

    /// The most-recently-used entry: last in traversal order.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Position of `key` in traversal order, where 0 is the LRU end. O(n).
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let target = *self.index.get(key)?;
        let rank = self.list.iter_ids().position(|id| {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            id == target
        });

        #[cfg(feature = "metrics")]
        if rank.is_some() {
            (&self.metrics).record_recency_rank_found();
        }
        rank
    }

    /// Changes the capacity bound.
    ///
    /// Shrinking below the current length evicts LRU entries one at a time,
    /// each reported to the eviction listener. Returns how many were evicted.
    pub fn set_capacity(&mut self, capacity: Option<NonZeroUsize>) -> usize {
        let evicted = self.set_capacity_detached(capacity);
        let count = evicted.len();
        for (key, value) in evicted {
            self.notify_evicted(key, value);
        }
        count
    }

    pub(crate) fn set_capacity_detached(
        &mut self,
        capacity: Option<NonZeroUsize>,
    ) -> Vec<(K, V)> {
        tracing::debug!(
            from = ?self.capacity.map(NonZeroUsize::get),
            to = ?capacity.map(NonZeroUsize::get),
            len = self.len(),
            "changing ordered map capacity"
        );
        self.capacity = capacity;

        let mut evicted = Vec::new();
        while self.exceeds_capacity() {
            match self.evict_lru() {
                Some(entry) => evicted.push(entry),
                None => break,
            }
        }
        evicted
    }

    /// Removes every entry. The eviction listener is not called.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        tracing::debug!(dropped = self.len(), "clearing ordered map");
        self.index.clear();
        self.list.clear();
    }

    /// Reserves room for `additional` more entries. For a bounded map the
    /// request is clamped to the space left under the capacity.
    pub fn reserve(&mut self, additional: usize) {
        let additional = match self.capacity {
            Some(cap) => additional.min(cap.get().saturating_sub(self.len())),
            None => additional,
        };
        self.index.reserve(additional);
        self.list.reserve(additional);
    }

    /// Releases spare memory in the index and the entry arena.
    ///
    /// The arena can only give back slots past the last live entry, so a
    /// map whose oldest slots were freed may keep some of that space.
    pub fn shrink_to_fit(&mut self) {
        self.index.shrink_to_fit();
        self.list.shrink_to_fit();
    }

    /// Approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        mem::size_of::<Self>()
            + self.index.capacity() * (mem::size_of::<K>() + mem::size_of::<SlotId>())
            + self.list.approx_bytes()
    }

    /// Borrowing iterator from LRU to MRU.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Keys from LRU to MRU.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Values from LRU to MRU.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Owned snapshot of all entries from LRU to MRU.
    ///
    /// Later changes to the map do not affect a snapshot already taken.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Checks that the index and the ordering list describe the same entries
    /// and that the capacity bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index slot {id:?} holds a different key"
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at freed slot {id:?}"
                    )));
                },
            }
        }
        if self.exceeds_capacity() {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {:?}",
                self.len(),
                self.capacity
            )));
        }
        Ok(())
    }

    fn lookup_and_promote<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        if self.ordering.tracks_access() {
            self.list.move_to_back(id);
        }
        Some(id)
    }

    #[inline]
    fn exceeds_capacity(&self) -> bool {
        self.capacity.is_some_and(|cap| self.len() > cap.get())
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let entry = self.list.pop_front()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        tracing::trace!(
            len = self.len(),
            capacity = ?self.capacity.map(NonZeroUsize::get),
            "evicted least-recently-used entry"
        );
        Some((entry.key, entry.value))
    }

    fn notify_evicted(&mut self, key: K, value: V) {
        if let Some(listener) = self.on_evict.as_mut() {
            listener.on_evict(key, value);
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> MapMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }

    pub fn reset_metrics(&mut self) {
        self.metrics = MapMetrics::default();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<MapMetricsSnapshot> for OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> MapMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreMap<K, V> for OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        OrderedEvictingMap::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        OrderedEvictingMap::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        OrderedEvictingMap::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        OrderedEvictingMap::len(self)
    }

    #[inline]
    fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    fn clear(&mut self) {
        OrderedEvictingMap::clear(self)
    }
}

impl<K, V> MutableMap<K, V> for OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        OrderedEvictingMap::remove(self, key)
    }
}

impl<K, V> RecencyMap<K, V> for OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        OrderedEvictingMap::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        OrderedEvictingMap::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        OrderedEvictingMap::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        OrderedEvictingMap::recency_rank(self, key)
    }
}

/// An unbounded, insertion-ordered map.
impl<K, V> Default for OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::unbounded(OrderingMode::Insertion)
    }
}

impl<K, V> fmt::Debug for OrderedEvictingMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entries<'a, K, V>(&'a IntrusiveList<Entry<K, V>>);

        impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entries<'_, K, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(self.0.iter().map(|entry| (&entry.key, &entry.value)))
                    .finish()
            }
        }

        f.debug_struct("OrderedEvictingMap")
            .field("ordering", &self.ordering)
            .field("capacity", &self.capacity)
            .field("entries", &Entries(&self.list))
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedEvictingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for OrderedEvictingMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consumes the map, yielding entries from LRU to MRU. No evictions are
    /// reported.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self.list }
    }
}

/// Borrowing iterator over `(&K, &V)` from LRU to MRU.
pub struct Iter<'a, K, V> {
    inner: intrusive_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Owning iterator over `(K, V)` from LRU to MRU.
pub struct IntoIter<K, V> {
    list: IntrusiveList<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().map(|entry| (entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
