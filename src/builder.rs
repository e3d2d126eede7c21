//! Fluent builder for [`OrderedEvictingMap`].
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::OrderedMapBuilder;
//!
//! let mut cache = OrderedMapBuilder::new()
//!     .capacity(2)
//!     .access_order()
//!     .build();
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.entries(), vec![("a", 1), ("c", 3)]);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::config::{MapConfig, OrderingMode};
use crate::error::ConfigError;
use crate::map::{BoxedListener, OrderedEvictingMap};
use crate::traits::EvictionListener;

/// Builder for [`OrderedEvictingMap`].
///
/// Defaults to an unbounded, insertion-ordered map with no listener.
pub struct OrderedMapBuilder<K, V> {
    config: MapConfig,
    on_evict: Option<BoxedListener<K, V>>,
}

impl<K, V> OrderedMapBuilder<K, V> {
    pub fn new() -> Self {
        Self {
            config: MapConfig::default(),
            on_evict: None,
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: MapConfig) -> Self {
        Self {
            config,
            on_evict: None,
        }
    }

    /// Bounds the map to `capacity` entries. Zero is rejected at build time.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = Some(capacity);
        self
    }

    /// Removes any capacity bound.
    pub fn unbounded(mut self) -> Self {
        self.config.capacity = None;
        self
    }

    pub fn ordering(mut self, ordering: OrderingMode) -> Self {
        self.config.ordering = ordering;
        self
    }

    /// Shorthand for `.ordering(OrderingMode::Access)`.
    pub fn access_order(self) -> Self {
        self.ordering(OrderingMode::Access)
    }

    /// Shorthand for `.ordering(OrderingMode::Insertion)`.
    pub fn insertion_order(self) -> Self {
        self.ordering(OrderingMode::Insertion)
    }

    /// Sets the closure called with each entry evicted for capacity.
    pub fn on_evict<F>(mut self, f: F) -> Self
    where
        F: FnMut(K, V) + Send + Sync + 'static,
    {
        self.on_evict = Some(Box::new(f));
        self
    }

    /// Sets a listener type called with each entry evicted for capacity.
    pub fn eviction_listener<L>(mut self, listener: L) -> Self
    where
        L: EvictionListener<K, V> + Send + Sync + 'static,
    {
        self.on_evict = Some(Box::new(listener));
        self
    }

    /// The configuration collected so far.
    pub fn config(&self) -> MapConfig {
        self.config
    }
}

impl<K, V> OrderedMapBuilder<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Builds the map, or returns [`ConfigError`] for a zero capacity.
    ///
    /// ```
    /// use evictkit::builder::OrderedMapBuilder;
    ///
    /// let result = OrderedMapBuilder::<u32, u32>::new().capacity(0).try_build();
    /// assert!(result.is_err());
    /// ```
    pub fn try_build(self) -> Result<OrderedEvictingMap<K, V>, ConfigError> {
        let mut map = OrderedEvictingMap::with_config(self.config)?;
        map.replace_listener(self.on_evict);
        Ok(map)
    }

    /// Builds the map.
    ///
    /// # Panics
    ///
    /// Panics on invalid configuration. For a non-panicking alternative, use
    /// [`try_build`](Self::try_build).
    pub fn build(self) -> OrderedEvictingMap<K, V> {
        match self.try_build() {
            Ok(map) => map,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<K, V> Default for OrderedMapBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMapBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedMapBuilder")
            .field("config", &self.config)
            .field("has_listener", &self.on_evict.is_some())
            .finish()
    }
}
