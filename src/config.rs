//! Map configuration.
//!
//! | Field      | Type            | Default      | Description                          |
//! |------------|-----------------|--------------|--------------------------------------|
//! | `capacity` | `Option<usize>` | `None`       | Entry bound; `None` means unbounded  |
//! | `ordering` | `OrderingMode`  | `Insertion`  | What the traversal order tracks      |
//!
//! The eviction callback is not part of `MapConfig` because closures are
//! neither `Clone` nor `Debug`; attach it through
//! [`OrderedMapBuilder::on_evict`](crate::builder::OrderedMapBuilder::on_evict)
//! or [`OrderedEvictingMap::set_on_evict`](crate::OrderedEvictingMap::set_on_evict).

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::ConfigError;

/// What the traversal order of a map reflects. Fixed at construction.
///
/// ```text
///   Insertion:  put(a) put(b) get(a) put(a)  ->  [a, b]
///   Access:     put(a) put(b) get(a)         ->  [b, a]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderingMode {
    /// Order is the time of first insertion. Lookups and updates never move
    /// an entry.
    #[default]
    Insertion,
    /// Order is recency of the last `put` or `get`. A hit moves the entry to
    /// the most-recently-used end.
    Access,
}

impl OrderingMode {
    /// Returns `true` for [`OrderingMode::Access`].
    #[inline]
    pub fn tracks_access(self) -> bool {
        matches!(self, OrderingMode::Access)
    }
}

impl fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingMode::Insertion => f.write_str("insertion"),
            OrderingMode::Access => f.write_str("access"),
        }
    }
}

/// Construction parameters for an
/// [`OrderedEvictingMap`](crate::OrderedEvictingMap).
///
/// # Example
///
/// ```
/// use evictkit::config::{MapConfig, OrderingMode};
///
/// let config = MapConfig::default();
/// assert_eq!(config.capacity, None);
/// assert_eq!(config.ordering, OrderingMode::Insertion);
///
/// let lru = MapConfig {
///     capacity: Some(128),
///     ordering: OrderingMode::Access,
/// };
/// assert_eq!(lru.validate().unwrap().map(|n| n.get()), Some(128));
///
/// let bad = MapConfig { capacity: Some(0), ..Default::default() };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapConfig {
    /// Maximum number of entries. `None` disables eviction.
    pub capacity: Option<usize>,
    /// Traversal order semantics.
    pub ordering: OrderingMode,
}

impl MapConfig {
    /// Unbounded map with the given ordering.
    pub fn unbounded(ordering: OrderingMode) -> Self {
        Self {
            capacity: None,
            ordering,
        }
    }

    /// Bounded, access-ordered map: the classic LRU cache shape.
    pub fn lru(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ordering: OrderingMode::Access,
        }
    }

    /// Checks the configuration and returns the capacity as a `NonZeroUsize`.
    pub fn validate(&self) -> Result<Option<NonZeroUsize>, ConfigError> {
        match self.capacity {
            None => Ok(None),
            Some(n) => NonZeroUsize::new(n)
                .map(Some)
                .ok_or_else(ConfigError::zero_capacity),
        }
    }
}
