//! evictkit: an ordered hash map with optional LRU eviction and eviction
//! callbacks.
//!
//! See `DESIGN.md` for internal architecture and invariants.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut map = OrderedEvictingMap::new(Some(2), OrderingMode::Access).unwrap();
//! map.put("a", 1);
//! map.put("b", 2);
//! map.get(&"a");
//! map.put("c", 3); // evicts "b"
//! assert_eq!(map.entries(), vec![("a", 1), ("c", 3)]);
//! ```

pub mod builder;
pub mod config;
pub mod ds;
pub mod error;
pub mod map;

#[cfg(feature = "concurrency")]
pub mod concurrent;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use builder::OrderedMapBuilder;
pub use config::{MapConfig, OrderingMode};
pub use error::ConfigError;
pub use map::OrderedEvictingMap;
