pub use crate::builder::OrderedMapBuilder;
pub use crate::config::{MapConfig, OrderingMode};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::map::OrderedEvictingMap;
pub use crate::traits::{CoreMap, EvictionListener, MutableMap, RecencyMap};

#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentOrderedMap;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::MapMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
