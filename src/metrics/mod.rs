//! Operation counters for ordered maps (feature `metrics`).
//!
//! - [`metrics_impl::MapMetrics`]: the counters embedded in each map.
//! - [`snapshot::MapMetricsSnapshot`]: a plain copy for tests and benches.
//! - [`exporter::PrometheusTextExporter`]: text exposition output.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
