//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are separate traits so the map only
//! ever writes counters and monitoring code only ever reads them.
//!
//! ```text
//!          ┌─────────────────────────────┐
//!          │     CoreMetricsRecorder     │
//!          │  get_hit/get_miss/insert    │
//!          │  evict/clear                │
//!          └──────────────┬──────────────┘
//!                         ▼
//!          ┌─────────────────────────────┐     ┌──────────────────────────────┐
//!          │  OrderedMapMetricsRecorder  │     │ OrderedMapMetricsReadRecorder│
//!          │  touch/remove/pop_lru       │     │ peek/recency_rank  (&self)   │
//!          └─────────────────────────────┘     └──────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by every map operation that mutates.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Counters for the recency-order and removal operations.
pub trait OrderedMapMetricsRecorder: CoreMetricsRecorder {
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
}

/// Read-path counters for `&self` methods (uses interior mutability).
///
/// Use this for map operations that only take `&self` (`peek`,
/// `recency_rank`) where a mutable recorder is not available.
pub trait OrderedMapMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
