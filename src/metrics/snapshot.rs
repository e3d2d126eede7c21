/// Point-in-time copy of an ordered map's counters.
///
/// Counters are cumulative since construction (or the last
/// `reset_metrics`); `len` and `capacity` are gauges captured when the
/// snapshot was taken. `capacity` is `0` for unbounded maps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MapMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

impl MapMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `None` before the first `get`.
    pub fn hit_ratio(&self) -> Option<f64> {
        if self.get_calls == 0 {
            None
        } else {
            Some(self.get_hits as f64 / self.get_calls as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_zero_calls() {
        assert_eq!(MapMetricsSnapshot::default().hit_ratio(), None);

        let snapshot = MapMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.hit_ratio(), Some(0.75));
    }
}
