use std::time::Duration;

/// Counters for one algorithm run
///
/// Reset at the start of every run and only ever incremented while it proceeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    comparisons: u64,
    mutations: u64,
    visits: u64,
    elapsed: Duration,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one ordering test between two elements
    pub fn bump_comparisons(&mut self) {
        self.comparisons += 1
    }

    /// Record one counted element relocation (a swap or a shift)
    pub fn bump_mutations(&mut self) {
        self.mutations += 1
    }

    /// Record one node or vertex visit
    pub fn bump_visits(&mut self) {
        self.visits += 1
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_initialized_to_zero() {
        let stats = RunStats::new();
        assert_eq!(stats.comparisons(), 0);
        assert_eq!(stats.mutations(), 0);
        assert_eq!(stats.visits(), 0);
        assert_eq!(stats.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_bumps_are_independent() {
        let mut stats = RunStats::new();
        stats.bump_comparisons();
        stats.bump_comparisons();
        stats.bump_mutations();
        stats.bump_visits();
        stats.set_elapsed(Duration::from_millis(12));
        assert_eq!(stats.comparisons(), 2);
        assert_eq!(stats.mutations(), 1);
        assert_eq!(stats.visits(), 1);
        assert_eq!(stats.elapsed().as_millis(), 12);
    }
}
