//! Pacing between steps, and the sink that actually sleeps through it

use super::errors::EngineError;
use super::sink::{debug_assert_mirror, Checkpoint, StepSink};
use crate::state::{VisEvent, VisualizationState};
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;
pub const DEFAULT_SPEED: u8 = 5;

/// Milliseconds of delay per speed notch below the maximum
const DELAY_STEP_MS: u64 = 50;

/// User-facing speed setting and the pacing interval derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    speed: u8,
}

impl Pacing {
    /// Speeds outside `1..=10` are clamped
    pub fn new(speed: u8) -> Self {
        Pacing {
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
        }
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// `(11 - speed) * 50` ms: 500 ms at speed 1 down to 50 ms at speed 10
    pub fn delay(&self) -> Duration {
        Duration::from_millis(u64::from(MAX_SPEED + 1 - self.speed) * DELAY_STEP_MS)
    }

    pub fn faster(self) -> Self {
        Pacing::new(self.speed.saturating_add(1))
    }

    pub fn slower(self) -> Self {
        Pacing::new(self.speed.saturating_sub(1))
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::new(DEFAULT_SPEED)
    }
}

/// Visualization state shared between a running algorithm and its readers
pub type SharedState = Arc<RwLock<VisualizationState>>;

/// Sink that runs an algorithm in real time.
///
/// Events are buffered and applied to the shared state in one batch under the
/// write lock at each suspension point, so readers only ever see whole steps.
/// The sink then sleeps for the pacing interval with the lock released.
pub struct PacedSink {
    shared: SharedState,
    pacing: Pacing,
    pending: Vec<VisEvent>,
    sleep: fn(Duration),
}

impl PacedSink {
    pub fn new(shared: SharedState, pacing: Pacing) -> Self {
        PacedSink {
            shared,
            pacing,
            pending: Vec::new(),
            sleep: std::thread::sleep,
        }
    }

    /// Replace the sleeping function (tests use a no-op)
    pub fn with_sleep(mut self, sleep: fn(Duration)) -> Self {
        self.sleep = sleep;
        self
    }

    fn publish(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
        let mut state = self
            .shared
            .write()
            .map_err(|_| EngineError::StatePoisoned)?;
        for event in self.pending.drain(..) {
            state.apply(&event);
        }
        debug_assert_mirror(&state, checkpoint);
        Ok(())
    }
}

impl StepSink for PacedSink {
    fn emit(&mut self, event: VisEvent) {
        self.pending.push(event);
    }

    fn suspend(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
        self.publish(checkpoint)?;
        (self.sleep)(self.pacing.delay());
        Ok(())
    }

    fn finish(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
        self.publish(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RunStats;

    #[test]
    fn test_delay_formula() {
        assert_eq!(Pacing::new(1).delay(), Duration::from_millis(500));
        assert_eq!(Pacing::new(5).delay(), Duration::from_millis(300));
        assert_eq!(Pacing::new(10).delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_speed_is_clamped() {
        assert_eq!(Pacing::new(0).speed(), MIN_SPEED);
        assert_eq!(Pacing::new(42).speed(), MAX_SPEED);
        assert_eq!(Pacing::new(10).faster().speed(), 10);
        assert_eq!(Pacing::new(1).slower().speed(), 1);
        assert_eq!(Pacing::default().faster().speed(), 6);
    }

    #[test]
    fn test_events_are_published_only_at_suspension() {
        let shared: SharedState = Arc::new(RwLock::new(VisualizationState::with_data(&[2, 1])));
        let mut sink = PacedSink::new(Arc::clone(&shared), Pacing::new(10)).with_sleep(|_| {});

        sink.emit(VisEvent::Write { index: 0, value: 1 });
        sink.emit(VisEvent::Write { index: 1, value: 2 });
        assert_eq!(shared.read().unwrap().data(), &[2, 1]);

        let checkpoint = Checkpoint {
            working: &[1, 2],
            stats: RunStats::new(),
        };
        sink.suspend(checkpoint).unwrap();
        assert_eq!(shared.read().unwrap().data(), &[1, 2]);
    }
}
