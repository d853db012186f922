//! The contract between the engine and whatever consumes its steps

use super::errors::EngineError;
use super::stats::RunStats;
use crate::state::{VisEvent, VisualizationState};

/// The algorithm's true state at a suspension point
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'a> {
    /// The working array for sorts; empty for traversals, which mutate nothing
    pub working: &'a [i32],
    /// Counters as of this step
    pub stats: RunStats,
}

/// Receiver of engine steps.
///
/// The engine calls [`emit`](StepSink::emit) for every visualization update and
/// [`suspend`](StepSink::suspend) once per comparison, mutation or visit. A
/// renderer must only ever observe the state as of a suspension point (or after
/// [`finish`](StepSink::finish)); sinks decide how that is achieved.
pub trait StepSink {
    /// Record one event. Must not block.
    fn emit(&mut self, event: VisEvent);

    /// Publish everything emitted since the previous suspension and wait out (or
    /// record) the pacing interval.
    fn suspend(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError>;

    /// Publish trailing events at the end of a run, without pacing
    fn finish(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError>;
}

/// Applying steps straight to a state gives an unpaced run: every suspension
/// returns immediately.
impl StepSink for VisualizationState {
    fn emit(&mut self, event: VisEvent) {
        self.apply(&event);
    }

    fn suspend(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
        debug_assert_mirror(self, checkpoint);
        Ok(())
    }

    fn finish(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
        debug_assert_mirror(self, checkpoint);
        Ok(())
    }
}

/// In debug builds, check that the mirror matches the working copy of an array run
pub(crate) fn debug_assert_mirror(state: &VisualizationState, checkpoint: Checkpoint<'_>) {
    debug_assert!(
        checkpoint.working.is_empty() || state.data() == checkpoint.working,
        "data mirror {:?} is stale against working copy {:?}",
        state.data(),
        checkpoint.working
    );
}
