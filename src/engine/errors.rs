//! Errors that can abort an algorithm run
//!
//! Well-formed input never fails: empty datasets are no-ops. What remains are a
//! start vertex outside the graph and failures of the step sink itself.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Graph search asked to start from a vertex the graph does not have
    #[error("start vertex {vertex} is not in the graph (vertices 0..{len})")]
    UnknownVertex { vertex: usize, len: usize },

    /// Recorded step history would exceed its memory budget
    #[error("step history limit exceeded: {current} + {frame} > {limit} bytes")]
    HistoryLimitExceeded {
        current: usize,
        frame: usize,
        limit: usize,
    },

    /// A reader panicked while holding the shared visualization state
    #[error("shared visualization state is poisoned")]
    StatePoisoned,

    /// The algorithm panicked on its worker thread
    #[error("algorithm run panicked")]
    RunPanicked,
}
