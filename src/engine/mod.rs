//! Instrumented algorithms
//!
//! This module provides the step-emitting implementations of every supported
//! algorithm:
//! - [`sorting`]: bubble, selection, insertion, quick (Lomuto) and merge sort
//! - [`traversal`]: inorder/preorder/postorder tree walks, BFS and DFS
//! - [`sink`]: the [`StepSink`] contract the engine drives
//! - [`pacing`]: speed-to-delay conversion and the real-time [`PacedSink`]
//! - [`stats`]: per-run counters
//! - [`errors`]: [`EngineError`]
//!
//! # Execution Model
//!
//! An [`AlgorithmEngine`] borrows a sink for the duration of one run. Every
//! change to the working data is mirrored to the sink as a
//! [`VisEvent::Write`] *before* the next suspension point, so the data mirror
//! never lags behind the algorithm. Each comparison, counted mutation and visit
//! ends with a call to [`StepSink::suspend`]; how long that takes (a real
//! sleep, a recorded frame, or nothing) is the sink's business.

pub mod errors;
pub mod pacing;
pub mod sink;
pub mod sorting;
pub mod stats;
pub mod traversal;

pub use errors::EngineError;
pub use pacing::{PacedSink, Pacing, SharedState};
pub use sink::{Checkpoint, StepSink};
pub use stats::RunStats;

use crate::state::VisEvent;
use std::time::Instant;

/// Runs one algorithm at a time against a borrowed step sink
pub struct AlgorithmEngine<'s, S: StepSink + ?Sized> {
    sink: &'s mut S,
    stats: RunStats,
    started: Instant,
}

impl<'s, S: StepSink + ?Sized> AlgorithmEngine<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        AlgorithmEngine {
            sink,
            stats: RunStats::new(),
            started: Instant::now(),
        }
    }

    /// Counters of the current (or last finished) run
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    fn begin_run(&mut self) {
        self.stats = RunStats::new();
        self.started = Instant::now();
        self.emit(VisEvent::Reset);
    }

    fn emit(&mut self, event: VisEvent) {
        tracing::trace!(%event, "step event");
        self.sink.emit(event);
    }

    /// One suspension point
    fn suspend(&mut self, working: &[i32]) -> Result<(), EngineError> {
        self.stats.set_elapsed(self.started.elapsed());
        self.sink.suspend(Checkpoint {
            working,
            stats: self.stats,
        })
    }

    fn end_run(&mut self, working: &[i32]) -> Result<RunStats, EngineError> {
        self.stats.set_elapsed(self.started.elapsed());
        self.sink.finish(Checkpoint {
            working,
            stats: self.stats,
        })?;
        Ok(self.stats)
    }
}

/// An algorithm selectable by a short key, with a family default
pub trait AlgorithmKey: Copy + PartialEq + Default + 'static {
    /// Every variant, in menu order
    const ALL: &'static [Self];

    fn key(self) -> &'static str;

    fn name(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.key().eq_ignore_ascii_case(key))
    }

    /// Like [`from_key`](AlgorithmKey::from_key), but unknown keys fall back to the default
    fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            let fallback = Self::default();
            tracing::warn!(key, fallback = fallback.key(), "unknown algorithm key");
            fallback
        })
    }

    /// The next variant in menu order, wrapping around
    fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortAlgorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
}

impl AlgorithmKey for SortAlgorithm {
    const ALL: &'static [Self] = &[
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
    ];

    fn key(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Merge => "merge",
        }
    }

    fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Merge => "Merge Sort",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeTraversal {
    #[default]
    Inorder,
    Preorder,
    Postorder,
}

impl AlgorithmKey for TreeTraversal {
    const ALL: &'static [Self] = &[
        TreeTraversal::Inorder,
        TreeTraversal::Preorder,
        TreeTraversal::Postorder,
    ];

    fn key(self) -> &'static str {
        match self {
            TreeTraversal::Inorder => "inorder",
            TreeTraversal::Preorder => "preorder",
            TreeTraversal::Postorder => "postorder",
        }
    }

    fn name(self) -> &'static str {
        match self {
            TreeTraversal::Inorder => "Inorder Traversal",
            TreeTraversal::Preorder => "Preorder Traversal",
            TreeTraversal::Postorder => "Postorder Traversal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphSearch {
    #[default]
    Bfs,
    Dfs,
}

impl AlgorithmKey for GraphSearch {
    const ALL: &'static [Self] = &[GraphSearch::Bfs, GraphSearch::Dfs];

    fn key(self) -> &'static str {
        match self {
            GraphSearch::Bfs => "bfs",
            GraphSearch::Dfs => "dfs",
        }
    }

    fn name(self) -> &'static str {
        match self {
            GraphSearch::Bfs => "Breadth First Search",
            GraphSearch::Dfs => "Depth First Search",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_key() {
        for &algorithm in SortAlgorithm::ALL {
            assert_eq!(SortAlgorithm::from_key(algorithm.key()), Some(algorithm));
        }
        assert_eq!(GraphSearch::from_key(" DFS "), Some(GraphSearch::Dfs));
    }

    #[test]
    fn test_unknown_key_falls_back_to_family_default() {
        assert_eq!(SortAlgorithm::resolve("bogo"), SortAlgorithm::Bubble);
        assert_eq!(TreeTraversal::resolve(""), TreeTraversal::Inorder);
        assert_eq!(GraphSearch::resolve("dijkstra"), GraphSearch::Bfs);
    }

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(SortAlgorithm::Merge.next(), SortAlgorithm::Bubble);
        assert_eq!(TreeTraversal::Inorder.next(), TreeTraversal::Preorder);
        assert_eq!(GraphSearch::Dfs.next(), GraphSearch::Bfs);
    }
}
