//! # Introduction
//!
//! algotty animates classic algorithms step by step in the terminal. Every
//! comparison, exchange and visit is published as an event, applied to a
//! renderer-facing view, and shown for one pacing interval before the
//! algorithm continues.
//!
//! ## Execution pipeline
//!
//! ```text
//! Generator → Dataset → AlgorithmEngine → StepSink → VisualizationState → TUI
//! ```
//!
//! 1. [`dataset`] — random, sorted and reversed arrays; binary search trees
//!    built by sequential insertion; random directed graphs. Each comes with
//!    the layout the renderer draws.
//! 2. [`engine`] — instrumented bubble, selection, insertion, quick and merge
//!    sort; inorder, preorder and postorder tree walks; breadth- and
//!    depth-first graph search. Runs are counted in [`engine::RunStats`].
//! 3. [`state`] — [`state::VisualizationState`]: highlight sets plus the data
//!    mirror, updated only through [`state::VisEvent`]s.
//! 4. [`snapshot`] — a [`snapshot::Recorder`] sink that turns every
//!    suspension point into a frame of a memory-bounded timeline.
//! 5. [`session`] — the driver: generate, start, reset, playback pacing and
//!    post-run review, with starts refused while a run is in progress.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Pacing
//!
//! Speed runs from 1 to 10 and each step lasts `(11 - speed) * 50` ms, so
//! 500 ms at the slowest setting down to 50 ms at the fastest.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod ui;
