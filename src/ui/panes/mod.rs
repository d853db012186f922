//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`array`]: bar chart of the data mirror for the sorting family
//! - [`tree`]: canvas drawing of the binary search tree
//! - [`graph`]: canvas drawing of the directed graph
//! - [`stats`]: live run statistics and pacing
//! - [`steps`]: log of the events behind the frames shown so far
//! - [`status`]: status bar with keybindings and run state
//! - `utils`: shared canvas helpers
//!
//! Each pane exports a primary `render_*_pane()` function that only reads what
//! it is given.

mod utils;

pub mod array;
pub mod graph;
pub mod stats;
pub mod status;
pub mod steps;
pub mod tree;

// Re-export render functions for convenience
pub use array::render_array_pane;
pub use graph::render_graph_pane;
pub use stats::{render_stats_pane, StatsRenderData};
pub use status::render_status_bar;
pub use steps::render_steps_pane;
pub use tree::render_tree_pane;
