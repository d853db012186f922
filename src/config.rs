//! Command-line arguments and the session configuration built from them

use crate::dataset::ArrayShape;
use crate::engine::pacing::{Pacing, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use crate::engine::{AlgorithmKey, GraphSearch, SortAlgorithm, TreeTraversal};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const MIN_SIZE: usize = 1;
pub const MAX_SIZE: usize = 100;
pub const DEFAULT_SIZE: usize = 20;
pub const DEFAULT_HISTORY_LIMIT_MB: usize = 256;

/// Which kind of dataset and algorithm a session animates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmFamily {
    #[default]
    Sorting,
    Trees,
    Graphs,
}

impl AlgorithmFamily {
    /// Cycle sorting -> trees -> graphs -> sorting
    pub fn next(self) -> Self {
        match self {
            AlgorithmFamily::Sorting => AlgorithmFamily::Trees,
            AlgorithmFamily::Trees => AlgorithmFamily::Graphs,
            AlgorithmFamily::Graphs => AlgorithmFamily::Sorting,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AlgorithmFamily::Sorting => "Sorting Algorithms",
            AlgorithmFamily::Trees => "Tree Traversals",
            AlgorithmFamily::Graphs => "Graph Algorithms",
        }
    }
}

/// Step-by-step terminal animations of sorting, tree and graph algorithms
#[derive(Parser, Debug)]
#[command(name = "algotty")]
#[command(about = "Step-by-step terminal animations of classic algorithms", long_about = None)]
pub struct Args {
    /// Algorithm family to animate
    #[arg(short, long, value_enum, default_value_t = AlgorithmFamily::Sorting)]
    pub family: AlgorithmFamily,

    /// Algorithm key (bubble, selection, insertion, quick, merge, inorder, preorder,
    /// postorder, bfs, dfs); unknown keys fall back to the family default
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Number of array elements, tree nodes or graph vertices
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIZE as u16,
          value_parser = clap::value_parser!(u16).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    pub size: u16,

    /// Animation speed, 1 (slowest) to 10 (fastest)
    #[arg(short, long, default_value_t = DEFAULT_SPEED,
          value_parser = clap::value_parser!(u8).range(MIN_SPEED as i64..=MAX_SPEED as i64))]
    pub speed: u8,

    /// Initial ordering of generated arrays
    #[arg(long, value_enum, default_value_t = ArrayShape::Random)]
    pub shape: ArrayShape,

    /// Start vertex for graph searches (defaults to the first vertex)
    #[arg(long)]
    pub start: Option<usize>,

    /// Seed for reproducible datasets
    #[arg(long)]
    pub seed: Option<u64>,

    /// Memory budget for the recorded step history, in MiB
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT_MB)]
    pub history_limit_mb: usize,

    /// Run once with real-time pacing and log progress instead of opening the TUI
    #[arg(long)]
    pub headless: bool,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Everything a [`Session`](crate::session::Session) needs to know up front
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub family: AlgorithmFamily,
    pub sort: SortAlgorithm,
    pub traversal: TreeTraversal,
    pub search: GraphSearch,
    pub size: usize,
    pub pacing: Pacing,
    pub shape: ArrayShape,
    pub start_vertex: Option<usize>,
    pub seed: Option<u64>,
    /// Step history budget in bytes
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            family: AlgorithmFamily::default(),
            sort: SortAlgorithm::default(),
            traversal: TreeTraversal::default(),
            search: GraphSearch::default(),
            size: DEFAULT_SIZE,
            pacing: Pacing::default(),
            shape: ArrayShape::default(),
            start_vertex: None,
            seed: None,
            history_limit: DEFAULT_HISTORY_LIMIT_MB * 1024 * 1024,
        }
    }
}

impl From<&Args> for SessionConfig {
    fn from(args: &Args) -> Self {
        let mut config = SessionConfig {
            family: args.family,
            size: usize::from(args.size).clamp(MIN_SIZE, MAX_SIZE),
            pacing: Pacing::new(args.speed),
            shape: args.shape,
            start_vertex: args.start,
            seed: args.seed,
            history_limit: args.history_limit_mb.saturating_mul(1024 * 1024),
            ..SessionConfig::default()
        };

        // the key only selects within the chosen family
        if let Some(key) = args.algorithm.as_deref() {
            match args.family {
                AlgorithmFamily::Sorting => config.sort = SortAlgorithm::resolve(key),
                AlgorithmFamily::Trees => config.traversal = TreeTraversal::resolve(key),
                AlgorithmFamily::Graphs => config.search = GraphSearch::resolve(key),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["algotty"]);
        let config = SessionConfig::from(&args);
        assert_eq!(config, SessionConfig::default());
        assert!(!args.headless);
    }

    #[test]
    fn test_algorithm_key_selects_within_family() {
        let args = Args::parse_from(["algotty", "--family", "graphs", "--algorithm", "dfs"]);
        let config = SessionConfig::from(&args);
        assert_eq!(config.family, AlgorithmFamily::Graphs);
        assert_eq!(config.search, GraphSearch::Dfs);
        assert_eq!(config.sort, SortAlgorithm::Bubble);
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let args = Args::parse_from(["algotty", "--algorithm", "bogo", "--speed", "10"]);
        let config = SessionConfig::from(&args);
        assert_eq!(config.sort, SortAlgorithm::Bubble);
        assert_eq!(config.pacing.speed(), 10);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(Args::try_parse_from(["algotty", "--speed", "11"]).is_err());
        assert!(Args::try_parse_from(["algotty", "--size", "0"]).is_err());
        assert!(Args::try_parse_from(["algotty", "--size", "101"]).is_err());
        let args = Args::try_parse_from(["algotty", "-n", "5", "--shape", "reversed"]).unwrap();
        assert_eq!(args.size, 5);
        assert_eq!(args.shape, ArrayShape::Reversed);
    }
}
