//! Datasets the algorithms run against, and their generators
//!
//! - [`tree`]: binary search tree built by sequential insertion, plus its layout
//! - [`graph`]: directed graph with random out-edges, plus its layout
//!
//! Arrays need no dedicated type; they are plain `Vec<i32>` values produced by
//! [`generate_array`].
//!
//! Generators take the random source as a parameter so that a seeded
//! [`StdRng`](rand::rngs::StdRng) reproduces the same dataset.

pub mod graph;
pub mod tree;

pub use graph::{Graph, GraphLayout};
pub use tree::{BinaryTree, NodePlacement, TreeNode};

use clap::ValueEnum;
use rand::Rng;

/// Smallest value the random array generator produces
pub const MIN_RANDOM_VALUE: i32 = 1;
/// Largest value the random array generator produces
pub const MAX_RANDOM_VALUE: i32 = 100;

/// Initial ordering of a generated array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ArrayShape {
    /// Uniform values in `[1, 100]`
    #[default]
    Random,
    /// `1..=n` ascending
    Sorted,
    /// `n..=1` descending
    Reversed,
}

/// The data a run operates on, replaced wholesale on regeneration
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Array(Vec<i32>),
    Tree(BinaryTree),
    Graph { graph: Graph, layout: GraphLayout },
}

impl Dataset {
    /// Number of elements, nodes or vertices
    pub fn len(&self) -> usize {
        match self {
            Dataset::Array(values) => values.len(),
            Dataset::Tree(tree) => tree.len(),
            Dataset::Graph { graph, .. } => graph.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The values a renderer shows before any run touches them
    pub fn mirror_values(&self) -> Vec<i32> {
        match self {
            Dataset::Array(values) => values.clone(),
            Dataset::Tree(tree) => tree.values_by_id(),
            Dataset::Graph { graph, .. } => graph.vertices().map(|v| v as i32).collect(),
        }
    }
}

pub fn random_array<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<i32> {
    (0..size)
        .map(|_| rng.random_range(MIN_RANDOM_VALUE..=MAX_RANDOM_VALUE))
        .collect()
}

pub fn sorted_array(size: usize) -> Vec<i32> {
    (1..=size as i32).collect()
}

pub fn reversed_array(size: usize) -> Vec<i32> {
    (1..=size as i32).rev().collect()
}

pub fn generate_array<R: Rng + ?Sized>(rng: &mut R, shape: ArrayShape, size: usize) -> Vec<i32> {
    match shape {
        ArrayShape::Random => random_array(rng, size),
        ArrayShape::Sorted => sorted_array(size),
        ArrayShape::Reversed => reversed_array(size),
    }
}

/// Generate a graph together with its once-per-generation layout
pub fn generate_graph<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Dataset {
    let graph = Graph::random(rng, size);
    let layout = GraphLayout::generate(rng, &graph);
    Dataset::Graph { graph, layout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_array_values_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = random_array(&mut rng, 500);
        assert_eq!(values.len(), 500);
        assert!(values
            .iter()
            .all(|v| (MIN_RANDOM_VALUE..=MAX_RANDOM_VALUE).contains(v)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = random_array(&mut StdRng::seed_from_u64(9), 20);
        let b = random_array(&mut StdRng::seed_from_u64(9), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sorted_and_reversed_shapes() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generate_array(&mut rng, ArrayShape::Sorted, 4), vec![1, 2, 3, 4]);
        assert_eq!(generate_array(&mut rng, ArrayShape::Reversed, 4), vec![4, 3, 2, 1]);
        assert!(generate_array(&mut rng, ArrayShape::Random, 0).is_empty());
    }

    #[test]
    fn test_graph_dataset_mirror_is_vertex_ids() {
        let mut rng = StdRng::seed_from_u64(5);
        let dataset = generate_graph(&mut rng, 4);
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.mirror_values(), vec![0, 1, 2, 3]);
    }
}
