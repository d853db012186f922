//! Directed graph dataset and its drawing layout

use super::tree::{CANVAS_HEIGHT, CANVAS_WIDTH};
use rand::seq::index::sample;
use rand::Rng;

/// Adjacency lists keyed by vertex id `0..len`. Edges are directed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Build a graph from explicit adjacency lists.
    ///
    /// Neighbor order is kept as given; traversals visit neighbors in this order.
    pub fn from_adjacency(adjacency: Vec<Vec<usize>>) -> Self {
        debug_assert!(
            adjacency
                .iter()
                .flatten()
                .all(|&neighbor| neighbor < adjacency.len()),
            "edge points outside the graph"
        );
        Graph { adjacency }
    }

    /// Random graph: every vertex gets 1 to 3 distinct out-edges (capped at `size - 1`),
    /// never to itself.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Self {
        let adjacency = (0..size)
            .map(|vertex| {
                let others = size.saturating_sub(1);
                let edges = rng.random_range(1..=3usize).min(others);
                // sample among the other vertices, then skip over `vertex` itself
                sample(&mut *rng, others, edges)
                    .into_iter()
                    .map(|i| if i >= vertex { i + 1 } else { i })
                    .collect()
            })
            .collect();
        Graph { adjacency }
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, vertex: usize) -> bool {
        vertex < self.adjacency.len()
    }

    /// Out-neighbors in stored order; unknown vertices have none
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn vertices(&self) -> impl Iterator<Item = usize> {
        0..self.adjacency.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, neighbors)| neighbors.iter().map(move |&to| (from, to)))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

const LAYOUT_PADDING: f64 = 60.0;
const LAYOUT_MIN_DISTANCE: f64 = 80.0;
const LAYOUT_ATTEMPTS: usize = 100;

/// Canvas position of every vertex, computed once per generated graph.
///
/// `y` grows downward from the top of the canvas, like the tree layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphLayout {
    positions: Vec<(f64, f64)>,
}

impl GraphLayout {
    /// Scatter vertices across the canvas, keeping them apart where possible.
    ///
    /// Each vertex gets a bounded number of attempts to land at least
    /// `LAYOUT_MIN_DISTANCE` from every vertex placed before it; after that it is
    /// placed wherever the last draw fell.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, graph: &Graph) -> Self {
        let mut positions: Vec<(f64, f64)> = Vec::with_capacity(graph.len());
        for _ in graph.vertices() {
            let mut candidate = random_point(rng);
            for _ in 1..LAYOUT_ATTEMPTS {
                let clear = positions.iter().all(|&(px, py)| {
                    (candidate.0 - px).hypot(candidate.1 - py) >= LAYOUT_MIN_DISTANCE
                });
                if clear {
                    break;
                }
                candidate = random_point(rng);
            }
            positions.push(candidate);
        }
        GraphLayout { positions }
    }

    pub fn position(&self, vertex: usize) -> Option<(f64, f64)> {
        self.positions.get(vertex).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn random_point<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (
        rng.random_range(LAYOUT_PADDING..CANVAS_WIDTH - LAYOUT_PADDING),
        rng.random_range(LAYOUT_PADDING..CANVAS_HEIGHT - LAYOUT_PADDING),
    )
}
