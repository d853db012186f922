//! Visualization events emitted by the algorithm engine

use std::fmt;

/// A single renderer-facing update produced by a running algorithm.
///
/// Events are applied to a [`VisualizationState`](super::VisualizationState) in
/// emission order. Ids are array indices for sorts, node ids for trees and
/// vertex ids for graphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisEvent {
    /// Clear every highlight set at the start of a run
    Reset,

    /// Replace the whole data mirror
    Load(Vec<i32>),

    /// Two elements are under comparison
    Compare(usize, usize),

    /// Two elements are mid-exchange
    Swap(usize, usize),

    /// One mirror slot now holds a new value
    Write { index: usize, value: i32 },

    /// These indices are in their final position
    Sorted(Vec<usize>),

    /// A node or vertex has been visited
    Visit(usize),

    /// A node or vertex was discovered and joins the frontier
    Explore(usize),
}

impl fmt::Display for VisEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisEvent::Reset => write!(f, "reset"),
            VisEvent::Load(values) => write!(f, "load {} values", values.len()),
            VisEvent::Compare(a, b) => write!(f, "compare [{}] [{}]", a, b),
            VisEvent::Swap(a, b) => write!(f, "swap [{}] [{}]", a, b),
            VisEvent::Write { index, value } => write!(f, "write [{}] = {}", index, value),
            VisEvent::Sorted(indices) => write!(f, "sorted {} indices", indices.len()),
            VisEvent::Visit(id) => write!(f, "visit {}", id),
            VisEvent::Explore(id) => write!(f, "explore {}", id),
        }
    }
}
