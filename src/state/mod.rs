//! Renderer-facing visualization state
//!
//! [`VisualizationState`] is the snapshot of "what the viewer should currently
//! see": the highlight sets for the step in progress, the cumulative
//! sorted/visited/exploring sets, and the **data mirror** (the values the
//! renderer draws).
//!
//! The engine never touches this type directly; it emits [`VisEvent`]s into a
//! step sink, and the sink applies them here. Every operation is synchronous
//! and infallible.

pub mod events;

pub use events::VisEvent;

use rustc_hash::FxHashSet;

/// Highlight sets plus the data mirror for one point in a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualizationState {
    comparing: Vec<usize>,
    swapping: Vec<usize>,
    sorted: FxHashSet<usize>,
    visited: FxHashSet<usize>,
    exploring: FxHashSet<usize>,
    data: Vec<i32>,
}

impl VisualizationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state whose mirror starts as a copy of `data`
    pub fn with_data(data: &[i32]) -> Self {
        VisualizationState {
            data: data.to_vec(),
            ..Self::default()
        }
    }

    /// Overwrite the comparison pair (at most two ids)
    pub fn set_comparing(&mut self, ids: &[usize]) {
        debug_assert!(ids.len() <= 2, "at most two elements compare at once");
        self.comparing.clear();
        self.comparing.extend(ids.iter().take(2));
    }

    /// Overwrite the exchange pair (at most two ids)
    pub fn set_swapping(&mut self, ids: &[usize]) {
        debug_assert!(ids.len() <= 2, "at most two elements swap at once");
        self.swapping.clear();
        self.swapping.extend(ids.iter().take(2));
    }

    pub fn add_sorted(&mut self, indices: &[usize]) {
        self.sorted.extend(indices.iter().copied());
    }

    pub fn add_visited(&mut self, id: usize) {
        self.visited.insert(id);
    }

    pub fn add_exploring(&mut self, id: usize) {
        self.exploring.insert(id);
    }

    /// Write one mirror slot. Writes outside the mirror are ignored.
    pub fn write_slot(&mut self, index: usize, value: i32) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = value;
        }
    }

    /// Replace the whole mirror, e.g. after the dataset was regenerated
    pub fn load(&mut self, data: &[i32]) {
        self.data.clear();
        self.data.extend_from_slice(data);
    }

    /// Clear every transient and cumulative set. The mirror is kept.
    pub fn reset(&mut self) {
        self.comparing.clear();
        self.swapping.clear();
        self.sorted.clear();
        self.visited.clear();
        self.exploring.clear();
    }

    /// Apply one engine event
    pub fn apply(&mut self, event: &VisEvent) {
        match event {
            VisEvent::Reset => self.reset(),
            VisEvent::Load(values) => self.load(values),
            VisEvent::Compare(a, b) => self.set_comparing(&[*a, *b]),
            VisEvent::Swap(a, b) => self.set_swapping(&[*a, *b]),
            VisEvent::Write { index, value } => self.write_slot(*index, *value),
            VisEvent::Sorted(indices) => self.add_sorted(indices),
            VisEvent::Visit(id) => self.add_visited(*id),
            VisEvent::Explore(id) => self.add_exploring(*id),
        }
    }

    pub fn comparing(&self) -> &[usize] {
        &self.comparing
    }

    pub fn swapping(&self) -> &[usize] {
        &self.swapping
    }

    pub fn is_comparing(&self, id: usize) -> bool {
        self.comparing.contains(&id)
    }

    pub fn is_swapping(&self, id: usize) -> bool {
        self.swapping.contains(&id)
    }

    pub fn is_sorted(&self, index: usize) -> bool {
        self.sorted.contains(&index)
    }

    pub fn is_visited(&self, id: usize) -> bool {
        self.visited.contains(&id)
    }

    pub fn is_exploring(&self, id: usize) -> bool {
        self.exploring.contains(&id)
    }

    pub fn sorted_count(&self) -> usize {
        self.sorted.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn exploring_count(&self) -> usize {
        self.exploring.len()
    }

    /// The data mirror as the renderer should draw it
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Rough heap footprint, used to bound recorded histories
    pub fn estimated_size(&self) -> usize {
        let id = std::mem::size_of::<usize>();
        std::mem::size_of::<Self>()
            + self.data.len() * std::mem::size_of::<i32>()
            + (self.comparing.len() + self.swapping.len()) * id
            // hash sets: roughly two words per entry including control bytes
            + (self.sorted.len() + self.visited.len() + self.exploring.len()) * id * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparing_is_overwritten() {
        let mut state = VisualizationState::new();
        state.set_comparing(&[0, 1]);
        state.set_comparing(&[3, 4]);
        assert_eq!(state.comparing(), &[3, 4]);
        assert!(!state.is_comparing(0));
    }

    #[test]
    fn test_write_slot_ignores_out_of_range() {
        let mut state = VisualizationState::with_data(&[1, 2, 3]);
        state.write_slot(1, 9);
        state.write_slot(7, 9);
        assert_eq!(state.data(), &[1, 9, 3]);
    }

    #[test]
    fn test_reset_keeps_mirror() {
        let mut state = VisualizationState::with_data(&[4, 5]);
        state.add_sorted(&[0, 1]);
        state.add_visited(2);
        state.add_exploring(3);
        state.set_swapping(&[0, 1]);
        state.reset();
        assert_eq!(state.sorted_count(), 0);
        assert_eq!(state.visited_count(), 0);
        assert_eq!(state.exploring_count(), 0);
        assert!(state.swapping().is_empty());
        assert_eq!(state.data(), &[4, 5]);
    }

    #[test]
    fn test_visited_and_exploring_may_overlap() {
        let mut state = VisualizationState::new();
        state.add_exploring(2);
        state.add_visited(2);
        assert!(state.is_exploring(2));
        assert!(state.is_visited(2));
    }

    #[test]
    fn test_apply_dispatches_events() {
        let mut state = VisualizationState::with_data(&[3, 1]);
        state.apply(&VisEvent::Compare(0, 1));
        state.apply(&VisEvent::Write { index: 0, value: 1 });
        state.apply(&VisEvent::Write { index: 1, value: 3 });
        state.apply(&VisEvent::Swap(0, 1));
        state.apply(&VisEvent::Sorted(vec![0, 1]));
        assert_eq!(state.data(), &[1, 3]);
        assert!(state.is_comparing(1));
        assert!(state.is_swapping(0));
        assert!(state.is_sorted(0) && state.is_sorted(1));

        state.apply(&VisEvent::Load(vec![7, 8, 9]));
        assert_eq!(state.data(), &[7, 8, 9]);
        assert_eq!(state.sorted_count(), 2);
    }
}
