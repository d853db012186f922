//! Comparison sorts
//!
//! Counting rules shared by every sort:
//! - one comparison per ordering test between two elements
//! - one mutation per swap or shift; plain placements (the insertion-sort key,
//!   merge-sort writes) update the mirror but are not counted
//!
//! Suspension points follow each algorithm's natural "interesting" moment, see
//! the individual functions.

use super::{AlgorithmEngine, AlgorithmKey, EngineError, RunStats, SortAlgorithm, StepSink};
use crate::state::VisEvent;

impl<S: StepSink + ?Sized> AlgorithmEngine<'_, S> {
    /// Sort `data` in place, publishing every step to the sink.
    ///
    /// The mirror is loaded from `data` first, and on completion every index is
    /// marked sorted. An empty slice completes immediately without suspending.
    pub fn sort(
        &mut self,
        algorithm: SortAlgorithm,
        data: &mut [i32],
    ) -> Result<RunStats, EngineError> {
        self.begin_run();
        self.emit(VisEvent::Load(data.to_vec()));
        tracing::debug!(algorithm = algorithm.key(), len = data.len(), "sort started");

        if let Some(last) = data.len().checked_sub(1) {
            match algorithm {
                SortAlgorithm::Bubble => self.bubble_sort(data)?,
                SortAlgorithm::Selection => self.selection_sort(data)?,
                SortAlgorithm::Insertion => self.insertion_sort(data)?,
                SortAlgorithm::Quick => self.quick_sort(data, 0, last)?,
                SortAlgorithm::Merge => self.merge_sort(data, 0, last)?,
            }
            self.emit(VisEvent::Sorted((0..data.len()).collect()));
        }

        self.end_run(data)
    }

    /// Store `value` at `index` and mirror it
    fn write(&mut self, data: &mut [i32], index: usize, value: i32) {
        data[index] = value;
        self.emit(VisEvent::Write { index, value });
    }

    /// Counted exchange of two slots, mirrored
    fn exchange(&mut self, data: &mut [i32], a: usize, b: usize) {
        data.swap(a, b);
        self.stats.bump_mutations();
        self.emit(VisEvent::Write {
            index: a,
            value: data[a],
        });
        self.emit(VisEvent::Write {
            index: b,
            value: data[b],
        });
    }

    /// Always `n - 1` full passes, no early exit. Suspends on swaps only.
    fn bubble_sort(&mut self, data: &mut [i32]) -> Result<(), EngineError> {
        let n = data.len();
        for pass in 0..n.saturating_sub(1) {
            for j in 0..n - pass - 1 {
                self.stats.bump_comparisons();
                if data[j] > data[j + 1] {
                    self.exchange(data, j, j + 1);
                    self.emit(VisEvent::Compare(j, j + 1));
                    self.emit(VisEvent::Swap(j, j + 1));
                    self.suspend(data)?;
                }
            }
        }
        Ok(())
    }

    /// Suspends on every candidate comparison, and on the swap when the minimum moved
    fn selection_sort(&mut self, data: &mut [i32]) -> Result<(), EngineError> {
        let n = data.len();
        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            for j in i + 1..n {
                self.stats.bump_comparisons();
                if data[j] < data[min] {
                    min = j;
                }
                self.emit(VisEvent::Compare(i, j));
                self.suspend(data)?;
            }

            if min != i {
                self.exchange(data, i, min);
                self.emit(VisEvent::Swap(i, min));
                self.suspend(data)?;
            }
        }
        Ok(())
    }

    /// Every evaluated `data[j - 1] > key` test is a comparison; each shift is
    /// also a mutation and suspends. The key's final placement is not counted.
    fn insertion_sort(&mut self, data: &mut [i32]) -> Result<(), EngineError> {
        for i in 1..data.len() {
            let key = data[i];
            let mut j = i;
            while j > 0 {
                self.stats.bump_comparisons();
                if data[j - 1] <= key {
                    break;
                }
                let shifted = data[j - 1];
                self.write(data, j, shifted);
                self.stats.bump_mutations();
                self.emit(VisEvent::Compare(j - 1, j));
                self.emit(VisEvent::Swap(j - 1, j));
                self.suspend(data)?;
                j -= 1;
            }
            self.write(data, j, key);
        }
        Ok(())
    }

    /// Sorts `data[low..=high]`; the low partition is handled first
    fn quick_sort(
        &mut self,
        data: &mut [i32],
        low: usize,
        high: usize,
    ) -> Result<(), EngineError> {
        if low < high {
            let pivot = self.partition(data, low, high)?;
            if pivot > low {
                self.quick_sort(data, low, pivot - 1)?;
            }
            self.quick_sort(data, pivot + 1, high)?;
        }
        Ok(())
    }

    /// Lomuto partition around `data[high]`. Returns the pivot's final index.
    fn partition(
        &mut self,
        data: &mut [i32],
        low: usize,
        high: usize,
    ) -> Result<usize, EngineError> {
        let pivot = data[high];
        // next slot for an element smaller than the pivot
        let mut store = low;

        for j in low..high {
            self.stats.bump_comparisons();
            self.emit(VisEvent::Compare(j, high));
            self.suspend(data)?;

            if data[j] < pivot {
                if store != j {
                    self.exchange(data, store, j);
                    self.emit(VisEvent::Swap(store, j));
                    self.suspend(data)?;
                }
                store += 1;
            }
        }

        if store != high {
            self.exchange(data, store, high);
            self.emit(VisEvent::Swap(store, high));
            self.suspend(data)?;
        }

        Ok(store)
    }

    /// Top-down merge sort of `data[left..=right]`
    fn merge_sort(
        &mut self,
        data: &mut [i32],
        left: usize,
        right: usize,
    ) -> Result<(), EngineError> {
        if left < right {
            let mid = (left + right) / 2;
            self.merge_sort(data, left, mid)?;
            self.merge_sort(data, mid + 1, right)?;
            self.merge(data, left, mid, right)?;
        }
        Ok(())
    }

    /// Stable merge of `data[left..=mid]` and `data[mid + 1..=right]`.
    ///
    /// Only pairwise compares count and suspend; tail copies are plain writes.
    fn merge(
        &mut self,
        data: &mut [i32],
        left: usize,
        mid: usize,
        right: usize,
    ) -> Result<(), EngineError> {
        let left_run = data[left..=mid].to_vec();
        let right_run = data[mid + 1..=right].to_vec();
        let (mut i, mut j, mut k) = (0, 0, left);

        while i < left_run.len() && j < right_run.len() {
            self.stats.bump_comparisons();
            self.emit(VisEvent::Compare(left + i, mid + 1 + j));
            self.suspend(data)?;

            let value = if left_run[i] <= right_run[j] {
                i += 1;
                left_run[i - 1]
            } else {
                j += 1;
                right_run[j - 1]
            };
            self.write(data, k, value);
            k += 1;
        }

        for &value in left_run[i..].iter().chain(&right_run[j..]) {
            self.write(data, k, value);
            k += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VisualizationState;

    fn run(algorithm: SortAlgorithm, input: &[i32]) -> (Vec<i32>, RunStats, VisualizationState) {
        let mut data = input.to_vec();
        let mut state = VisualizationState::new();
        let stats = AlgorithmEngine::new(&mut state)
            .sort(algorithm, &mut data)
            .unwrap();
        (data, stats, state)
    }

    #[test]
    fn test_bubble_reverse_five() {
        let (data, stats, state) = run(SortAlgorithm::Bubble, &[5, 4, 3, 2, 1]);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
        assert_eq!(state.data(), &[1, 2, 3, 4, 5]);
        assert_eq!(stats.comparisons(), 10);
        assert_eq!(stats.mutations(), 10);
    }

    #[test]
    fn test_bubble_has_no_early_exit() {
        let (_, stats, _) = run(SortAlgorithm::Bubble, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(stats.comparisons(), 15);
        assert_eq!(stats.mutations(), 0);
    }

    #[test]
    fn test_selection_counts_every_candidate() {
        let (data, stats, _) = run(SortAlgorithm::Selection, &[1, 2, 3, 4]);
        assert_eq!(data, vec![1, 2, 3, 4]);
        assert_eq!(stats.comparisons(), 6);
        assert_eq!(stats.mutations(), 0);

        let (data, stats, _) = run(SortAlgorithm::Selection, &[3, 1, 2]);
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(stats.comparisons(), 3);
        assert_eq!(stats.mutations(), 2);
    }

    #[test]
    fn test_insertion_sorted_input() {
        let (_, stats, _) = run(SortAlgorithm::Insertion, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(stats.comparisons(), 6);
        assert_eq!(stats.mutations(), 0);
    }

    #[test]
    fn test_insertion_reverse_input() {
        let (data, stats, _) = run(SortAlgorithm::Insertion, &[4, 3, 2, 1]);
        assert_eq!(data, vec![1, 2, 3, 4]);
        // every test succeeds and each one shifts; running off the front ends the scan
        assert_eq!(stats.comparisons(), 6);
        assert_eq!(stats.mutations(), 6);
    }

    #[test]
    fn test_quick_skips_self_swaps() {
        // already sorted: every scanned element is smaller than the pivot and
        // already in its slot, and the pivot never moves
        let (data, stats, _) = run(SortAlgorithm::Quick, &[1, 2, 3, 4]);
        assert_eq!(data, vec![1, 2, 3, 4]);
        assert_eq!(stats.comparisons(), 6);
        assert_eq!(stats.mutations(), 0);
    }

    #[test]
    fn test_quick_partition_counts() {
        let (data, stats, _) = run(SortAlgorithm::Quick, &[3, 2, 1]);
        assert_eq!(data, vec![1, 2, 3]);
        // pivot 1 scans 2 elements and moves to the front; then [2, 3] scans 1
        assert_eq!(stats.comparisons(), 3);
        assert_eq!(stats.mutations(), 1);
    }

    #[test]
    fn test_merge_counts_only_pairwise_compares() {
        let (data, stats, _) = run(SortAlgorithm::Merge, &[1, 2, 3, 4]);
        assert_eq!(data, vec![1, 2, 3, 4]);
        // [1]+[2]: 1, [3]+[4]: 1, [1,2]+[3,4]: 2 (left run exhausts first)
        assert_eq!(stats.comparisons(), 4);
        assert_eq!(stats.mutations(), 0);
    }

    #[test]
    fn test_merge_takes_left_on_ties() {
        // [2,2]+[2]: taking the left element twice exhausts the left run
        // only after two compares
        let (data, stats, _) = run(SortAlgorithm::Merge, &[2, 2, 2]);
        assert_eq!(data, vec![2, 2, 2]);
        assert_eq!(stats.comparisons(), 3);
    }

    #[test]
    fn test_every_index_marked_sorted() {
        for &algorithm in SortAlgorithm::ALL {
            let (_, _, state) = run(algorithm, &[9, 2, 7, 2, 5]);
            assert_eq!(state.sorted_count(), 5, "{}", algorithm.name());
            assert_eq!(state.data(), &[2, 2, 5, 7, 9], "{}", algorithm.name());
        }
    }

    #[test]
    fn test_empty_and_single_inputs_are_no_ops() {
        for &algorithm in SortAlgorithm::ALL {
            let (data, stats, state) = run(algorithm, &[]);
            assert!(data.is_empty());
            assert_eq!(stats.comparisons(), 0);
            assert_eq!(state.sorted_count(), 0);

            let (data, stats, state) = run(algorithm, &[42]);
            assert_eq!(data, vec![42]);
            assert_eq!(stats.comparisons(), 0);
            assert_eq!(state.sorted_count(), 1);
        }
    }
}
