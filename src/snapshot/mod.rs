// Step history for paced playback and review

use crate::engine::sink::debug_assert_mirror;
use crate::engine::{Checkpoint, EngineError, RunStats, StepSink};
use crate::state::{VisEvent, VisualizationState};

/// What the viewer sees at one suspension point
#[derive(Debug, Clone)]
pub struct Frame {
    pub state: VisualizationState,
    pub stats: RunStats,
    /// Events that led from the previous frame to this one
    pub events: Vec<VisEvent>,
}

impl Frame {
    /// Estimate the memory usage of this frame in bytes
    pub fn estimated_size(&self) -> usize {
        // events: assume 32 bytes each on average, loads carry their values
        let event_size: usize = self
            .events
            .iter()
            .map(|event| match event {
                VisEvent::Load(values) => 32 + values.len() * 4,
                VisEvent::Sorted(indices) => 32 + indices.len() * 8,
                _ => 32,
            })
            .sum();

        self.state.estimated_size() + event_size
    }
}

/// Recorded frames of one run, bounded by an estimated memory budget
#[derive(Debug)]
pub struct Timeline {
    frames: Vec<Frame>,
    max_memory: usize,
    current_memory: usize,
}

impl Timeline {
    pub fn new(max_memory: usize) -> Self {
        Timeline {
            frames: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a frame to history
    pub fn push(&mut self, frame: Frame) -> Result<(), EngineError> {
        let frame_size = frame.estimated_size();

        if self.current_memory + frame_size > self.max_memory {
            return Err(EngineError::HistoryLimitExceeded {
                current: self.current_memory,
                frame: frame_size,
                limit: self.max_memory,
            });
        }

        self.current_memory += frame_size;
        self.frames.push(frame);
        Ok(())
    }

    /// Get a frame by index
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// Sink that turns each suspension point into a recorded [`Frame`].
///
/// The run itself completes without waiting; a driver replays the frames one
/// pacing interval apart. The frame pushed by `finish` is the completed view.
#[derive(Debug)]
pub struct Recorder {
    live: VisualizationState,
    pending: Vec<VisEvent>,
    timeline: Timeline,
}

impl Recorder {
    /// Start recording from `initial`, the view as it was before the run
    pub fn new(initial: VisualizationState, max_memory: usize) -> Self {
        Recorder {
            live: initial,
            pending: Vec::new(),
            timeline: Timeline::new(max_memory),
        }
    }

    fn capture(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
        for event in &self.pending {
            self.live.apply(event);
        }
        debug_assert_mirror(&self.live, checkpoint);
        self.timeline.push(Frame {
            state: self.live.clone(),
            stats: checkpoint.stats,
            events: std::mem::take(&mut self.pending),
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }
}

impl StepSink for Recorder {
    fn emit(&mut self, event: VisEvent) {
        self.pending.push(event);
    }

    fn suspend(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
        self.capture(checkpoint)
    }

    fn finish(&mut self, checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
        self.capture(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AlgorithmEngine, SortAlgorithm};

    #[test]
    fn test_one_frame_per_suspension_plus_final() {
        let mut data = vec![2, 1];
        let mut recorder = Recorder::new(VisualizationState::with_data(&data), usize::MAX);
        AlgorithmEngine::new(&mut recorder)
            .sort(SortAlgorithm::Bubble, &mut data)
            .unwrap();

        let timeline = recorder.into_timeline();
        // one swap suspension, then the completed view
        assert_eq!(timeline.len(), 2);
        let swap = timeline.get(0).unwrap();
        assert_eq!(swap.state.data(), &[1, 2]);
        assert_eq!(swap.state.swapping(), &[0, 1]);
        assert_eq!(swap.stats.mutations(), 1);

        let done = timeline.get(1).unwrap();
        assert_eq!(done.state.sorted_count(), 2);
        assert!(matches!(done.events.as_slice(), [VisEvent::Sorted(_)]));
    }

    #[test]
    fn test_memory_limit_aborts_recording() {
        let mut data: Vec<i32> = (1..=30).rev().collect();
        let mut recorder = Recorder::new(VisualizationState::with_data(&data), 4096);
        let err = AlgorithmEngine::new(&mut recorder)
            .sort(SortAlgorithm::Bubble, &mut data)
            .unwrap_err();
        assert!(matches!(err, EngineError::HistoryLimitExceeded { limit: 4096, .. }));
        assert!(recorder.timeline().memory_usage() <= recorder.timeline().memory_limit());
    }
}
