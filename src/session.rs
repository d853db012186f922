//! The driver context that owns one visualization session
//!
//! A [`Session`] holds the configuration, the current dataset, the view the
//! renderer reads, the recorded timeline of the last run and the running flag.
//! Runs can be driven two ways:
//!
//! - [`Session::start`] records the whole run into a [`Recorder`] and then
//!   plays it back one frame per pacing interval from [`Session::tick`]. The
//!   TUI uses this, so its event loop never blocks.
//! - [`Session::run_live`] runs the engine on a worker thread behind a
//!   [`PacedSink`] and polls the shared state until the run completes.
//!
//! Engine errors never escape a session: they are logged and the running flag
//! is cleared.

use crate::config::{AlgorithmFamily, SessionConfig};
use crate::dataset::{self, BinaryTree, Dataset, Graph};
use crate::engine::{
    AlgorithmEngine, AlgorithmKey, EngineError, GraphSearch, PacedSink, Pacing, RunStats,
    SharedState, SortAlgorithm, StepSink, TreeTraversal,
};
use crate::snapshot::{Frame, Recorder, Timeline};
use crate::state::VisualizationState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

/// One fully resolved run: the algorithm plus its own copy of the input
#[derive(Debug, Clone)]
pub enum RunJob {
    Sort {
        algorithm: SortAlgorithm,
        data: Vec<i32>,
    },
    Traverse {
        order: TreeTraversal,
        tree: BinaryTree,
    },
    Search {
        algorithm: GraphSearch,
        graph: Graph,
        start: usize,
    },
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutput {
    /// The sorted array
    Sorted(Vec<i32>),
    /// Node values in visit order
    Traversed(Vec<i32>),
    /// Vertex ids in visit order
    Searched(Vec<usize>),
}

impl RunJob {
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            RunJob::Sort { algorithm, .. } => algorithm.name(),
            RunJob::Traverse { order, .. } => order.name(),
            RunJob::Search { algorithm, .. } => algorithm.name(),
        }
    }

    /// Run the algorithm to completion against `sink`
    pub fn execute<S: StepSink + ?Sized>(
        self,
        sink: &mut S,
    ) -> Result<(RunOutput, RunStats), EngineError> {
        let mut engine = AlgorithmEngine::new(sink);
        let output = match self {
            RunJob::Sort {
                algorithm,
                mut data,
            } => {
                engine.sort(algorithm, &mut data)?;
                RunOutput::Sorted(data)
            }
            RunJob::Traverse { order, tree } => {
                RunOutput::Traversed(engine.traverse(order, &tree)?)
            }
            RunJob::Search {
                algorithm,
                graph,
                start,
            } => RunOutput::Searched(engine.search(algorithm, &graph, start)?),
        };
        Ok((output, engine.stats()))
    }
}

/// Run `job` on the calling thread; a panic inside the run becomes
/// [`EngineError::RunPanicked`]
fn execute_caught<S: StepSink + ?Sized>(
    job: RunJob,
    sink: &mut S,
) -> Result<(RunOutput, RunStats), EngineError> {
    panic::catch_unwind(AssertUnwindSafe(|| job.execute(sink)))
        .unwrap_or(Err(EngineError::RunPanicked))
}

/// Recorded run being played back (or reviewed once playback ends)
#[derive(Debug)]
struct Playback {
    timeline: Timeline,
    cursor: usize,
    output: RunOutput,
}

pub struct Session {
    config: SessionConfig,
    rng: StdRng,
    dataset: Dataset,
    state: VisualizationState,
    playback: Option<Playback>,
    running: bool,
    last_step: Instant,
    run_started: Option<Instant>,
    elapsed: Duration,
    stats: RunStats,
    last_output: Option<RunOutput>,
    last_error: Option<EngineError>,
}

impl Session {
    /// Create a session and generate its first dataset
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut session = Session {
            config,
            rng,
            dataset: Dataset::Array(Vec::new()),
            state: VisualizationState::new(),
            playback: None,
            running: false,
            last_step: Instant::now(),
            run_started: None,
            elapsed: Duration::ZERO,
            stats: RunStats::new(),
            last_output: None,
            last_error: None,
        };
        session.regenerate();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The view the renderer should draw right now
    pub fn state(&self) -> &VisualizationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Counters of the frame on screen
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Wall time of the run on screen; frozen once playback completes
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.run_started {
            Some(started) if self.running => now.saturating_duration_since(started),
            _ => self.elapsed,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.config.pacing
    }

    pub fn family(&self) -> AlgorithmFamily {
        self.config.family
    }

    /// Display name of the selected algorithm in the current family
    pub fn algorithm_name(&self) -> &'static str {
        match self.config.family {
            AlgorithmFamily::Sorting => self.config.sort.name(),
            AlgorithmFamily::Trees => self.config.traversal.name(),
            AlgorithmFamily::Graphs => self.config.search.name(),
        }
    }

    /// The start vertex a graph search would use, after falling back to vertex 0
    pub fn start_vertex(&self) -> usize {
        match (&self.dataset, self.config.start_vertex) {
            (Dataset::Graph { graph, .. }, Some(vertex)) if graph.contains(vertex) => vertex,
            _ => 0,
        }
    }

    /// Output of the last completed run
    pub fn last_output(&self) -> Option<&RunOutput> {
        self.last_output.as_ref()
    }

    /// Error that aborted the last run, if any
    pub fn last_error(&self) -> Option<&EngineError> {
        self.last_error.as_ref()
    }

    /// Current frame index and number of recorded frames
    pub fn frame_position(&self) -> Option<(usize, usize)> {
        self.playback
            .as_ref()
            .map(|playback| (playback.cursor, playback.timeline.len()))
    }

    /// The frame on screen, if a run has been recorded
    pub fn current_frame(&self) -> Option<&Frame> {
        self.playback
            .as_ref()
            .and_then(|playback| playback.timeline.get(playback.cursor))
    }

    /// Event lines of the frames up to the one on screen, newest last
    pub fn recent_events(&self, limit: usize) -> Vec<String> {
        let Some(playback) = self
            .playback
            .as_ref()
            .filter(|playback| !playback.timeline.is_empty())
        else {
            return Vec::new();
        };

        let mut lines = Vec::with_capacity(limit);
        for index in (0..=playback.cursor).rev() {
            let Some(frame) = playback.timeline.get(index) else {
                continue;
            };
            for event in frame.events.iter().rev() {
                if lines.len() == limit {
                    lines.reverse();
                    return lines;
                }
                lines.push(format!("{:>5}  {}", index + 1, event));
            }
        }
        lines.reverse();
        lines
    }

    /// Replace the dataset with a freshly generated one. Refused while running.
    pub fn generate(&mut self) -> bool {
        if self.refuse("generate") {
            return false;
        }
        self.regenerate();
        true
    }

    /// Regenerate the dataset and zero the statistics. Refused while running.
    pub fn reset(&mut self) -> bool {
        if self.refuse("reset") {
            return false;
        }
        self.regenerate();
        self.stats = RunStats::new();
        self.elapsed = Duration::ZERO;
        self.run_started = None;
        self.last_output = None;
        self.last_error = None;
        true
    }

    /// Switch to the next algorithm family, generating a matching dataset
    pub fn next_family(&mut self) -> bool {
        if self.refuse("switch family") {
            return false;
        }
        self.config.family = self.config.family.next();
        self.regenerate();
        true
    }

    /// Select the next algorithm within the current family
    pub fn next_algorithm(&mut self) -> bool {
        if self.refuse("switch algorithm") {
            return false;
        }
        match self.config.family {
            AlgorithmFamily::Sorting => self.config.sort = self.config.sort.next(),
            AlgorithmFamily::Trees => self.config.traversal = self.config.traversal.next(),
            AlgorithmFamily::Graphs => self.config.search = self.config.search.next(),
        }
        true
    }

    /// Select an algorithm by key; unknown keys fall back to the family default
    pub fn select_algorithm(&mut self, key: &str) -> bool {
        if self.refuse("select algorithm") {
            return false;
        }
        match self.config.family {
            AlgorithmFamily::Sorting => self.config.sort = SortAlgorithm::resolve(key),
            AlgorithmFamily::Trees => self.config.traversal = TreeTraversal::resolve(key),
            AlgorithmFamily::Graphs => self.config.search = GraphSearch::resolve(key),
        }
        true
    }

    /// Cycle the graph search start vertex
    pub fn next_start_vertex(&mut self) -> bool {
        if self.refuse("change start vertex") {
            return false;
        }
        let len = self.dataset.len().max(1);
        self.config.start_vertex = Some((self.start_vertex() + 1) % len);
        true
    }

    /// Speed can change mid-run; playback picks it up at the next frame
    pub fn set_speed(&mut self, speed: u8) {
        self.config.pacing = Pacing::new(speed);
    }

    pub fn faster(&mut self) {
        self.config.pacing = self.config.pacing.faster();
    }

    pub fn slower(&mut self) {
        self.config.pacing = self.config.pacing.slower();
    }

    /// The run the current configuration and dataset describe.
    ///
    /// `None` when the dataset does not belong to the selected family.
    pub fn job(&self) -> Option<RunJob> {
        match (&self.dataset, self.config.family) {
            (Dataset::Array(data), AlgorithmFamily::Sorting) => Some(RunJob::Sort {
                algorithm: self.config.sort,
                data: data.clone(),
            }),
            (Dataset::Tree(tree), AlgorithmFamily::Trees) => Some(RunJob::Traverse {
                order: self.config.traversal,
                tree: tree.clone(),
            }),
            (Dataset::Graph { graph, .. }, AlgorithmFamily::Graphs) => {
                let start = match self.config.start_vertex {
                    Some(vertex) if !graph.is_empty() && !graph.contains(vertex) => {
                        tracing::warn!(vertex, fallback = 0, "start vertex not in graph");
                        0
                    }
                    Some(vertex) => vertex,
                    None => 0,
                };
                Some(RunJob::Search {
                    algorithm: self.config.search,
                    graph: graph.clone(),
                    start,
                })
            }
            _ => None,
        }
    }

    /// Record a run and begin playing it back. Refused while running.
    ///
    /// Returns whether playback started. A run that fails is logged, leaves
    /// the session idle and is reported by [`last_error`](Session::last_error).
    pub fn start(&mut self, now: Instant) -> bool {
        if self.refuse("start") {
            return false;
        }
        let Some(job) = self.job() else {
            tracing::debug!(family = ?self.config.family, "no dataset for the selected family");
            return false;
        };

        self.running = true;
        self.last_error = None;
        let algorithm = job.algorithm_name();
        let mut recorder = Recorder::new(self.initial_view(), self.config.history_limit);

        match execute_caught(job, &mut recorder) {
            Ok((output, _)) => {
                let timeline = recorder.into_timeline();
                tracing::info!(algorithm, frames = timeline.len(), "run started");
                self.playback = Some(Playback {
                    timeline,
                    cursor: 0,
                    output,
                });
                self.run_started = Some(now);
                self.last_step = now;
                self.show_current();
                self.complete_if_done(now);
                true
            }
            Err(err) => {
                self.fail(algorithm, err);
                false
            }
        }
    }

    /// Advance playback by at most one frame if a pacing interval has passed
    pub fn tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        if now.saturating_duration_since(self.last_step) < self.config.pacing.delay() {
            return;
        }
        self.last_step = now;

        if let Some(playback) = &mut self.playback {
            playback.cursor = (playback.cursor + 1).min(playback.timeline.len().saturating_sub(1));
        }
        self.show_current();
        self.complete_if_done(now);
    }

    /// Run with real-time pacing on a worker thread, blocking until done.
    ///
    /// The calling thread logs progress once per pacing interval.
    pub fn run_live(&mut self) -> Option<RunOutput> {
        if self.refuse("start") {
            return None;
        }
        let job = self.job()?;

        self.running = true;
        self.last_error = None;
        self.playback = None;
        let algorithm = job.algorithm_name();
        let pacing = self.config.pacing;
        let started = Instant::now();
        let shared: SharedState = Arc::new(RwLock::new(self.initial_view()));
        let mut sink = PacedSink::new(Arc::clone(&shared), pacing);

        tracing::info!(algorithm, speed = pacing.speed(), "run started");
        let worker = thread::spawn(move || job.execute(&mut sink));

        while !worker.is_finished() {
            thread::sleep(pacing.delay());
            match shared.read() {
                Ok(state) => tracing::info!(
                    comparing = ?state.comparing(),
                    swapping = ?state.swapping(),
                    sorted = state.sorted_count(),
                    visited = state.visited_count(),
                    exploring = state.exploring_count(),
                    "progress"
                ),
                Err(_) => break,
            }
        }

        let result = worker.join().unwrap_or(Err(EngineError::RunPanicked));
        if let Ok(state) = shared.read() {
            self.state = state.clone();
        }

        match result {
            Ok((output, stats)) => {
                self.running = false;
                self.stats = stats;
                self.elapsed = started.elapsed();
                self.run_started = None;
                self.finish_output(output.clone());
                tracing::info!(
                    algorithm,
                    comparisons = stats.comparisons(),
                    mutations = stats.mutations(),
                    visits = stats.visits(),
                    elapsed_ms = self.elapsed.as_millis() as u64,
                    "run complete"
                );
                Some(output)
            }
            Err(err) => {
                self.fail(algorithm, err);
                None
            }
        }
    }

    /// Show the previous recorded frame. Only while idle.
    pub fn step_back(&mut self) -> bool {
        self.review(|cursor, _| cursor.checked_sub(1))
    }

    /// Show the next recorded frame. Only while idle.
    pub fn step_forward(&mut self) -> bool {
        self.review(|cursor, len| (cursor + 1 < len).then_some(cursor + 1))
    }

    pub fn first_frame(&mut self) -> bool {
        self.review(|cursor, _| (cursor > 0).then_some(0))
    }

    pub fn last_frame(&mut self) -> bool {
        self.review(|cursor, len| (cursor + 1 < len).then(|| len - 1))
    }

    fn review(&mut self, target: impl FnOnce(usize, usize) -> Option<usize>) -> bool {
        if self.running {
            return false;
        }
        let Some(playback) = &mut self.playback else {
            return false;
        };
        match target(playback.cursor, playback.timeline.len()) {
            Some(cursor) => {
                playback.cursor = cursor;
                self.show_current();
                true
            }
            None => false,
        }
    }

    /// Log and swallow refused actions while a run is in progress
    fn refuse(&self, action: &str) -> bool {
        if self.running {
            tracing::debug!(action, "refused while a run is in progress");
        }
        self.running
    }

    fn regenerate(&mut self) {
        let size = self.config.size;
        self.dataset = match self.config.family {
            AlgorithmFamily::Sorting => {
                Dataset::Array(dataset::generate_array(&mut self.rng, self.config.shape, size))
            }
            AlgorithmFamily::Trees => Dataset::Tree(BinaryTree::random(&mut self.rng, size)),
            AlgorithmFamily::Graphs => dataset::generate_graph(&mut self.rng, size),
        };
        self.state = VisualizationState::with_data(&self.dataset.mirror_values());
        self.playback = None;
        tracing::debug!(family = ?self.config.family, size, "dataset generated");
    }

    /// The view a run starts from: the dataset as it is, no highlights
    fn initial_view(&self) -> VisualizationState {
        VisualizationState::with_data(&self.dataset.mirror_values())
    }

    fn show_current(&mut self) {
        let Some(frame) = self.current_frame() else {
            return;
        };
        let (state, stats) = (frame.state.clone(), frame.stats);
        self.state = state;
        self.stats = stats;
    }

    fn complete_if_done(&mut self, now: Instant) {
        let Some(playback) = &self.playback else {
            return;
        };
        if playback.cursor + 1 < playback.timeline.len() {
            return;
        }

        let output = playback.output.clone();
        self.running = false;
        if let Some(started) = self.run_started {
            self.elapsed = now.saturating_duration_since(started);
        }
        self.finish_output(output);
        tracing::info!(
            algorithm = self.algorithm_name(),
            comparisons = self.stats.comparisons(),
            mutations = self.stats.mutations(),
            visits = self.stats.visits(),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "run complete"
        );
    }

    /// A finished sort leaves its result as the new dataset
    fn finish_output(&mut self, output: RunOutput) {
        if let RunOutput::Sorted(values) = &output {
            self.dataset = Dataset::Array(values.clone());
        }
        self.last_output = Some(output);
    }

    fn fail(&mut self, algorithm: &str, err: EngineError) {
        tracing::error!(algorithm, error = %err, "run failed");
        self.running = false;
        self.last_error = Some(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Checkpoint;
    use crate::state::VisEvent;

    fn config(family: AlgorithmFamily, size: usize) -> SessionConfig {
        SessionConfig {
            family,
            size,
            seed: Some(7),
            ..SessionConfig::default()
        }
    }

    /// Tick far enough apart that every tick advances a frame
    fn play_out(session: &mut Session, mut now: Instant) -> Instant {
        let step = session.pacing().delay();
        while session.is_running() {
            now += step;
            session.tick(now);
        }
        now
    }

    /// Sink whose first suspension blows up
    struct FailingSink;

    impl StepSink for FailingSink {
        fn emit(&mut self, _event: VisEvent) {}

        fn suspend(&mut self, _checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
            panic!("sink failed mid-run");
        }

        fn finish(&mut self, _checkpoint: Checkpoint<'_>) -> Result<(), EngineError> {
            Ok(())
        }
    }

    #[test]
    fn test_panic_during_run_becomes_error() {
        let job = RunJob::Sort {
            algorithm: SortAlgorithm::Bubble,
            data: vec![2, 1],
        };
        let err = execute_caught(job, &mut FailingSink).unwrap_err();
        assert_eq!(err, EngineError::RunPanicked);

        // runs that never reach the failing step still complete
        let job = RunJob::Sort {
            algorithm: SortAlgorithm::Bubble,
            data: vec![1, 2],
        };
        let (output, _) = execute_caught(job, &mut FailingSink).unwrap();
        assert_eq!(output, RunOutput::Sorted(vec![1, 2]));
    }

    #[test]
    fn test_new_session_generates_dataset() {
        let session = Session::new(config(AlgorithmFamily::Trees, 12));
        assert!(matches!(session.dataset(), Dataset::Tree(tree) if tree.len() == 12));
        assert_eq!(session.state().data().len(), 12);
        assert!(!session.is_running());
    }

    #[test]
    fn test_tick_waits_for_pacing_interval() {
        let mut session = Session::new(config(AlgorithmFamily::Sorting, 8));
        let now = Instant::now();
        assert!(session.start(now));
        let (cursor, _) = session.frame_position().unwrap();
        assert_eq!(cursor, 0);

        session.tick(now + Duration::from_millis(10));
        assert_eq!(session.frame_position().unwrap().0, 0);

        session.tick(now + session.pacing().delay());
        assert_eq!(session.frame_position().unwrap().0, 1);
    }

    #[test]
    fn test_playback_ends_sorted_and_idle() {
        let mut session = Session::new(config(AlgorithmFamily::Sorting, 10));
        let mut expected = session.state().data().to_vec();
        expected.sort();

        let now = Instant::now();
        assert!(session.start(now));
        assert!(session.is_running());
        play_out(&mut session, now);

        assert!(!session.is_running());
        assert_eq!(session.state().data(), expected.as_slice());
        assert_eq!(session.state().sorted_count(), 10);
        assert_eq!(session.dataset(), &Dataset::Array(expected.clone()));
        assert_eq!(session.last_output(), Some(&RunOutput::Sorted(expected)));
    }

    #[test]
    fn test_review_only_when_idle() {
        let mut session = Session::new(config(AlgorithmFamily::Trees, 5));
        let now = Instant::now();
        assert!(session.start(now));
        assert!(!session.step_back());

        play_out(&mut session, now);
        let (cursor, len) = session.frame_position().unwrap();
        assert_eq!(cursor + 1, len);

        assert!(session.first_frame());
        assert_eq!(session.frame_position().unwrap().0, 0);
        assert_eq!(session.state().visited_count(), 1);
        assert!(!session.step_back());
        assert!(session.step_forward());
        assert!(session.last_frame());
        assert_eq!(session.state().visited_count(), 5);
    }

    #[test]
    fn test_history_limit_failure_clears_running() {
        let mut session = Session::new(SessionConfig {
            history_limit: 64,
            ..config(AlgorithmFamily::Sorting, 30)
        });
        assert!(!session.start(Instant::now()));
        assert!(!session.is_running());
        assert!(matches!(
            session.last_error(),
            Some(EngineError::HistoryLimitExceeded { .. })
        ));
        // controls usable again
        assert!(session.generate());
    }

    #[test]
    fn test_invalid_start_vertex_falls_back_to_zero() {
        let mut session = Session::new(SessionConfig {
            start_vertex: Some(99),
            ..config(AlgorithmFamily::Graphs, 6)
        });
        assert_eq!(session.start_vertex(), 0);
        assert!(matches!(session.job(), Some(RunJob::Search { start: 0, .. })));

        let now = Instant::now();
        assert!(session.start(now));
        play_out(&mut session, now);
        match session.last_output() {
            Some(RunOutput::Searched(order)) => assert_eq!(order.first(), Some(&0)),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_next_start_vertex_wraps() {
        let mut session = Session::new(config(AlgorithmFamily::Graphs, 3));
        assert!(session.next_start_vertex());
        assert_eq!(session.start_vertex(), 1);
        session.next_start_vertex();
        session.next_start_vertex();
        assert_eq!(session.start_vertex(), 0);
    }

    #[test]
    fn test_recent_events_are_newest_last() {
        let mut session = Session::new(config(AlgorithmFamily::Sorting, 4));
        let now = Instant::now();
        session.start(now);
        play_out(&mut session, now);

        let lines = session.recent_events(3);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("sorted"), "{:?}", lines);
    }
}
