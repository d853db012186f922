//! Main TUI application state and logic

use crate::config::AlgorithmFamily;
use crate::dataset::Dataset;
use crate::session::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// How long the loop waits for a key before pumping playback again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The main application state
pub struct App {
    /// The session being visualized
    pub session: Session,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the last playback has been announced as finished
    announced_done: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            should_quit: false,
            status_message: String::from("Ready!"),
            announced_done: true,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick(Instant::now());

            // Use poll with timeout so playback keeps advancing without input
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Advance playback and report when it finishes
    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now);
        if !self.session.is_running() && !self.announced_done {
            self.announced_done = true;
            self.status_message = "Done! ←/→ to review".to_string();
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        // Visualization and side column, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(pane_area);

        // Right column: stats (top) | steps (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0)])
            .split(columns[1]);

        self.render_visualization(frame, columns[0]);

        super::panes::render_stats_pane(
            frame,
            right_rows[0],
            &super::panes::StatsRenderData {
                family: self.session.family(),
                algorithm: self.session.algorithm_name(),
                stats: self.session.stats(),
                elapsed: self.session.elapsed(Instant::now()),
                pacing: self.session.pacing(),
                dataset_len: self.session.dataset().len(),
            },
        );

        let steps_area = right_rows[1];
        let lines = self
            .session
            .recent_events(super::panes::steps::visible_rows(steps_area));
        super::panes::render_steps_pane(frame, steps_area, &lines, self.session.is_running());

        // Render status bar
        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.session.frame_position(),
            self.session.is_running(),
            self.session.last_error().is_some(),
        );
    }

    fn render_visualization(&self, frame: &mut Frame, area: Rect) {
        let state = self.session.state();
        let title = self.session.algorithm_name();

        match self.session.dataset() {
            Dataset::Tree(tree) => {
                super::panes::render_tree_pane(frame, area, tree, state, title);
            }
            Dataset::Graph { graph, layout } => {
                super::panes::render_graph_pane(
                    frame,
                    area,
                    graph,
                    layout,
                    state,
                    self.session.start_vertex(),
                    title,
                );
            }
            _ => super::panes::render_array_pane(frame, area, state, title),
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Enter | KeyCode::Char('s') => {
                if self.session.start(Instant::now()) {
                    self.announced_done = false;
                    self.status_message = format!("Running {}...", self.session.algorithm_name());
                    // a run with a single frame is already over
                    self.tick(Instant::now());
                } else if let Some(err) = self.session.last_error() {
                    self.status_message = format!("Run failed: {}", err);
                } else {
                    self.refused("start");
                }
            }
            KeyCode::Char('g') => {
                if self.session.generate() {
                    self.status_message = "Generated new data".to_string();
                } else {
                    self.refused("generate");
                }
            }
            KeyCode::Char('r') => {
                if self.session.reset() {
                    self.status_message = "Reset".to_string();
                } else {
                    self.refused("reset");
                }
            }
            KeyCode::Tab => {
                if self.session.next_family() {
                    self.status_message = self.session.family().title().to_string();
                } else {
                    self.refused("switch family");
                }
            }
            KeyCode::Char('a') => {
                if self.session.next_algorithm() {
                    self.status_message = format!("Selected {}", self.session.algorithm_name());
                } else {
                    self.refused("switch algorithm");
                }
            }
            KeyCode::Char('v') => {
                if self.session.family() != AlgorithmFamily::Graphs {
                    self.status_message = "Start vertex only applies to graphs".to_string();
                } else if self.session.next_start_vertex() {
                    self.status_message = format!("Start vertex {}", self.session.start_vertex());
                } else {
                    self.refused("change start vertex");
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.session.faster();
                self.status_message = format!("Speed {}", self.session.pacing().speed());
            }
            KeyCode::Char('-') | KeyCode::Down => {
                self.session.slower();
                self.status_message = format!("Speed {}", self.session.pacing().speed());
            }
            KeyCode::Left => self.review(Session::step_back, "Stepped backward"),
            KeyCode::Right => self.review(Session::step_forward, "Stepped forward"),
            KeyCode::Backspace => self.review(Session::first_frame, "Jumped to start"),
            KeyCode::End => self.review(Session::last_frame, "Jumped to end"),
            _ => {}
        }
    }

    fn review(&mut self, step: fn(&mut Session) -> bool, message: &str) {
        if self.session.is_running() {
            self.refused("review");
        } else if step(&mut self.session) {
            self.status_message = message.to_string();
        } else if self.session.frame_position().is_none() {
            self.status_message = "Nothing recorded yet".to_string();
        }
    }

    fn refused(&mut self, action: &str) {
        self.status_message = format!("Cannot {} while running", action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app(family: AlgorithmFamily) -> App {
        App::new(Session::new(SessionConfig {
            family,
            size: 6,
            seed: Some(3),
            ..SessionConfig::default()
        }))
    }

    #[test]
    fn test_keys_drive_session() {
        let mut app = app(AlgorithmFamily::Sorting);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.session.algorithm_name(), "Selection Sort");

        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.session.pacing().speed(), 6);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.family(), AlgorithmFamily::Trees);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_generate_refused_while_running() {
        let mut app = app(AlgorithmFamily::Trees);
        press(&mut app, KeyCode::Enter);
        assert!(app.session.is_running());

        let before = app.session.dataset().clone();
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.session.dataset(), &before);
        assert_eq!(app.status_message, "Cannot generate while running");
    }
}
