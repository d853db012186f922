//! Run statistics pane

use crate::config::AlgorithmFamily;
use crate::engine::{Pacing, RunStats};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};
use std::time::Duration;

/// Everything the statistics pane shows
pub struct StatsRenderData<'a> {
    pub family: AlgorithmFamily,
    pub algorithm: &'a str,
    pub stats: RunStats,
    pub elapsed: Duration,
    pub pacing: Pacing,
    pub dataset_len: usize,
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", label),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.number)),
    ])
}

/// Render live counters for the frame on screen
pub fn render_stats_pane(frame: &mut Frame, area: Rect, data: &StatsRenderData) {
    let block = Block::default()
        .title(format!(" {} ", data.family.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 0, 0, 0));

    let mut lines = vec![
        Line::from(Span::styled(
            data.algorithm.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        )),
        row("Size", data.dataset_len.to_string()),
    ];

    // traversals never compare or move anything
    match data.family {
        AlgorithmFamily::Sorting => {
            lines.push(row("Comparisons", data.stats.comparisons().to_string()));
            lines.push(row("Swaps", data.stats.mutations().to_string()));
        }
        AlgorithmFamily::Trees | AlgorithmFamily::Graphs => {
            lines.push(row("Visits", data.stats.visits().to_string()));
        }
    }

    lines.push(row("Time", format!("{} ms", data.elapsed.as_millis())));
    lines.push(row(
        "Speed",
        format!(
            "{} ({} ms/step)",
            data.pacing.speed(),
            data.pacing.delay().as_millis()
        ),
    ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
