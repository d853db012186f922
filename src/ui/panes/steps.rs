//! Step log pane: the events behind the frames shown so far

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Number of log lines that fit in a pane of `area`'s height
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize // Account for borders, min 1
}

/// Render the step log, newest line at the bottom
pub fn render_steps_pane(frame: &mut Frame, area: Rect, lines: &[String], is_running: bool) {
    let border_style = if is_running {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Steps ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no steps yet, press Enter to start)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let newest = lines.len() - 1;
    let items: Vec<ListItem> = lines
        .iter()
        .enumerate()
        .skip(lines.len().saturating_sub(visible_rows(area)))
        .map(|(index, line)| {
            let style = if index == newest {
                Style::default().fg(DEFAULT_THEME.fg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            ListItem::new(line.as_str()).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
