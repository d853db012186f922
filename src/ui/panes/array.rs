//! Array pane: one bar per element, colored by its highlight state

use crate::dataset::MAX_RANDOM_VALUE;
use crate::state::VisualizationState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Widest a bar gets, however few elements there are
const MAX_BAR_WIDTH: u16 = 6;

/// Render the data mirror as a bar chart
pub fn render_array_pane(frame: &mut Frame, area: Rect, state: &VisualizationState, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let data = state.data();
    if data.is_empty() {
        let paragraph = Paragraph::new("(no data, press g to generate)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let (bar_width, bar_gap) = bar_geometry(area.width.saturating_sub(2), data.len());
    // values wider than the bar would be clipped, so leave them off
    let show_values = bar_width >= 2;

    let bars: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let color = DEFAULT_THEME.bar_color(
                state.is_swapping(index),
                state.is_comparing(index),
                state.is_sorted(index),
            );
            let bar = Bar::default()
                .value(value.max(0) as u64)
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color).add_modifier(Modifier::REVERSED));
            if show_values {
                bar.text_value(value.to_string())
            } else {
                bar.text_value(String::new())
            }
        })
        .collect();

    // never shrink the scale below the generator range, so bars keep their size
    let max = data
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .max(MAX_RANDOM_VALUE) as u64;

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(max);

    frame.render_widget(chart, area);
}

/// Bar width and gap that fit `count` bars into `width` columns
fn bar_geometry(width: u16, count: usize) -> (u16, u16) {
    let count = count.max(1) as u16;
    let per_bar = (width / count).max(1);
    if per_bar >= 3 {
        ((per_bar - 1).min(MAX_BAR_WIDTH), 1)
    } else {
        (per_bar, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_geometry() {
        assert_eq!(bar_geometry(100, 10), (6, 1));
        assert_eq!(bar_geometry(40, 10), (3, 1));
        assert_eq!(bar_geometry(20, 10), (2, 0));
        // more bars than columns still yields a drawable width
        assert_eq!(bar_geometry(50, 100), (1, 0));
    }
}
