//! Directed graph pane

use super::utils::{draw_arrow, draw_node, flip_y, layout_canvas};
use crate::dataset::tree::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::dataset::{Graph, GraphLayout};
use crate::state::VisualizationState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render every vertex at its layout position, with the start vertex emphasized
pub fn render_graph_pane(
    frame: &mut Frame,
    area: Rect,
    graph: &Graph,
    layout: &GraphLayout,
    state: &VisualizationState,
    start: usize,
    title: &str,
) {
    let block = Block::default()
        .title(format!(" {} (start {}) ", title, start))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    if graph.is_empty() || layout.is_empty() {
        let paragraph = Paragraph::new("(empty graph, press g to generate)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let position = |vertex: usize| {
        layout
            .position(vertex)
            .map(|(x, y)| (x, flip_y(y, CANVAS_HEIGHT)))
    };

    let canvas = layout_canvas(block, CANVAS_WIDTH, CANVAS_HEIGHT, |ctx| {
        for (from, to) in graph.edges() {
            if let (Some(a), Some(b)) = (position(from), position(to)) {
                draw_arrow(ctx, a, b);
            }
        }
        ctx.layer();
        for vertex in graph.vertices() {
            let Some((x, y)) = position(vertex) else {
                continue;
            };
            let color =
                DEFAULT_THEME.node_color(state.is_visited(vertex), state.is_exploring(vertex));
            draw_node(ctx, x, y, vertex.to_string(), color, vertex == start);
        }
    });

    frame.render_widget(canvas, area);
}
