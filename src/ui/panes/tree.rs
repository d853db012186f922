//! Binary search tree pane

use super::utils::{draw_edge, draw_node, flip_y, layout_canvas, NODE_RADIUS};
use crate::dataset::tree::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::dataset::BinaryTree;
use crate::state::VisualizationState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the tree with its nodes colored by visit state.
///
/// Highlights are looked up by node id, so duplicate values light up
/// independently.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &BinaryTree,
    state: &VisualizationState,
    title: &str,
) {
    let placements = tree.layout();
    let block = Block::default()
        .title(format!(" {} (height {}) ", title, tree.height()))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    if placements.is_empty() {
        let paragraph = Paragraph::new("(empty tree, press g to generate)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // deep trees run past the nominal canvas; grow it rather than clip
    let height = placements
        .iter()
        .map(|placement| placement.y + NODE_RADIUS * 2.0)
        .fold(CANVAS_HEIGHT, f64::max);

    let canvas = layout_canvas(block, CANVAS_WIDTH, height, |ctx| {
        for placement in &placements {
            if let Some((px, py)) = placement.parent {
                draw_edge(
                    ctx,
                    (px, flip_y(py, height)),
                    (placement.x, flip_y(placement.y, height)),
                );
            }
        }
        ctx.layer();
        for placement in &placements {
            let color = DEFAULT_THEME.node_color(
                state.is_visited(placement.id),
                state.is_exploring(placement.id),
            );
            draw_node(
                ctx,
                placement.x,
                flip_y(placement.y, height),
                placement.value.to_string(),
                color,
                false,
            );
        }
    });

    frame.render_widget(canvas, area);
}
