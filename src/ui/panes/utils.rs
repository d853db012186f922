//! Helpers shared by the canvas panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine},
    widgets::Block,
};

/// Radius of a node circle in canvas units
pub const NODE_RADIUS: f64 = 14.0;

/// Layouts put `y = 0` at the top; canvases put it at the bottom
pub fn flip_y(y: f64, height: f64) -> f64 {
    height - y
}

/// A braille canvas spanning `width` x `height` layout units
pub fn layout_canvas<'a, F>(block: Block<'a>, width: f64, height: f64, painter: F) -> Canvas<'a, F>
where
    F: Fn(&mut Context),
{
    Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(painter)
}

/// Straight edge between two canvas points
pub fn draw_edge(ctx: &mut Context, from: (f64, f64), to: (f64, f64)) {
    ctx.draw(&CanvasLine::new(from.0, from.1, to.0, to.1, DEFAULT_THEME.edge));
}

/// Directed edge that stops at the target's rim, with a dot marking the head
pub fn draw_arrow(ctx: &mut Context, from: (f64, f64), to: (f64, f64)) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length <= NODE_RADIUS * 2.0 {
        draw_edge(ctx, from, to);
        return;
    }
    let (ux, uy) = (dx / length, dy / length);
    let tail = (from.0 + ux * NODE_RADIUS, from.1 + uy * NODE_RADIUS);
    let head = (to.0 - ux * NODE_RADIUS, to.1 - uy * NODE_RADIUS);
    draw_edge(ctx, tail, head);
    ctx.draw(&Circle {
        x: head.0,
        y: head.1,
        radius: 2.0,
        color: DEFAULT_THEME.fg,
    });
}

/// Circle with its value printed in the middle
pub fn draw_node(ctx: &mut Context, x: f64, y: f64, label: String, color: Color, emphasized: bool) {
    ctx.draw(&Circle {
        x,
        y,
        radius: NODE_RADIUS,
        color,
    });
    let mut style = Style::default().fg(color);
    if emphasized {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    // labels are anchored at their left edge
    let offset = label.len() as f64 * 4.0;
    ctx.print(x - offset, y, Span::styled(label, style));
}
