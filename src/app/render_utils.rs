use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::geometry::{self, Point, Vector};
use crate::highlight::{Mark, Marks};
use crate::viewport::PlaneTransform;

const FOCAL: Color32 = Color32::from_rgb(245, 206, 93);
const PARENT: Color32 = Color32::from_rgb(103, 196, 255);
const CHILD: Color32 = Color32::from_rgb(126, 214, 142);
const MENTIONED: Color32 = Color32::from_rgb(241, 146, 94);
const NODE_FILL: Color32 = Color32::from_rgb(44, 52, 62);
const NODE_STROKE: Color32 = Color32::from_gray(186);
const EDGE: Color32 = Color32::from_gray(150);

pub(super) fn to_point(pos: Pos2) -> Point {
    Point::new(f64::from(pos.x), f64::from(pos.y))
}

pub(super) fn to_vector(delta: Vec2) -> Vector {
    Vector::new(f64::from(delta.x), f64::from(delta.y))
}

pub(super) fn to_pos2(point: Point) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}

pub(super) fn to_plane_rect(rect: Rect) -> geometry::Rect {
    geometry::Rect::new(
        f64::from(rect.min.x),
        f64::from(rect.min.y),
        f64::from(rect.width()),
        f64::from(rect.height()),
    )
}

pub(super) fn to_screen_rect(transform: &PlaneTransform, rect: &geometry::Rect) -> Rect {
    Rect::from_two_pos(
        to_pos2(transform.plane_to_screen(rect.origin())),
        to_pos2(transform.plane_to_screen(rect.max())),
    )
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// Grid of 50 plane units, coarsened until lines are at least 16px apart.
pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: &PlaneTransform) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let mut step = (50.0 * transform.scale()) as f32;
    if !step.is_finite() || step <= 0.0 {
        return;
    }
    while step < 16.0 {
        step *= 2.0;
    }

    let origin = to_pos2(transform.plane_to_screen(Point::default()));
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct NodeStyle {
    pub(super) fill: Color32,
    pub(super) stroke: Color32,
    pub(super) text: Color32,
}

/// Focal, then parent, child and mentioned decide the accent colour.
pub(super) fn node_style(marks: Marks, pulse: f32) -> NodeStyle {
    let accent = if marks.contains(Mark::Focal) {
        Some(FOCAL)
    } else if marks.contains(Mark::Parent) {
        Some(PARENT)
    } else if marks.contains(Mark::Child) {
        Some(CHILD)
    } else if marks.contains(Mark::Mentioned) {
        Some(MENTIONED)
    } else {
        None
    };

    let style = match accent {
        Some(accent) => NodeStyle {
            fill: blend_color(NODE_FILL, accent, 0.35),
            stroke: accent,
            text: Color32::from_gray(245),
        },
        None if marks.contains(Mark::Ignored) => NodeStyle {
            fill: dim_color(NODE_FILL, 0.6),
            stroke: dim_color(NODE_STROKE, 0.35),
            text: dim_color(Color32::from_gray(220), 0.4),
        },
        None => NodeStyle {
            fill: NODE_FILL,
            stroke: NODE_STROKE,
            text: Color32::from_gray(230),
        },
    };

    if marks.contains(Mark::Animated) {
        NodeStyle {
            stroke: blend_color(style.stroke, Color32::WHITE, pulse * 0.6),
            ..style
        }
    } else {
        style
    }
}

/// Incoming, then outgoing and mentioned decide the colour.
pub(super) fn edge_color(marks: Marks, pulse: f32) -> Color32 {
    let color = if marks.contains(Mark::Incoming) {
        PARENT
    } else if marks.contains(Mark::Outgoing) {
        CHILD
    } else if marks.contains(Mark::Mentioned) {
        MENTIONED
    } else if marks.contains(Mark::Ignored) {
        dim_color(EDGE, 0.3)
    } else {
        EDGE
    };

    if marks.contains(Mark::Animated) {
        blend_color(color, Color32::WHITE, pulse * 0.5)
    } else {
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_accent_wins_over_mentioned() {
        let marks = Marks::NONE.with(Mark::Mentioned).with(Mark::Parent);
        assert_eq!(node_style(marks, 0.0).stroke, PARENT);
    }

    #[test]
    fn ignored_nodes_are_dimmed() {
        let ignored = node_style(Marks::NONE.with(Mark::Ignored), 0.0);
        let plain = node_style(Marks::NONE, 0.0);
        assert!(ignored.fill.a() < plain.fill.a());
    }

    #[test]
    fn animation_only_changes_stroke() {
        let marks = Marks::NONE.with(Mark::Child);
        let still = node_style(marks, 1.0);
        let pulsing = node_style(marks.with(Mark::Animated), 1.0);
        assert_eq!(still.fill, pulsing.fill);
        assert_ne!(still.stroke, pulsing.stroke);
    }

    #[test]
    fn incoming_edges_use_parent_colour() {
        let marks = Marks::NONE.with(Mark::Incoming).with(Mark::Mentioned);
        assert_eq!(edge_color(marks, 0.0), PARENT);
    }
}
