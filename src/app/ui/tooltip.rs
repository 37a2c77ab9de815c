use eframe::egui::{Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2, vec2};

use crate::highlight::Mark;

use super::super::ViewModel;

const POINTER_OFFSET: f32 = 10.0;
const EDGE_THRESHOLD: f32 = 150.0;
const PADDING: f32 = 6.0;

/// Top-left corner of a tooltip of `size` next to `pointer`, flipped to the
/// other side when the pointer is within the threshold of the right or bottom edge.
pub(super) fn tooltip_origin(pointer: Pos2, size: Vec2, bounds: Rect) -> Pos2 {
    let x = if bounds.right() - pointer.x < EDGE_THRESHOLD {
        pointer.x - size.x - POINTER_OFFSET
    } else {
        pointer.x + POINTER_OFFSET
    };
    let y = if bounds.bottom() - pointer.y < EDGE_THRESHOLD {
        pointer.y - size.y - POINTER_OFFSET
    } else {
        pointer.y + POINTER_OFFSET
    };
    Pos2::new(x, y)
}

impl ViewModel {
    pub(in crate::app) fn draw_tooltip(
        &self,
        painter: &Painter,
        bounds: Rect,
        pointer: Pos2,
        node_index: usize,
    ) {
        let Some(node) = self.scene.nodes.get(node_index) else {
            return;
        };

        let summary = self.highlighter.index().summary(&node.id);
        let marks = self.highlighter.node_marks(&node.id);
        let mut text = format!(
            "{}\nParents: {}\nChildren: {}\nOffsprings: {}",
            node.label, summary.parents, summary.children, summary.offspring
        );
        if !marks.is_none() {
            let labels = marks.iter().map(Mark::label).collect::<Vec<_>>();
            text.push_str(&format!("\n[{}]", labels.join(", ")));
        }

        let ignored = marks.contains(Mark::Ignored);
        let opacity = if ignored { 0.5 } else { 1.0 };

        let galley = painter.layout_no_wrap(
            text,
            FontId::proportional(13.0),
            Color32::from_gray(235).gamma_multiply(opacity),
        );
        let size = galley.size() + vec2(PADDING * 2.0, PADDING * 2.0);
        let frame = Rect::from_min_size(tooltip_origin(pointer, size, bounds), size);

        painter.rect_filled(
            frame,
            4.0,
            Color32::from_rgb(30, 36, 44).gamma_multiply(opacity * 0.95),
        );
        painter.rect_stroke(
            frame,
            4.0,
            Stroke::new(1.0, Color32::from_gray(90).gamma_multiply(opacity)),
            StrokeKind::Inside,
        );
        painter.galley(frame.min + vec2(PADDING, PADDING), galley, Color32::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))
    }

    #[test]
    fn sits_below_right_of_pointer() {
        let origin = tooltip_origin(Pos2::new(100.0, 100.0), vec2(120.0, 60.0), bounds());
        assert_eq!(origin, Pos2::new(110.0, 110.0));
    }

    #[test]
    fn flips_near_right_and_bottom_edges() {
        let origin = tooltip_origin(Pos2::new(700.0, 500.0), vec2(120.0, 60.0), bounds());
        assert_eq!(origin, Pos2::new(570.0, 430.0));
    }

    #[test]
    fn flips_each_axis_independently() {
        let origin = tooltip_origin(Pos2::new(700.0, 100.0), vec2(120.0, 60.0), bounds());
        assert_eq!(origin, Pos2::new(570.0, 110.0));
    }
}
