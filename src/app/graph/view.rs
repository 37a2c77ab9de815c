use eframe::egui::{
    self, Align2, Color32, FontId, Sense, Shape, Stroke, StrokeKind, Ui, epaint::CubicBezierShape,
};

use crate::highlight::Mark;
use crate::viewport::{DragState, PlaneTransform, ScreenMapping};

use super::super::ViewModel;
use super::super::render_utils::{
    draw_background, edge_color, node_style, to_plane_rect, to_pos2, to_screen_rect,
};

impl ViewModel {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let mapping = ScreenMapping::new(to_plane_rect(rect));

        self.handle_canvas_zoom(ui, &mapping, &response);
        self.handle_canvas_pan(&mapping, &response);

        let transform = mapping.transform(&self.viewport.view());
        draw_background(&painter, rect, &transform);

        let hovered = self.hovered_node(&transform, &response);
        self.handle_canvas_selection(&response, hovered);

        let animating = self.highlighter.focal().is_some()
            && self
                .highlighter
                .classification()
                .count_nodes(Mark::Animated)
                > 0;
        let pulse = if animating {
            ui.ctx().request_repaint();
            let time = ui.input(|input| input.time);
            (((time * std::f64::consts::TAU / 1.6).sin() + 1.0) * 0.5) as f32
        } else {
            0.0
        };

        self.draw_edges(&painter, &transform, pulse);
        self.draw_nodes(&painter, &transform, pulse);

        if self.viewport.drag_state() == DragState::Dragging {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        } else if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        if self.viewport.drag_state() == DragState::Idle
            && let Some(index) = hovered
            && let Some(pointer) = response.hover_pos()
        {
            self.draw_tooltip(&painter, rect, pointer, index);
        }
    }

    fn draw_edges(&self, painter: &egui::Painter, transform: &PlaneTransform, pulse: f32) {
        let width = (transform.scale() as f32).clamp(0.6, 2.4);

        for edge in &self.scene.edges {
            let color = edge_color(self.highlighter.edge_marks(&edge.id), pulse);
            let stroke = Stroke::new(width, color);

            for curve in &edge.curves {
                let points = curve.map(|point| to_pos2(transform.plane_to_screen(point)));
                painter.add(CubicBezierShape::from_points_stroke(
                    points,
                    false,
                    Color32::TRANSPARENT,
                    stroke,
                ));
            }

            if edge.arrow.len() >= 3 {
                let arrow = edge
                    .arrow
                    .iter()
                    .map(|point| to_pos2(transform.plane_to_screen(*point)))
                    .collect();
                painter.add(Shape::convex_polygon(arrow, color, Stroke::NONE));
            }
        }
    }

    fn draw_nodes(&self, painter: &egui::Painter, transform: &PlaneTransform, pulse: f32) {
        let font_size = (14.0 * transform.scale() as f32).clamp(6.0, 28.0);

        for node in &self.scene.nodes {
            let Some(bounds) = node.bounds else {
                continue;
            };

            let marks = self.highlighter.node_marks(&node.id);
            let style = node_style(marks, pulse);
            let screen = to_screen_rect(transform, &bounds);
            let rounding = (screen.height() * 0.5).min(12.0);
            let stroke_width = if marks.contains(Mark::Focal) { 2.4 } else { 1.2 };

            painter.rect_filled(screen, rounding, style.fill);
            painter.rect_stroke(
                screen,
                rounding,
                Stroke::new(stroke_width, style.stroke),
                StrokeKind::Middle,
            );

            if font_size >= 7.0 {
                painter.text(
                    screen.center(),
                    Align2::CENTER_CENTER,
                    node.label.as_str(),
                    FontId::proportional(font_size),
                    style.text,
                );
            }
        }
    }
}
