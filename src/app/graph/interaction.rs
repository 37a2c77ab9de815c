use eframe::egui::{self, Ui};

use crate::viewport::{PlaneTransform, ScreenMapping, WheelDirection};

use super::super::ViewModel;
use super::super::render_utils::{to_point, to_vector};

impl ViewModel {
    pub(in crate::app) fn handle_canvas_zoom(
        &mut self,
        ui: &Ui,
        mapping: &ScreenMapping,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pivot = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| response.rect.center());

        // egui reports wheel-up as positive, the opposite of DOM deltaY.
        let direction = WheelDirection::from_wheel_delta(-f64::from(scroll));
        self.viewport.zoom(direction, to_point(pivot), mapping);
    }

    pub(in crate::app) fn handle_canvas_pan(
        &mut self,
        mapping: &ScreenMapping,
        response: &egui::Response,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            self.viewport.press();
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let delta = response.drag_delta();
            self.viewport
                .pan(to_point(pointer - delta), to_vector(delta), mapping);
        }

        if response.drag_stopped() {
            self.viewport.release();
        }
    }

    /// Index of the topmost node under the pointer.
    pub(in crate::app) fn hovered_node(
        &self,
        transform: &PlaneTransform,
        response: &egui::Response,
    ) -> Option<usize> {
        let pointer = response.hover_pos()?;
        self.scene
            .node_at(transform.screen_to_plane(to_point(pointer)))
    }

    pub(in crate::app) fn handle_canvas_selection(
        &mut self,
        response: &egui::Response,
        hovered: Option<usize>,
    ) {
        let action = canvas_click_action(
            hovered,
            response.clicked_by(egui::PointerButton::Primary),
            response.double_clicked(),
        );
        match action {
            ClickAction::Toggle(index) => {
                if let Some(node) = self.scene.nodes.get(index) {
                    let id = node.id.clone();
                    self.highlighter.select(&id, self.animate);
                }
            }
            ClickAction::Clear => self.highlighter.clear(),
            ClickAction::Nothing => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClickAction {
    Toggle(usize),
    Clear,
    Nothing,
}

/// egui reports a click for both presses of a double-click; the second one
/// must not undo the selection made by the first.
fn canvas_click_action(hovered: Option<usize>, clicked: bool, double_clicked: bool) -> ClickAction {
    match hovered {
        Some(index) if clicked && !double_clicked => ClickAction::Toggle(index),
        None if double_clicked => ClickAction::Clear,
        _ => ClickAction::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays the per-frame flags egui reports for a gesture.
    fn replay(hovered: Option<usize>, frames: &[(bool, bool)]) -> Vec<ClickAction> {
        frames
            .iter()
            .map(|&(clicked, double_clicked)| canvas_click_action(hovered, clicked, double_clicked))
            .filter(|action| *action != ClickAction::Nothing)
            .collect()
    }

    #[test]
    fn single_click_on_node_toggles() {
        assert_eq!(replay(Some(3), &[(true, false)]), vec![ClickAction::Toggle(3)]);
    }

    #[test]
    fn double_click_on_node_leaves_it_selected() {
        let actions = replay(Some(3), &[(true, false), (true, true)]);
        assert_eq!(actions, vec![ClickAction::Toggle(3)]);
    }

    #[test]
    fn double_click_on_background_clears() {
        let actions = replay(None, &[(true, false), (true, true)]);
        assert_eq!(actions, vec![ClickAction::Clear]);
    }
}
