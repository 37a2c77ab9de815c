use eframe::egui::{self, Align, Context, Layout};

use crate::config::ViewerConfig;
use crate::diagram::Diagram;
use crate::highlight::Highlighter;
use crate::viewport::{CoordinateSpace, ViewportController};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(diagram: Diagram, config: &ViewerConfig) -> Self {
        let Diagram { scene, index } = diagram;
        let viewport =
            ViewportController::new(CoordinateSpace::new(scene.view_box), config.zoom_bounds);
        let highlighter = Highlighter::new(scene.arena(), index);

        Self {
            diagram_path: config.diagram.display().to_string(),
            scene,
            viewport,
            highlighter,
            animate: config.animate,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("lineage-view");
                    ui.separator();
                    ui.label(format!("diagram: {}", self.diagram_path));
                    ui.label(format!("nodes: {}", self.scene.nodes.len()));
                    ui.label(format!("edges: {}", self.scene.edges.len()));

                    let reset_button = ui.add_enabled(
                        self.viewport.space().is_modified(),
                        egui::Button::new("Reset view"),
                    );
                    if reset_button.clicked() {
                        self.viewport.reset();
                    }

                    if ui
                        .checkbox(&mut self.animate, "Animate")
                        .on_hover_text("Pulse the selected node and everything related to it.")
                        .changed()
                    {
                        self.reapply_selection();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let space = self.viewport.space();
                        ui.label(format!("zoom: {:.2}x", space.zoom_factor()));
                        ui.label(format!("viewBox: {}", space.current()));
                    });
                });
            });

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_canvas(ui));
    }

    /// Selects `id` unless it already is the focal node.
    pub(in crate::app) fn set_focal(&mut self, id: &str) {
        if self.highlighter.focal() == Some(id) {
            return;
        }
        self.highlighter.select(id, self.animate);
    }

    fn reapply_selection(&mut self) {
        let Some(focal) = self.highlighter.focal().map(str::to_owned) else {
            return;
        };
        self.highlighter.clear();
        self.highlighter.select(&focal, self.animate);
    }
}
