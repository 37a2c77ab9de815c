use eframe::egui::{self, RichText, Ui};

use crate::highlight::Mark;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(focal) = self.highlighter.focal().map(str::to_owned) else {
            ui.label("Click a node to highlight its lineage.");
            ui.label("Double-click the background to clear the selection.");
            return;
        };

        let index = self.highlighter.index().clone();
        let summary = index.summary(&focal);
        let classification = self.highlighter.classification();

        ui.label(RichText::new(focal.as_str()).strong());
        ui.add_space(6.0);
        ui.label(format!("Parents: {}", summary.parents));
        ui.label(format!("Children: {}", summary.children));
        ui.label(format!("Offsprings: {}", summary.offspring));
        let ignored_nodes = classification.count_nodes(Mark::Ignored);
        let ignored_edges = classification.count_edges(Mark::Ignored);
        ui.label(format!(
            "Highlighted: {} nodes, {} edges",
            classification.nodes().len() - ignored_nodes,
            classification.edges().len() - ignored_edges
        ));
        ui.label(format!("Ignored: {ignored_nodes} nodes, {ignored_edges} edges"));

        let Some(facts) = index.facts(&focal) else {
            ui.separator();
            ui.label("No recorded relationships for this node.");
            return;
        };

        let mut next_focal = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (title, related) in [("Parents", &facts.parents), ("Children", &facts.children)] {
                    ui.separator();
                    ui.label(RichText::new(title).strong());
                    if related.is_empty() {
                        ui.label("None.");
                    }
                    for id in related {
                        if ui.link(id.as_str()).clicked() {
                            next_focal = Some(id.clone());
                        }
                    }
                }
            });

        if let Some(id) = next_focal {
            self.set_focal(&id);
        }
    }
}
