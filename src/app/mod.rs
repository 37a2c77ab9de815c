use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context};

use crate::config::ViewerConfig;
use crate::diagram::Diagram;
use crate::highlight::Highlighter;
use crate::scene::Scene;
use crate::viewport::ViewportController;

mod graph;
mod render_utils;
mod ui;

pub struct LineageApp {
    config: ViewerConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Diagram, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    diagram_path: String,
    scene: Scene,
    viewport: ViewportController,
    highlighter: Highlighter,
    animate: bool,
}

impl LineageApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let state = Self::start_load(config.clone());
        Self { config, state }
    }

    fn start_load(config: ViewerConfig) -> AppState {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = Diagram::load(&config).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        AppState::Loading { rx }
    }
}

impl eframe::App for LineageApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(diagram) => {
                            AppState::Ready(Box::new(ViewModel::new(diagram, &self.config)))
                        }
                        Err(error) => {
                            tracing::error!(%error, "failed to load diagram");
                            AppState::Error(error)
                        }
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading lineage diagram...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load lineage diagram");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.config.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
