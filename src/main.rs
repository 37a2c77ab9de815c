use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lineage_view::app::LineageApp;
use lineage_view::config::ViewerConfig;
use lineage_view::viewport::ZoomBounds;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graphviz SVG rendering of the lineage graph.
    #[arg(long, default_value = "dot.svg")]
    diagram: PathBuf,

    /// Precomputed reachability JSON; derived from the diagram's edges when omitted.
    #[arg(long)]
    reachability: Option<PathBuf>,

    /// Write the reachability data in use to this file after loading.
    #[arg(long)]
    export_reachability: Option<PathBuf>,

    /// Pulse the selected node and its related elements.
    #[arg(long)]
    animate: bool,

    #[arg(long, default_value_t = 0.5)]
    min_zoom: f64,

    #[arg(long, default_value_t = 8.0)]
    max_zoom: f64,
}

impl Args {
    fn into_config(self) -> ViewerConfig {
        ViewerConfig {
            diagram: self.diagram,
            reachability: self.reachability,
            export_reachability: self.export_reachability,
            zoom_bounds: ZoomBounds::new(self.min_zoom, self.max_zoom),
            animate: self.animate,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config().validate()?;
    tracing::info!(diagram = %config.diagram.display(), "starting viewer");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "lineage-view",
        options,
        Box::new(move |cc| Ok(Box::new(LineageApp::new(cc, config)))),
    )
    .map_err(|err| anyhow!("{}", err))
}
