use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ViewerConfig;
use crate::reach::{ReachabilityIndex, load_reachability, save_reachability};
use crate::scene::{Scene, parse_scene};

/// Everything the viewer needs, loaded once per session.
#[derive(Clone, Debug)]
pub struct Diagram {
    pub scene: Scene,
    pub index: Arc<ReachabilityIndex>,
}

impl Diagram {
    pub fn load(config: &ViewerConfig) -> Result<Self> {
        let markup = fs::read_to_string(&config.diagram)
            .with_context(|| format!("failed to read diagram {}", config.diagram.display()))?;
        let scene = parse_scene(&markup)
            .with_context(|| format!("failed to parse diagram {}", config.diagram.display()))?;

        let index = match &config.reachability {
            Some(path) => load_reachability(path)?,
            None => {
                let index = ReachabilityIndex::from_edges(
                    scene.nodes.iter().map(|node| node.id.as_str()),
                    scene.links(),
                );
                info!(nodes = index.len(), "derived reachability from diagram edges");
                index
            }
        };

        if let Some(path) = &config.export_reachability {
            save_reachability(&index, path)?;
        }

        Ok(Self {
            scene,
            index: Arc::new(index),
        })
    }
}
