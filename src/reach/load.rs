use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::index::ReachabilityIndex;

pub fn load_reachability(path: &Path) -> Result<ReachabilityIndex> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read reachability file {}", path.display()))?;
    let index = ReachabilityIndex::from_json(&raw)
        .with_context(|| format!("invalid reachability JSON in {}", path.display()))?;

    info!(nodes = index.len(), path = %path.display(), "loaded reachability index");
    Ok(index)
}

pub fn save_reachability(index: &ReachabilityIndex, path: &Path) -> Result<()> {
    let json = index
        .to_json()
        .context("failed to serialize reachability index")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write reachability file {}", path.display()))?;

    info!(nodes = index.len(), path = %path.display(), "wrote reachability index");
    Ok(())
}
