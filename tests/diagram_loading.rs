use std::fs;

use anyhow::Result;
use lineage_view::config::ViewerConfig;
use lineage_view::diagram::Diagram;
use lineage_view::reach::{NodeSummary, load_reachability};
use tempfile::tempdir;

const DEMO: &str = include_str!("../demos/dot.svg");

#[test]
fn derives_reachability_from_demo_edges() -> Result<()> {
    let dir = tempdir()?;
    let diagram_path = dir.path().join("dot.svg");
    fs::write(&diagram_path, DEMO)?;

    let diagram = Diagram::load(&ViewerConfig {
        diagram: diagram_path,
        ..ViewerConfig::default()
    })?;

    assert_eq!(diagram.scene.nodes.len(), 6);
    assert_eq!(diagram.scene.edges.len(), 4);

    let summary = diagram.index.summary("clean");
    assert_eq!(summary.parents, 1);
    assert_eq!(summary.children, 2);
    assert_eq!(summary.offspring, 2);

    let ingest = diagram.index.facts("ingest");
    assert!(ingest.is_some_and(|facts| facts.reaches("report")));
    assert_eq!(diagram.index.summary("archive"), NodeSummary::default());
    Ok(())
}

#[test]
fn exports_and_reloads_reachability() -> Result<()> {
    let dir = tempdir()?;
    let diagram_path = dir.path().join("dot.svg");
    let export_path = dir.path().join("reachability.json");
    fs::write(&diagram_path, DEMO)?;

    let exported = Diagram::load(&ViewerConfig {
        diagram: diagram_path.clone(),
        export_reachability: Some(export_path.clone()),
        ..ViewerConfig::default()
    })?;
    assert_eq!(load_reachability(&export_path)?, *exported.index);

    let reloaded = Diagram::load(&ViewerConfig {
        diagram: diagram_path,
        reachability: Some(export_path),
        ..ViewerConfig::default()
    })?;
    assert_eq!(reloaded.index, exported.index);
    Ok(())
}

#[test]
fn missing_diagram_names_the_file() -> Result<()> {
    let dir = tempdir()?;
    let diagram_path = dir.path().join("absent.svg");

    let error = Diagram::load(&ViewerConfig {
        diagram: diagram_path,
        ..ViewerConfig::default()
    })
    .err()
    .map(|error| format!("{error:#}"))
    .unwrap_or_default();

    assert!(error.contains("absent.svg"), "unexpected error: {error}");
    Ok(())
}

#[test]
fn malformed_view_box_fails_the_load() -> Result<()> {
    let dir = tempdir()?;
    let diagram_path = dir.path().join("broken.svg");
    fs::write(
        &diagram_path,
        DEMO.replace(r#"viewBox="0.00 0.00 242.00 332.00""#, r#"viewBox="0 0 242""#),
    )?;

    let result = Diagram::load(&ViewerConfig {
        diagram: diagram_path,
        ..ViewerConfig::default()
    });

    assert!(result.is_err());
    Ok(())
}
