//! Pan/zoom exploration of precomputed reachability diagrams.

pub mod app;
pub mod config;
pub mod diagram;
pub mod geometry;
pub mod highlight;
pub mod reach;
pub mod scene;
pub mod viewport;
