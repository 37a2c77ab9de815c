//! Precomputed reachability facts for every node of a diagram.

mod derive;
mod index;
mod load;

pub use derive::Link;
pub use index::{NodeFacts, NodeSummary, ReachabilityIndex};
pub use load::{load_reachability, save_reachability};
