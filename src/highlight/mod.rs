//! Focal selection and the classification it induces on nodes and edges.

mod arena;
mod classify;
mod marks;
mod selection;

use std::sync::Arc;

use tracing::debug;

pub use arena::ElementArena;
pub use classify::{Classification, classify};
pub use marks::{Mark, Marks};
pub use selection::{Selection, SelectionChange};

use crate::reach::ReachabilityIndex;

/// Owns the selection and keeps the classification in sync with it.
#[derive(Clone, Debug)]
pub struct Highlighter {
    arena: ElementArena,
    index: Arc<ReachabilityIndex>,
    selection: Selection,
    classification: Classification,
}

impl Highlighter {
    pub fn new(arena: ElementArena, index: Arc<ReachabilityIndex>) -> Self {
        let classification = Classification::cleared(&arena);
        Self {
            arena,
            index,
            selection: Selection::default(),
            classification,
        }
    }

    pub fn arena(&self) -> &ElementArena {
        &self.arena
    }

    pub fn index(&self) -> &Arc<ReachabilityIndex> {
        &self.index
    }

    pub fn focal(&self) -> Option<&str> {
        self.selection.focal()
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Selects `id`, or clears when it is already the focal node.
    pub fn select(&mut self, id: &str, animated: bool) -> SelectionChange {
        self.classification = Classification::cleared(&self.arena);

        let change = self.selection.toggle(id);
        if let SelectionChange::Selected(focal) = &change {
            self.classification = classify(&self.arena, &self.index, focal, animated);
        }

        debug!(?change, "selection changed");
        change
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.classification = Classification::cleared(&self.arena);
    }

    /// Flags of the node with `id`; unknown ids are unclassified.
    pub fn node_marks(&self, id: &str) -> Marks {
        self.arena
            .node_index(id)
            .map(|index| self.classification.node(index))
            .unwrap_or_default()
    }

    pub fn edge_marks(&self, id: &str) -> Marks {
        self.arena
            .edge_index(id)
            .map(|index| self.classification.edge(index))
            .unwrap_or_default()
    }
}
