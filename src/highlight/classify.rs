use tracing::debug;

use crate::reach::{NodeFacts, ReachabilityIndex};

use super::arena::ElementArena;
use super::marks::{Mark, Marks};

/// Flags for every node and edge of an [`ElementArena`], indexed like the arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    nodes: Vec<Marks>,
    edges: Vec<Marks>,
}

impl Classification {
    /// Everything unclassified, the state without a focal node.
    pub fn cleared(arena: &ElementArena) -> Self {
        Self {
            nodes: vec![Marks::NONE; arena.node_count()],
            edges: vec![Marks::NONE; arena.edge_count()],
        }
    }

    pub fn node(&self, index: usize) -> Marks {
        self.nodes.get(index).copied().unwrap_or_default()
    }

    pub fn edge(&self, index: usize) -> Marks {
        self.edges.get(index).copied().unwrap_or_default()
    }

    pub fn nodes(&self) -> &[Marks] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Marks] {
        &self.edges
    }

    pub fn count_nodes(&self, mark: Mark) -> usize {
        self.nodes.iter().filter(|marks| marks.contains(mark)).count()
    }

    pub fn count_edges(&self, mark: Mark) -> usize {
        self.edges.iter().filter(|marks| marks.contains(mark)).count()
    }
}

/// Classifies every element against the facts of `focal`.
///
/// Ids named by the facts but absent from the arena are skipped. An unknown
/// focal id classifies like a node with no relationships.
pub fn classify(
    arena: &ElementArena,
    index: &ReachabilityIndex,
    focal: &str,
    animated: bool,
) -> Classification {
    let empty = NodeFacts::default();
    let facts = index.facts(focal).unwrap_or_else(|| {
        debug!(focal, "no reachability facts for focal node");
        &empty
    });

    let mut classification = Classification::cleared(arena);
    let focal_index = arena.node_index(focal);
    if let Some(focal_index) = focal_index {
        classification.nodes[focal_index].insert(Mark::Focal);
    } else {
        debug!(focal, "focal node is not part of the diagram");
    }

    let mut mark_node = |id: &str, mark: Mark| {
        if let Some(node) = arena.node_index(id) {
            classification.nodes[node].insert(mark);
        }
    };
    for id in facts.reachable_nodes() {
        mark_node(id, Mark::Mentioned);
    }
    for id in &facts.parents {
        mark_node(id.as_str(), Mark::Parent);
    }
    for id in &facts.children {
        mark_node(id.as_str(), Mark::Child);
    }

    let mut mark_edge = |id: &str, mark: Mark| {
        if let Some(edge) = arena.edge_index(id) {
            classification.edges[edge].insert(mark);
        }
    };
    for id in &facts.reachable_edges {
        mark_edge(id.as_str(), Mark::Mentioned);
    }
    for id in &facts.incoming_edges {
        mark_edge(id.as_str(), Mark::Incoming);
    }
    for id in &facts.outgoing_edges {
        mark_edge(id.as_str(), Mark::Outgoing);
    }

    for (node, marks) in classification.nodes.iter_mut().enumerate() {
        if Some(node) == focal_index || marks.is_positive() {
            if animated {
                marks.insert(Mark::Animated);
            }
        } else {
            marks.insert(Mark::Ignored);
        }
    }
    for marks in &mut classification.edges {
        if marks.is_positive() {
            if animated {
                marks.insert(Mark::Animated);
            }
        } else {
            marks.insert(Mark::Ignored);
        }
    }

    debug!(
        focal,
        mentioned = classification.count_nodes(Mark::Mentioned),
        ignored = classification.count_nodes(Mark::Ignored),
        "classified selection"
    );
    classification
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    fn two_nodes() -> Result<ReachabilityIndex> {
        Ok(ReachabilityIndex::from_json(
            r#"{"A": {"nodeReachability": {"B": 1}, "children": ["B"]}, "B": {"parents": ["A"]}}"#,
        )?)
    }

    #[test]
    fn focal_with_reachable_child() -> Result<()> {
        let arena = ElementArena::new(["A", "B"], Vec::<String>::new());
        let classification = classify(&arena, &two_nodes()?, "A", false);

        assert_eq!(classification.node(0), Marks::NONE.with(Mark::Focal));
        assert_eq!(
            classification.node(1),
            Marks::NONE.with(Mark::Mentioned).with(Mark::Child)
        );
        assert_eq!(classification.count_nodes(Mark::Ignored), 0);
        Ok(())
    }

    #[test]
    fn unknown_ids_in_facts_are_skipped() -> Result<()> {
        let index = ReachabilityIndex::from_json(
            r#"{"A": {"nodeReachability": {"Z": 3}, "reachableEdges": ["edge9"]}}"#,
        )?;
        let arena = ElementArena::new(["A", "B"], ["edge0"]);
        let classification = classify(&arena, &index, "A", false);

        assert_eq!(classification.node(1), Marks::NONE.with(Mark::Ignored));
        assert_eq!(classification.edge(0), Marks::NONE.with(Mark::Ignored));
        Ok(())
    }

    #[test]
    fn missing_facts_ignore_everything_else() -> Result<()> {
        let arena = ElementArena::new(["A", "B", "C"], ["edge0"]);
        let classification = classify(&arena, &two_nodes()?, "C", true);

        assert_eq!(
            classification.node(2),
            Marks::NONE.with(Mark::Focal).with(Mark::Animated)
        );
        assert_eq!(classification.count_nodes(Mark::Ignored), 2);
        assert_eq!(classification.count_edges(Mark::Ignored), 1);
        Ok(())
    }

    #[test]
    fn animated_only_marks_related_elements() -> Result<()> {
        let index = ReachabilityIndex::from_json(
            r#"{"A": {"children": ["B"], "outgoingEdges": ["edge0"]}}"#,
        )?;
        let arena = ElementArena::new(["A", "B", "C"], ["edge0", "edge1"]);
        let classification = classify(&arena, &index, "A", true);

        assert!(classification.node(0).contains(Mark::Animated));
        assert!(classification.node(1).contains(Mark::Animated));
        assert!(!classification.node(2).contains(Mark::Animated));
        assert_eq!(
            classification.edge(0),
            Marks::NONE.with(Mark::Outgoing).with(Mark::Animated)
        );
        assert_eq!(classification.edge(1), Marks::NONE.with(Mark::Ignored));
        Ok(())
    }
}
