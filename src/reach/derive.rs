use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, trace};

use super::index::{NodeFacts, ReachabilityIndex};

/// A directed edge of the diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link<'a> {
    pub edge: &'a str,
    pub source: &'a str,
    pub target: &'a str,
}

#[derive(Clone, Default)]
struct Reach {
    weights: BTreeMap<String, f64>,
    edges: BTreeSet<String>,
}

struct Walk<'g> {
    facts: &'g BTreeMap<String, NodeFacts>,
    memo: HashMap<&'g str, Reach>,
    /// Nodes being expanded, with their depth on the DFS stack.
    on_stack: HashMap<&'g str, usize>,
}

impl<'g> Walk<'g> {
    /// Everything reachable from `id`, plus the shallowest stack depth the walk
    /// ran into. A walk cut short above its own depth is only partial for `id`
    /// and is not memoized; the ancestor it ran into completes it.
    fn reach(&mut self, id: &'g str) -> (Reach, usize) {
        if let Some(done) = self.memo.get(id) {
            return (done.clone(), usize::MAX);
        }
        let facts = self.facts;
        let Some(node) = facts.get(id) else {
            return (Reach::default(), usize::MAX);
        };
        if let Some(&depth) = self.on_stack.get(id) {
            trace!(node = id, depth, "cycle while deriving reachability");
            return (Reach::default(), depth);
        }

        let depth = self.on_stack.len();
        self.on_stack.insert(id, depth);

        let mut shallowest = usize::MAX;
        let mut reach = Reach {
            weights: BTreeMap::new(),
            edges: node.outgoing_edges.clone(),
        };
        for child in &node.children {
            *reach.weights.entry(child.clone()).or_default() += 1.0;
            let (below, touched) = self.reach(child);
            shallowest = shallowest.min(touched);
            for (target, weight) in below.weights {
                *reach.weights.entry(target).or_default() += weight;
            }
            reach.edges.extend(below.edges);
        }

        self.on_stack.remove(id);
        if shallowest >= depth {
            self.memo.insert(id, reach.clone());
        } else {
            debug!(node = id, "partial reachability inside a cycle, not cached");
        }
        (reach, shallowest)
    }
}

impl ReachabilityIndex {
    /// Computes the index for a diagram from its node ids and edges.
    ///
    /// Weights count distinct paths from the source. Self loops are skipped, and
    /// a path stops when it returns to a node it is already expanding, so cycles
    /// terminate while every node on a cycle still reaches the whole cycle.
    pub fn from_edges<'a>(
        nodes: impl IntoIterator<Item = &'a str>,
        links: impl IntoIterator<Item = Link<'a>>,
    ) -> Self {
        let mut facts = nodes
            .into_iter()
            .map(|id| (id.to_owned(), NodeFacts::default()))
            .collect::<BTreeMap<_, _>>();

        for link in links {
            if link.source == link.target {
                continue;
            }

            let source = facts.entry(link.source.to_owned()).or_default();
            source.children.insert(link.target.to_owned());
            source.outgoing_edges.insert(link.edge.to_owned());

            let target = facts.entry(link.target.to_owned()).or_default();
            target.parents.insert(link.source.to_owned());
            target.incoming_edges.insert(link.edge.to_owned());
        }

        let reached = {
            let mut walk = Walk {
                facts: &facts,
                memo: HashMap::new(),
                on_stack: HashMap::new(),
            };
            facts
                .keys()
                .map(|id| (id.clone(), walk.reach(id).0))
                .collect::<Vec<_>>()
        };

        for (id, reach) in reached {
            if let Some(node) = facts.get_mut(&id) {
                node.reachability = reach.weights;
                node.reachable_edges = reach.edges;
            }
        }

        Self::new(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link<'a>(edge: &'a str, source: &'a str, target: &'a str) -> Link<'a> {
        Link {
            edge,
            source,
            target,
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    }

    #[test]
    fn diamond_counts_paths_and_collects_edges() {
        let index = ReachabilityIndex::from_edges(
            ["A", "B", "C", "D", "E"],
            [
                link("edge0", "A", "B"),
                link("edge1", "A", "C"),
                link("edge2", "B", "D"),
                link("edge3", "C", "D"),
            ],
        );

        let a = index.facts("A").expect("A present");
        assert_eq!(a.reachability.get("D"), Some(&2.0));
        assert_eq!(a.reachable_nodes().collect::<Vec<_>>(), vec!["B", "C", "D"]);
        assert_eq!(a.reachable_edges, set(&["edge0", "edge1", "edge2", "edge3"]));
        assert_eq!(a.children, set(&["B", "C"]));
        assert_eq!(a.outgoing_edges, set(&["edge0", "edge1"]));

        let d = index.facts("D").expect("D present");
        assert_eq!(d.parents, set(&["B", "C"]));
        assert_eq!(d.incoming_edges, set(&["edge2", "edge3"]));
        assert_eq!(d.reachable_nodes().count(), 0);

        assert_eq!(index.facts("E"), Some(&NodeFacts::default()));
    }

    #[test]
    fn edge_endpoints_become_nodes() {
        let index = ReachabilityIndex::from_edges([], [link("edge0", "X", "Y")]);
        assert_eq!(index.len(), 2);
        assert!(index.facts("X").expect("X present").reaches("Y"));
    }

    #[test]
    fn self_loops_are_skipped() {
        let index = ReachabilityIndex::from_edges(["A"], [link("edge0", "A", "A")]);
        assert_eq!(index.facts("A"), Some(&NodeFacts::default()));
    }

    #[test]
    fn cycles_terminate() {
        let index = ReachabilityIndex::from_edges(
            ["A", "B"],
            [link("edge0", "A", "B"), link("edge1", "B", "A")],
        );

        assert!(index.facts("A").expect("A present").reaches("B"));
        assert!(index.facts("B").expect("B present").reaches("A"));
    }

    #[test]
    fn three_cycle_reaches_every_node_and_edge() {
        let index = ReachabilityIndex::from_edges(
            ["A", "B", "C"],
            [
                link("edge0", "A", "B"),
                link("edge1", "B", "C"),
                link("edge2", "C", "A"),
            ],
        );

        for source in ["A", "B", "C"] {
            let facts = index.facts(source).expect("node present");
            for target in ["A", "B", "C"] {
                assert!(facts.reaches(target), "{source} should reach {target}");
            }
            assert_eq!(facts.reachable_edges, set(&["edge0", "edge1", "edge2"]));
        }
    }

    #[test]
    fn cycle_members_share_downstream_tail() {
        // A -> B -> C -> A, with C -> D hanging off the cycle.
        let index = ReachabilityIndex::from_edges(
            ["A", "B", "C", "D", "E"],
            [
                link("edge0", "A", "B"),
                link("edge1", "B", "C"),
                link("edge2", "C", "A"),
                link("edge3", "C", "D"),
                link("edge4", "E", "B"),
            ],
        );

        for source in ["A", "B", "C", "E"] {
            let facts = index.facts(source).expect("node present");
            assert!(facts.reaches("D"), "{source} should reach D");
            assert!(facts.reachable_edges.contains("edge3"));
        }
        let e = index.facts("E").expect("E present");
        assert!(e.reaches("A") && e.reaches("C"));
        assert!(!e.reaches("E"));
        assert_eq!(index.facts("D").expect("D present").reachable_nodes().count(), 0);
    }
}
