use std::collections::HashMap;

/// Stable integer ids for the node and edge elements of a diagram.
///
/// Duplicate ids keep the index of their first occurrence.
#[derive(Clone, Debug, Default)]
pub struct ElementArena {
    nodes: Vec<String>,
    node_index: HashMap<String, usize>,
    edges: Vec<String>,
    edge_index: HashMap<String, usize>,
}

impl ElementArena {
    pub fn new<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let mut arena = Self::default();
        for id in nodes {
            push_unique(&mut arena.nodes, &mut arena.node_index, id.into());
        }
        for id in edges {
            push_unique(&mut arena.edges, &mut arena.edge_index, id.into());
        }
        arena
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn edge_index(&self, id: &str) -> Option<usize> {
        self.edge_index.get(id).copied()
    }

    pub fn node_id(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(String::as_str)
    }

    pub fn edge_id(&self, index: usize) -> Option<&str> {
        self.edges.get(index).map(String::as_str)
    }
}

fn push_unique(ids: &mut Vec<String>, index: &mut HashMap<String, usize>, id: String) {
    if index.contains_key(&id) {
        return;
    }
    index.insert(id.clone(), ids.len());
    ids.push(id);
}
