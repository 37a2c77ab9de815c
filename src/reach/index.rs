use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

/// Precomputed relationships of one node.
///
/// Every field may be missing or `null` in the JSON document; both read as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFacts {
    #[serde(
        default,
        rename = "nodeReachability",
        deserialize_with = "null_as_default"
    )]
    pub reachability: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parents: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reachable_edges: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incoming_edges: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outgoing_edges: BTreeSet<String>,
}

impl NodeFacts {
    /// Nodes with a positive reachability weight.
    pub fn reachable_nodes(&self) -> impl Iterator<Item = &str> {
        self.reachability
            .iter()
            .filter(|(_, weight)| **weight > 0.0)
            .map(|(id, _)| id.as_str())
    }

    pub fn reaches(&self, target: &str) -> bool {
        self.reachability
            .get(target)
            .is_some_and(|weight| *weight > 0.0)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts shown in a node's tooltip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeSummary {
    pub parents: usize,
    pub children: usize,
    pub offspring: usize,
}

/// Read-only map from node id to its [`NodeFacts`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReachabilityIndex {
    nodes: BTreeMap<String, NodeFacts>,
}

impl ReachabilityIndex {
    pub fn new(nodes: BTreeMap<String, NodeFacts>) -> Self {
        Self { nodes }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// `None` means the node has no known relationships.
    pub fn facts(&self, id: &str) -> Option<&NodeFacts> {
        self.nodes.get(id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn summary(&self, id: &str) -> NodeSummary {
        self.facts(id)
            .map(|facts| NodeSummary {
                parents: facts.parents.len(),
                children: facts.children.len(),
                offspring: facts.reachable_nodes().count(),
            })
            .unwrap_or_default()
    }
}
