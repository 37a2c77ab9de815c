//! Shapes and ids read from a Graphviz SVG diagram.

mod parse;

pub use parse::{SceneError, parse_scene};

use crate::geometry::{Point, Rect};
use crate::highlight::ElementArena;
use crate::reach::Link;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: String,
    pub label: String,
    /// `None` when the group carried no drawable geometry.
    pub bounds: Option<Rect>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
    pub id: String,
    pub source: Option<String>,
    pub target: Option<String>,
    /// Cubic segments `[start, control, control, end]`; straight lines repeat their endpoints.
    pub curves: Vec<[Point; 4]>,
    pub arrow: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub view_box: Rect,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    /// Node and edge ids in document order.
    pub fn arena(&self) -> ElementArena {
        ElementArena::new(
            self.nodes.iter().map(|node| node.id.clone()),
            self.edges.iter().map(|edge| edge.id.clone()),
        )
    }

    /// Edges whose title names both endpoints.
    pub fn links(&self) -> impl Iterator<Item = Link<'_>> {
        self.edges.iter().filter_map(|edge| {
            Some(Link {
                edge: &edge.id,
                source: edge.source.as_deref()?,
                target: edge.target.as_deref()?,
            })
        })
    }

    /// Topmost node under a plane point; later nodes are drawn above earlier ones.
    pub fn node_at(&self, plane: Point) -> Option<usize> {
        self.nodes
            .iter()
            .rposition(|node| node.bounds.is_some_and(|bounds| bounds.contains(plane)))
    }
}
