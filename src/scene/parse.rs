use html_escape::decode_html_entities;
use svg::node::Attributes;
use svg::node::element::path::{Command, Data, Position};
use svg::node::element::tag::Type;
use svg::parser::Event;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::geometry::{Point, Rect, ViewBoxError};

use super::{Scene, SceneEdge, SceneNode};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not read SVG markup")]
    Markup(#[source] std::io::Error),
    #[error("malformed SVG: {0}")]
    Syntax(String),
    #[error("SVG root element has no viewBox attribute")]
    MissingViewBox,
    #[error("invalid SVG viewBox")]
    ViewBox(#[from] ViewBoxError),
}

/// Reads node and edge groups plus the root `viewBox` from Graphviz SVG output.
pub fn parse_scene(markup: &str) -> Result<Scene, SceneError> {
    let mut builder = SceneBuilder::default();
    for event in svg::read(markup).map_err(SceneError::Markup)? {
        match event {
            Event::Tag(name, kind, attributes) => builder.tag(name, kind, &attributes)?,
            Event::Text(text) => builder.text(text),
            Event::Error(error) => return Err(SceneError::Syntax(error.to_string())),
            _ => {}
        }
    }
    builder.finish()
}

/// The `scale(...) rotate(...) translate(...)` list Graphviz puts on its graph
/// group, applied right to left as in SVG.
#[derive(Clone, Copy, Debug, PartialEq)]
struct GroupTransform {
    scale: (f64, f64),
    /// Degrees, clockwise in screen space, around `pivot`.
    rotate: f64,
    pivot: (f64, f64),
    translate: (f64, f64),
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            scale: (1.0, 1.0),
            rotate: 0.0,
            pivot: (0.0, 0.0),
            translate: (0.0, 0.0),
        }
    }
}

impl GroupTransform {
    fn parse(raw: &str) -> Self {
        let mut transform = Self::default();
        if let Some(args) = function_args(raw, "scale") {
            match args.as_slice() {
                [s] => transform.scale = (*s, *s),
                [sx, sy, ..] => transform.scale = (*sx, *sy),
                [] => {}
            }
        }
        if let Some(args) = function_args(raw, "rotate") {
            match args.as_slice() {
                [angle] => transform.rotate = *angle,
                [angle, cx, cy, ..] => {
                    transform.rotate = *angle;
                    transform.pivot = (*cx, *cy);
                }
                _ => warn!(raw, "ignoring malformed rotate()"),
            }
            if transform.rotate != 0.0 {
                debug!(degrees = transform.rotate, "diagram is rotated");
            }
        }
        if let Some(args) = function_args(raw, "translate") {
            match args.as_slice() {
                [tx] => transform.translate = (*tx, 0.0),
                [tx, ty, ..] => transform.translate = (*tx, *ty),
                [] => {}
            }
        }
        transform
    }

    fn apply(&self, point: Point) -> Point {
        let x = point.x + self.translate.0;
        let y = point.y + self.translate.1;

        let (x, y) = if self.rotate == 0.0 {
            (x, y)
        } else {
            let (sin, cos) = self.rotate.to_radians().sin_cos();
            let (dx, dy) = (x - self.pivot.0, y - self.pivot.1);
            (
                self.pivot.0 + dx * cos - dy * sin,
                self.pivot.1 + dx * sin + dy * cos,
            )
        };

        Point::new(x * self.scale.0, y * self.scale.1)
    }
}

fn function_args(raw: &str, name: &str) -> Option<Vec<f64>> {
    let start = raw.find(&format!("{name}("))? + name.len() + 1;
    let end = start + raw[start..].find(')')?;
    Some(numbers(&raw[start..end]))
}

fn numbers(raw: &str) -> Vec<f64> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect()
}

fn points(raw: &str) -> Vec<Point> {
    numbers(raw)
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

fn attr<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes.get(name).map(|value| &**value)
}

fn number_attr(attributes: &Attributes, name: &str) -> Option<f64> {
    attr(attributes, name)?.trim().parse().ok()
}

fn straight(from: Point, to: Point) -> [Point; 4] {
    [from, from, to, to]
}

fn resolve(position: &Position, cursor: Point, x: f32, y: f32) -> Point {
    match position {
        Position::Absolute => Point::new(f64::from(x), f64::from(y)),
        Position::Relative => Point::new(cursor.x + f64::from(x), cursor.y + f64::from(y)),
    }
}

fn path_curves(d: &str) -> Vec<[Point; 4]> {
    let data = match Data::parse(d) {
        Ok(data) => data,
        Err(error) => {
            debug!(%error, "skipping unreadable path data");
            return Vec::new();
        }
    };

    let mut curves = Vec::new();
    let mut cursor = Point::default();
    let mut start = cursor;
    for command in data.iter() {
        match command {
            Command::Move(position, params) => {
                for (i, pair) in params.chunks_exact(2).enumerate() {
                    let target = resolve(position, cursor, pair[0], pair[1]);
                    if i == 0 {
                        start = target;
                    } else {
                        curves.push(straight(cursor, target));
                    }
                    cursor = target;
                }
            }
            Command::Line(position, params) => {
                for pair in params.chunks_exact(2) {
                    let target = resolve(position, cursor, pair[0], pair[1]);
                    curves.push(straight(cursor, target));
                    cursor = target;
                }
            }
            Command::CubicCurve(position, params) => {
                for six in params.chunks_exact(6) {
                    let first = resolve(position, cursor, six[0], six[1]);
                    let second = resolve(position, cursor, six[2], six[3]);
                    let end = resolve(position, cursor, six[4], six[5]);
                    curves.push([cursor, first, second, end]);
                    cursor = end;
                }
            }
            Command::Close => {
                if cursor != start {
                    curves.push(straight(cursor, start));
                }
                cursor = start;
            }
            _ => trace!("skipping unsupported path command"),
        }
    }
    curves
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupKind {
    Graph,
    Node,
    Edge,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum TextTarget {
    #[default]
    Ignored,
    Title,
    Label,
}

#[derive(Debug)]
struct PendingElement {
    kind: GroupKind,
    id: Option<String>,
    title: String,
    label: String,
    points: Vec<Point>,
    curves: Vec<[Point; 4]>,
    arrow: Vec<Point>,
}

impl PendingElement {
    fn new(kind: GroupKind, id: Option<&str>) -> Self {
        Self {
            kind,
            id: id.map(str::to_owned),
            title: String::new(),
            label: String::new(),
            points: Vec::new(),
            curves: Vec::new(),
            arrow: Vec::new(),
        }
    }
}

#[derive(Default)]
struct SceneBuilder {
    view_box: Option<Rect>,
    transform: GroupTransform,
    groups: Vec<GroupKind>,
    pending: Option<PendingElement>,
    text: TextTarget,
    nodes: Vec<SceneNode>,
    edges: Vec<SceneEdge>,
}

impl SceneBuilder {
    fn tag(&mut self, name: &str, kind: Type, attributes: &Attributes) -> Result<(), SceneError> {
        match (name, kind) {
            ("svg", Type::Start | Type::Empty) if self.view_box.is_none() => {
                let raw = attr(attributes, "viewBox").ok_or(SceneError::MissingViewBox)?;
                self.view_box = Some(raw.parse()?);
            }
            ("g", Type::Start) => self.open_group(attributes),
            ("g", Type::End) => self.close_group(),
            ("title", Type::Start) => self.text = TextTarget::Title,
            ("text", Type::Start) => self.text = TextTarget::Label,
            ("title" | "text", Type::End) => self.text = TextTarget::Ignored,
            (_, Type::Start | Type::Empty) => self.shape(name, attributes),
            _ => {}
        }
        Ok(())
    }

    fn open_group(&mut self, attributes: &Attributes) {
        let class = attr(attributes, "class").unwrap_or_default();
        let kind = match class.split_whitespace().next() {
            Some("graph") => GroupKind::Graph,
            Some("node") => GroupKind::Node,
            Some("edge") => GroupKind::Edge,
            _ => GroupKind::Other,
        };

        match kind {
            GroupKind::Graph => {
                if let Some(raw) = attr(attributes, "transform") {
                    self.transform = GroupTransform::parse(raw);
                    trace!(transform = ?self.transform, "graph transform");
                }
            }
            GroupKind::Node | GroupKind::Edge => {
                if self.pending.is_some() {
                    warn!("nested diagram element, keeping the outer one");
                } else {
                    self.pending = Some(PendingElement::new(kind, attr(attributes, "id")));
                }
            }
            GroupKind::Other => {}
        }
        self.groups.push(kind);
    }

    fn close_group(&mut self) {
        match self.groups.pop() {
            Some(GroupKind::Node | GroupKind::Edge) => {
                if let Some(pending) = self.pending.take() {
                    self.finish_element(pending);
                }
            }
            Some(_) => {}
            None => warn!("unbalanced group end tag"),
        }
    }

    fn shape(&mut self, name: &str, attributes: &Attributes) {
        let transform = self.transform;
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        let shape_points = match name {
            "ellipse" => {
                let (Some(cx), Some(cy)) =
                    (number_attr(attributes, "cx"), number_attr(attributes, "cy"))
                else {
                    return;
                };
                let rx = number_attr(attributes, "rx").unwrap_or_default();
                let ry = number_attr(attributes, "ry").unwrap_or_default();
                vec![Point::new(cx - rx, cy - ry), Point::new(cx + rx, cy + ry)]
            }
            "rect" => {
                let x = number_attr(attributes, "x").unwrap_or_default();
                let y = number_attr(attributes, "y").unwrap_or_default();
                let width = number_attr(attributes, "width").unwrap_or_default();
                let height = number_attr(attributes, "height").unwrap_or_default();
                vec![Point::new(x, y), Point::new(x + width, y + height)]
            }
            "polygon" | "polyline" => points(attr(attributes, "points").unwrap_or_default()),
            "path" => {
                let curves = path_curves(attr(attributes, "d").unwrap_or_default())
                    .into_iter()
                    .map(|curve| curve.map(|point| transform.apply(point)))
                    .collect::<Vec<_>>();
                if pending.kind == GroupKind::Edge {
                    pending.curves.extend(curves);
                } else {
                    pending.points.extend(curves.into_iter().flatten());
                }
                return;
            }
            _ => return,
        };

        let shape_points = shape_points.into_iter().map(|point| transform.apply(point));
        if pending.kind == GroupKind::Edge && name == "polygon" {
            pending.arrow.extend(shape_points);
        } else {
            pending.points.extend(shape_points);
        }
    }

    fn text(&mut self, raw: &str) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let text = decode_html_entities(raw.trim());
        if text.is_empty() {
            return;
        }

        let target = match self.text {
            TextTarget::Title => &mut pending.title,
            TextTarget::Label => &mut pending.label,
            TextTarget::Ignored => return,
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(&text);
    }

    fn finish_element(&mut self, pending: PendingElement) {
        let title = pending.title.trim().to_owned();
        match pending.kind {
            GroupKind::Node => {
                let Some(id) = pending.id.or_else(|| (!title.is_empty()).then(|| title.clone()))
                else {
                    warn!("skipping node without id or title");
                    return;
                };
                let label = [pending.label, title]
                    .into_iter()
                    .find(|text| !text.is_empty())
                    .unwrap_or_else(|| id.clone());
                self.nodes.push(SceneNode {
                    bounds: Rect::bounding(pending.points),
                    id,
                    label,
                });
            }
            GroupKind::Edge => {
                let id = pending
                    .id
                    .unwrap_or_else(|| format!("edge{}", self.edges.len()));
                let (source, target) = title
                    .split_once("->")
                    .or_else(|| title.split_once("--"))
                    .map(|(source, target)| {
                        (
                            Some(source.trim().to_owned()),
                            Some(target.trim().to_owned()),
                        )
                    })
                    .unwrap_or_default();
                self.edges.push(SceneEdge {
                    id,
                    source,
                    target,
                    curves: pending.curves,
                    arrow: pending.arrow,
                });
            }
            GroupKind::Graph | GroupKind::Other => {}
        }
    }

    fn finish(self) -> Result<Scene, SceneError> {
        let view_box = self.view_box.ok_or(SceneError::MissingViewBox)?;
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            %view_box,
            "parsed diagram"
        );
        Ok(Scene {
            view_box,
            nodes: self.nodes,
            edges: self.edges,
        })
    }
}
