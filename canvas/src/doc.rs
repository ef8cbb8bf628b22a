//! Document model: scene-graph nodes, paints, and the node store.
//!
//! This module defines the node types that describe what is on the canvas
//! (`Node` base fields plus the per-kind [`Shape`] variant), the paint model
//! for fills, and the [`Document`] that owns all live nodes as a flat id map
//! under a single root.
//!
//! Data flows into this layer from the persistence collaborator (JSON
//! deserialization, validated on acceptance) and out of it through read-only
//! queries. Mutation happens exclusively through the editor reducer; nothing
//! here is mutated behind the document's back.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{HashMap, HashSet};
use std::fmt;

use cmath::rect::Rect;
use cmath::transform::{self, Transform};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier for a document node. Supplied externally; template node
/// ids are human-readable strings.
pub type NodeId = String;

/// How a node is positioned within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    #[default]
    Relative,
    Absolute,
}

/// A width or height: a fixed length or `"auto"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Auto,
    Length(f64),
}

impl Dimension {
    /// The fixed length, if this dimension has one.
    #[must_use]
    pub fn as_length(self) -> Option<f64> {
        match self {
            Self::Length(v) => Some(v),
            Self::Auto => None,
        }
    }

    #[must_use]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl Serialize for Dimension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Length(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DimensionVisitor;

        impl Visitor<'_> for DimensionVisitor {
            type Value = Dimension;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or the string \"auto\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Dimension, E> {
                Ok(Dimension::Length(v))
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Dimension, E> {
                Ok(Dimension::Length(v as f64))
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Dimension, E> {
                Ok(Dimension::Length(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Dimension, E> {
                if v == "auto" {
                    Ok(Dimension::Auto)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(DimensionVisitor)
    }
}

/// RGBA color; channels 0–255, alpha 0–1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// One stop of a gradient paint. Stops are kept in authoring order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis, 0–1.
    pub offset: f64,
    pub color: Rgba,
}

fn identity_transform() -> Transform {
    transform::IDENTITY
}

fn is_identity(t: &Transform) -> bool {
    *t == transform::IDENTITY
}

/// Fill paint for a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    Solid {
        color: Rgba,
    },
    LinearGradient {
        stops: Vec<GradientStop>,
        #[serde(default = "identity_transform", skip_serializing_if = "is_identity")]
        transform: Transform,
    },
    RadialGradient {
        stops: Vec<GradientStop>,
        #[serde(default = "identity_transform", skip_serializing_if = "is_identity")]
        transform: Transform,
    },
}

/// Layout algorithm of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Flow,
}

/// Flow direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// Child alignment along a container axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisAlignment {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

/// Horizontal alignment of text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Per-kind node data. The `type` tag discriminates on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Grouping node with ordered children and flow layout parameters.
    Container {
        #[serde(default)]
        children: Vec<NodeId>,
        #[serde(default)]
        layout: Layout,
        #[serde(default)]
        direction: Axis,
        #[serde(default)]
        main_axis_alignment: AxisAlignment,
        #[serde(default)]
        cross_axis_alignment: AxisAlignment,
        #[serde(default)]
        gap: f64,
    },
    /// A run of styled text.
    Text {
        text: String,
        font_size: f64,
        font_weight: u16,
        #[serde(default)]
        text_align: TextAlign,
    },
    /// A placed bitmap.
    Image { src: String },
    /// Vector geometry as SVG path data strings.
    Vector { paths: Vec<String> },
    /// Axis-aligned rectangle.
    Rectangle {
        #[serde(default)]
        corner_radius: f64,
    },
    /// Ellipse inscribed within the bounding box.
    Ellipse,
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

/// A document node: shared base fields plus the per-kind [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Inactive nodes are kept in the document but not painted.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Locked nodes ignore pointer interaction.
    #[serde(default)]
    pub locked: bool,
    /// 0–1 paint opacity.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Stacking order; lower values are drawn beneath higher values.
    #[serde(default)]
    pub z_index: i64,
    /// Clockwise rotation in degrees around the bounding-box center.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub position: PositionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    pub width: Dimension,
    pub height: Dimension,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(flatten)]
    pub shape: Shape,
}

impl Node {
    /// Ordered child ids; empty for non-container nodes.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match &self.shape {
            Shape::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// The node's axis-aligned bounding rectangle, derived at query time from
    /// position, size, and rotation. Rotated nodes yield the bounding box of
    /// the rotated rect. `None` when either dimension is `auto`.
    #[must_use]
    pub fn bounding_rect(&self) -> Option<Rect> {
        let width = self.width.as_length()?;
        let height = self.height.as_length()?;
        let rect = Rect::new(self.left.unwrap_or(0.0), self.top.unwrap_or(0.0), width, height);
        if self.rotation == 0.0 {
            return Some(rect);
        }

        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let [cx, cy] = rect.center();
        let ex = (width / 2.0) * cos.abs() + (height / 2.0) * sin.abs();
        let ey = (width / 2.0) * sin.abs() + (height / 2.0) * cos.abs();
        Some(Rect::new(cx - ex, cy - ey, ex * 2.0, ey * 2.0))
    }
}

/// Violation of a document structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("root node not found: {0}")]
    MissingRoot(NodeId),
    #[error("child id of {parent} does not resolve to a node: {child}")]
    UnknownChild { parent: NodeId, child: NodeId },
    #[error("node has more than one parent: {0}")]
    MultipleParents(NodeId),
    #[error("root node listed as a child of {0}")]
    RootHasParent(NodeId),
    #[error("node unreachable from root: {0}")]
    Unreachable(NodeId),
}

/// One editable canvas: a flat id-to-node map plus the root id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    nodes: HashMap<NodeId, Node>,
    root_id: NodeId,
}

impl Document {
    /// Build a document from a node list, enforcing the structural
    /// invariants before the document is accepted.
    ///
    /// # Errors
    ///
    /// Returns the first [`DocumentError`] found: missing root, a child id
    /// with no backing node, a node claimed by two parents, or a node
    /// unreachable from the root.
    pub fn from_nodes(nodes: Vec<Node>, root_id: impl Into<NodeId>) -> Result<Self, DocumentError> {
        let doc = Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            root_id: root_id.into(),
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Check the structural invariants: the root exists, every child id
    /// resolves, every node has at most one parent, and every node is
    /// reachable from the root (tree, not DAG).
    ///
    /// # Errors
    ///
    /// Returns the violated invariant as a [`DocumentError`].
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.nodes.contains_key(&self.root_id) {
            return Err(DocumentError::MissingRoot(self.root_id.clone()));
        }

        let mut parent_of: HashMap<&NodeId, &NodeId> = HashMap::new();
        for (id, node) in &self.nodes {
            for child in node.children() {
                if !self.nodes.contains_key(child) {
                    return Err(DocumentError::UnknownChild { parent: id.clone(), child: child.clone() });
                }
                if *child == self.root_id {
                    return Err(DocumentError::RootHasParent(id.clone()));
                }
                if parent_of.insert(child, id).is_some() {
                    return Err(DocumentError::MultipleParents(child.clone()));
                }
            }
        }

        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut stack = vec![&self.root_id];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children());
            }
        }
        for id in self.nodes.keys() {
            if !visited.contains(id) {
                return Err(DocumentError::Unreachable(id.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn root_id(&self) -> &NodeId {
        &self.root_id
    }

    /// Return a reference to a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate all nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// The derived bounding rectangle of a node, if it has one.
    #[must_use]
    pub fn node_rect(&self, id: &str) -> Option<Rect> {
        self.get(id).and_then(Node::bounding_rect)
    }

    /// All nodes sorted by `(z_index, id)` for draw order.
    #[must_use]
    pub fn painter_order(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        nodes
    }

    /// Number of nodes currently in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the document contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
