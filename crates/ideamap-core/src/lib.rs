use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub mod error;

pub use error::LayoutError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Final or interpolated positions keyed by node id.
pub type PositionMap = HashMap<NodeId, Position>;

/// A positioned unit of the diagram (a feature or topic in the mindmap).
///
/// `parent_id` is a back-reference by id. Layouts derive the hierarchy from it
/// together with the link list and never treat it as ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub parent_id: Option<NodeId>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            parent_id: None,
        }
    }

    pub fn at(id: impl Into<NodeId>, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::new(id)
        }
    }

    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Position) {
        self.x = position.x;
        self.y = position.y;
    }
}

/// Directed edge between two node ids: a hierarchy edge for tree and radial
/// layouts, a spring for the force layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
}

impl Link {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Nodes and links as exchanged with the data store or read from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Tree,
    Radial,
    Force,
}

impl LayoutKind {
    /// Resolves a layout tag. Unknown tags fall back to `Tree`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "tree" => LayoutKind::Tree,
            "radial" => LayoutKind::Radial,
            "force" => LayoutKind::Force,
            other => {
                tracing::debug!("Unknown layout tag {:?}, falling back to tree", other);
                LayoutKind::Tree
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Tree => "tree",
            LayoutKind::Radial => "radial",
            LayoutKind::Force => "force",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis along which tree depth grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutDirection {
    /// Depth along `x`, leaves stacked along `y`.
    #[default]
    Horizontal,
    /// Depth along `y`, leaves stacked along `x`.
    Vertical,
}
