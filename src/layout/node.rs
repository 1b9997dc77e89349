//! The layout tree.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::ir::Component;

/// Flex direction of a node's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Children stacked top to bottom.
    Column,
    /// Children side by side, left to right.
    Row,
}

/// A node of the Root / Row / Leaf hierarchy.
///
/// Root children are always rows and row children are always leaves; the
/// tree is at most three levels deep.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutNode {
    Root { rows: Vec<LayoutNode> },
    Row { leaves: Vec<LayoutNode> },
    Leaf(Component),
}

impl LayoutNode {
    /// An empty root.
    pub fn empty_root() -> Self {
        LayoutNode::Root { rows: Vec::new() }
    }

    /// Builds a row from components already in left-to-right order.
    pub fn row(components: Vec<Component>) -> Self {
        LayoutNode::Row {
            leaves: components.into_iter().map(LayoutNode::Leaf).collect(),
        }
    }

    /// Layout direction, `None` for leaves.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            LayoutNode::Root { .. } => Some(Direction::Column),
            LayoutNode::Row { .. } => Some(Direction::Row),
            LayoutNode::Leaf(_) => None,
        }
    }

    pub fn children(&self) -> &[LayoutNode] {
        match self {
            LayoutNode::Root { rows } => rows,
            LayoutNode::Row { leaves } => leaves,
            LayoutNode::Leaf(_) => &[],
        }
    }

    /// The component of a leaf.
    pub fn component(&self) -> Option<&Component> {
        match self {
            LayoutNode::Leaf(component) => Some(component),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, LayoutNode::Leaf(_))
    }

    /// All leaf components in document order (row by row, left to right).
    pub fn leaves(&self) -> Vec<&Component> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Component>) {
        match self {
            LayoutNode::Leaf(component) => out.push(component),
            other => {
                for child in other.children() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            LayoutNode::Leaf(_) => 1,
            other => other.children().iter().map(LayoutNode::leaf_count).sum(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            LayoutNode::Root { .. } => "root",
            LayoutNode::Row { .. } => "row",
            LayoutNode::Leaf(_) => "leaf",
        }
    }
}

impl Serialize for LayoutNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LayoutNode::Leaf(component) => {
                let mut state = serializer.serialize_struct("LayoutNode", 2)?;
                state.serialize_field("node", self.kind())?;
                state.serialize_field("component", component)?;
                state.end()
            }
            _ => {
                let mut state = serializer.serialize_struct("LayoutNode", 3)?;
                state.serialize_field("node", self.kind())?;
                state.serialize_field("direction", &self.direction())?;
                state.serialize_field("children", self.children())?;
                state.end()
            }
        }
    }
}
