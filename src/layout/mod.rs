//! Layout inference.
//!
//! Turns a flat component list into a Root / Row / Leaf tree:
//!
//! 1. sort by top edge, then left edge (reading order)
//! 2. group into rows with [`rows::cluster_rows`]
//! 3. order each row left to right
//! 4. check that every input component appears exactly once
//!
//! Step 4 is the guarantee the code generators rely on. A violation is
//! returned as a [`LayoutConsistencyError`] instead of a malformed tree.

pub mod node;
pub mod rows;

pub use node::{Direction, LayoutNode};
pub use rows::{cluster_rows, RowAccumulator, RowCluster};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::ir::{Component, ComponentId};

/// Row grouping settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum centre-line distance for joining a row, as a fraction of the
    /// row's mean height.
    pub row_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { row_tolerance: 0.6 }
    }
}

/// The tree does not use every component exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutConsistencyError {
    #[error("component {id} placed more than once")]
    DuplicateComponent { id: ComponentId },

    #[error("components never placed: {}", join_ids(ids))]
    UnusedComponents { ids: Vec<ComponentId> },
}

fn join_ids(ids: &[ComponentId]) -> String {
    ids.iter()
        .map(ComponentId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the layout tree for a set of components.
///
/// Zero components give an empty root.
pub fn build_layout_tree(
    components: &[Component],
    config: &LayoutConfig,
) -> Result<LayoutNode, LayoutConsistencyError> {
    let mut sorted = components.to_vec();
    sorted.sort_by_key(|c| (c.bbox.y, c.bbox.x));

    let clusters = cluster_rows(sorted, config.row_tolerance);
    let rows: Vec<LayoutNode> = clusters
        .into_iter()
        .enumerate()
        .map(|(i, cluster)| {
            let mut members = cluster.into_members();
            members.sort_by_key(|c| c.bbox.x);
            debug!(
                row = i,
                members = ?members.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
                "grouped row"
            );
            LayoutNode::row(members)
        })
        .collect();

    let root = LayoutNode::Root { rows };
    if let Err(e) = check_coverage(&root, components) {
        error!(error = %e, "layout tree failed the coverage check");
        return Err(e);
    }

    info!(
        rows = root.children().len(),
        components = root.leaf_count(),
        "built layout tree"
    );
    Ok(root)
}

/// Verifies that the tree's leaves are exactly the given components, each
/// used once.
pub fn check_coverage(
    root: &LayoutNode,
    components: &[Component],
) -> Result<(), LayoutConsistencyError> {
    let mut consumed: HashSet<&ComponentId> = HashSet::with_capacity(components.len());
    for leaf in root.leaves() {
        if !consumed.insert(&leaf.id) {
            return Err(LayoutConsistencyError::DuplicateComponent {
                id: leaf.id.clone(),
            });
        }
    }

    let unused: Vec<ComponentId> = components
        .iter()
        .filter(|c| !consumed.contains(&c.id))
        .map(|c| c.id.clone())
        .collect();
    if !unused.is_empty() {
        return Err(LayoutConsistencyError::UnusedComponents { ids: unused });
    }

    Ok(())
}
