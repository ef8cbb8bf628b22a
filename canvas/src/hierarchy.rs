//! Derived parent/sibling index over a document.
//!
//! DESIGN
//! ======
//! The document stores children adjacency only; parent and sibling lookups
//! would otherwise require a tree walk. `HierarchyContext` is a recomputable
//! index built from that adjacency for O(1) structural queries. It is rebuilt
//! whenever node parentage changes (recompute-on-read strategy; the build is
//! linear in node count).
//!
//! ERROR HANDLING
//! ==============
//! A child id with no backing node is a broken reference. The builder prunes
//! it from the index and logs a warning rather than failing the build; a
//! stale index checked against a newer document surfaces the mismatch as a
//! [`BrokenReference`] so the caller can rebuild.

#[cfg(test)]
#[path = "hierarchy_test.rs"]
mod hierarchy_test;

use std::collections::HashMap;

use tracing::warn;

use crate::doc::{Document, NodeId};

/// A hierarchy entry referenced a node with no backing document entry.
///
/// Recoverable: prune the dangling id (the builder already does) or rebuild
/// the index from the current document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("hierarchy references a deleted or unknown node: {0}")]
pub struct BrokenReference(pub NodeId);

/// Derived index enabling parent/sibling lookups without tree traversal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchyContext {
    parent: HashMap<NodeId, NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    pruned: Vec<NodeId>,
}

impl HierarchyContext {
    /// Build the index from a document's children adjacency.
    ///
    /// Dangling child ids are pruned from the index and logged; they never
    /// make it into query results.
    #[must_use]
    pub fn build(doc: &Document) -> Self {
        let mut parent = HashMap::new();
        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut pruned = Vec::new();

        for node in doc.nodes() {
            let kept: Vec<NodeId> = node
                .children()
                .iter()
                .filter(|child| {
                    let exists = doc.contains(child);
                    if !exists {
                        warn!(parent = %node.id, child = %child, "pruning dangling child reference");
                        pruned.push((*child).clone());
                    }
                    exists
                })
                .cloned()
                .collect();
            for child in &kept {
                parent.insert(child.clone(), node.id.clone());
            }
            children.insert(node.id.clone(), kept);
        }

        Self { parent, children, pruned }
    }

    /// The parent of `id`, or `None` for the root and unknown ids.
    #[must_use]
    pub fn parent_id(&self, id: &str) -> Option<&NodeId> {
        self.parent.get(id)
    }

    /// Ordered children of `id`; empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: &str) -> &[NodeId] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Siblings of `id` in parent order, excluding `id` itself.
    #[must_use]
    pub fn siblings(&self, id: &str) -> Vec<NodeId> {
        let Some(parent) = self.parent_id(id) else {
            return Vec::new();
        };
        self.children(parent).iter().filter(|c| *c != id).cloned().collect()
    }

    /// Whether `id` is a strict descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant(&self, id: &str, ancestor: &str) -> bool {
        let mut current = self.parent_id(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent_id(p);
        }
        false
    }

    /// Dangling child ids dropped while building the index.
    #[must_use]
    pub fn pruned(&self) -> &[NodeId] {
        &self.pruned
    }

    /// Check this index against a document, detecting stale entries after
    /// nodes were deleted or reparented behind the index's back.
    ///
    /// # Errors
    ///
    /// Returns the first [`BrokenReference`] found; the caller recovers by
    /// rebuilding the index.
    pub fn verify(&self, doc: &Document) -> Result<(), BrokenReference> {
        for id in self.parent.keys().chain(self.parent.values()) {
            if !doc.contains(id) {
                return Err(BrokenReference(id.clone()));
            }
        }
        for (id, kids) in &self.children {
            if !doc.contains(id) {
                return Err(BrokenReference(id.clone()));
            }
            if let Some(stale) = kids.iter().find(|c| !doc.contains(c)) {
                return Err(BrokenReference(stale.clone()));
            }
        }
        Ok(())
    }
}
