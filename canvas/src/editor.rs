//! Editor reducer: pure state transitions over document/template state.
//!
//! DESIGN
//! ======
//! `reduce` is a pure function `(state, action) -> state`. It never mutates
//! its input; every transition returns a copy that structurally shares the
//! untouched subtrees (the document is behind an `Arc` and none of the
//! current actions touch it, so it is shared by pointer across every
//! dispatch). The host dispatch loop serializes action application; the
//! reducer assumes a single writer.
//!
//! Unrecognized action tags are absorbed as no-ops rather than errors, and
//! update actions that address a node id missing from the document upsert a
//! fresh override record. Both are deliberate forward-compatible defaults
//! carried over from the product; they are counted in [`EditorStats`] and
//! logged so drift is observable without changing behavior.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::doc::{Document, DocumentError, NodeId};
use crate::template::{JsonMap, NodeOverride, TemplateState, merge_patch};

/// An editing action dispatched by the host UI. Tagged by `type` on the
/// wire; any unrecognized tag deserializes to [`Action::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    /// Replace the template's bound data values wholesale.
    SetDocumentData { data: JsonMap },
    /// Set the selected node and attach arbitrary selection metadata.
    SelectNode {
        node_id: NodeId,
        #[serde(default)]
        meta: Value,
    },
    /// Rewrite a node override to become an instance of a different
    /// component, preserving the node id.
    SwitchComponent { node_id: NodeId, component_id: String },
    /// Set the override text for a node.
    ChangeText { node_id: NodeId, text: String },
    /// Shallow-merge a style patch into the node's override style map.
    UpdateStyle { node_id: NodeId, style: JsonMap },
    /// Shallow-merge into the node's override attributes.
    UpdateAttribute { node_id: NodeId, attributes: JsonMap },
    /// Shallow-merge into the node's override values.
    UpdateProperty { node_id: NodeId, values: JsonMap },
    /// Shallow-merge into the template-level values (root data binding).
    UpdateTemplateProperty { values: JsonMap },
    /// Any unrecognized tag. Reduced as a no-op.
    #[serde(other)]
    Unknown,
}

/// The current selection: one node id plus whatever metadata the host
/// attached at selection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub node_id: NodeId,
    #[serde(default)]
    pub meta: Value,
}

/// Monitoring counters for the reducer's permissive paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorStats {
    /// Actions with an unrecognized tag, absorbed as no-ops.
    pub ignored_actions: u64,
    /// Overrides created for node ids absent from the document.
    pub override_upserts: u64,
}

/// Full editor session state. Produced only by [`reduce`] after the initial
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    /// The scene-graph document. Shared, not copied, across transitions.
    pub document: Arc<Document>,
    pub template: TemplateState,
    pub selection: Option<Selection>,
    pub stats: EditorStats,
}

impl EditorState {
    /// Start a session from a document supplied by the persistence
    /// collaborator.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] when the document violates the structural
    /// invariants; an invalid document is never accepted into a session.
    pub fn new(document: Document) -> Result<Self, DocumentError> {
        document.validate()?;
        Ok(Self {
            document: Arc::new(document),
            template: TemplateState::default(),
            selection: None,
            stats: EditorStats::default(),
        })
    }
}

/// Apply one action, returning the next state. The input state is never
/// mutated; unrecognized actions return it unchanged (modulo the monitoring
/// counter).
#[must_use]
pub fn reduce(state: &EditorState, action: &Action) -> EditorState {
    let mut next = state.clone();
    match action {
        Action::SetDocumentData { data } => {
            next.template.data = data.clone();
        }
        Action::SelectNode { node_id, meta } => {
            next.selection = Some(Selection { node_id: node_id.clone(), meta: meta.clone() });
        }
        Action::SwitchComponent { node_id, component_id } => {
            override_entry(&mut next, node_id).component = Some(component_id.clone());
        }
        Action::ChangeText { node_id, text } => {
            override_entry(&mut next, node_id).text = Some(text.clone());
        }
        Action::UpdateStyle { node_id, style } => {
            merge_patch(&mut override_entry(&mut next, node_id).style, style);
        }
        Action::UpdateAttribute { node_id, attributes } => {
            merge_patch(&mut override_entry(&mut next, node_id).attributes, attributes);
        }
        Action::UpdateProperty { node_id, values } => {
            merge_patch(&mut override_entry(&mut next, node_id).values, values);
        }
        Action::UpdateTemplateProperty { values } => {
            merge_patch(&mut next.template.values, values);
        }
        Action::Unknown => {
            next.stats.ignored_actions += 1;
            debug!("ignoring unrecognized editor action");
        }
    }
    next
}

/// The override record for `node_id`, created on first touch. Creating a
/// record for an id the document does not know is allowed (current product
/// behavior) but counted and logged.
fn override_entry<'s>(next: &'s mut EditorState, node_id: &NodeId) -> &'s mut NodeOverride {
    if !next.template.overrides.contains_key(node_id) && !next.document.contains(node_id) {
        next.stats.override_upserts += 1;
        debug!(%node_id, "creating override for a node id absent from the document");
    }
    next.template.overrides.entry(node_id.clone()).or_default()
}
