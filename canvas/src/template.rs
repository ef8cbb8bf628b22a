//! Template/override layering for reusable component instances.
//!
//! A template supplies base definitions for a set of nodes; an instance
//! carries a sparse override record per node id. The rendered node is the
//! base merged with the override, override winning on conflicting keys.
//! Style, attribute, and value categories all share one merge primitive:
//! shallow, last-writer-wins per key, `null` removes a key.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::doc::NodeId;

/// Open-ended string-keyed JSON bag used for styles, attributes, and values.
pub type JsonMap = serde_json::Map<String, Value>;

/// Sparse per-node patch layered atop a template's base definition.
/// Only present fields take effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeOverride {
    /// Replacement component id; the node becomes an instance of it while
    /// keeping its node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Replacement text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub style: JsonMap,
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub attributes: JsonMap,
    /// Instance-node property values.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub values: JsonMap,
}

impl NodeOverride {
    /// Whether this override carries no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.component.is_none()
            && self.text.is_none()
            && self.style.is_empty()
            && self.attributes.is_empty()
            && self.values.is_empty()
    }
}

/// Shallow-merge `patch` into `target`: last writer wins per key, `null`
/// removes the key. Merging the same patch twice equals merging it once.
pub fn merge_patch(target: &mut JsonMap, patch: &JsonMap) {
    for (key, value) in patch {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Pure merge of a base map with a patch, leaving both inputs untouched.
#[must_use]
pub fn merged(base: &JsonMap, patch: &JsonMap) -> JsonMap {
    let mut out = base.clone();
    merge_patch(&mut out, patch);
    out
}

/// State of one bound template instance: wholesale document data, root-level
/// property values, and per-node overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateState {
    /// Data values bound to the template, replaced wholesale.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub data: JsonMap,
    /// Template-level property values (root data binding, not per-node).
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub values: JsonMap,
    /// Per-node overrides, keyed by node id. Ids are expected to exist in
    /// the template's node set, but missing ids are tolerated (upserted) by
    /// the reducer.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub overrides: HashMap<NodeId, NodeOverride>,
}

impl TemplateState {
    /// The override record for a node, if one exists.
    #[must_use]
    pub fn override_for(&self, id: &str) -> Option<&NodeOverride> {
        self.overrides.get(id)
    }

    /// Resolve a node's style: template base merged with the override's
    /// style map, override winning.
    #[must_use]
    pub fn resolved_style(&self, id: &str, base: &JsonMap) -> JsonMap {
        match self.override_for(id) {
            Some(ov) => merged(base, &ov.style),
            None => base.clone(),
        }
    }

    /// Resolve a node's text: the override text when present, else the base.
    #[must_use]
    pub fn resolved_text<'a>(&'a self, id: &str, base: &'a str) -> &'a str {
        self.override_for(id).and_then(|ov| ov.text.as_deref()).unwrap_or(base)
    }
}
