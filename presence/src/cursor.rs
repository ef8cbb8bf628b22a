//! Cursor/presence records and color palettes.
//!
//! A cursor is the ephemeral per-user state shared across a collaborative
//! session. It is created on room join, updated on every local interaction
//! event, broadcast to peers, and dropped on leave — nothing here touches
//! storage.

#[cfg(test)]
#[path = "cursor_test.rs"]
mod cursor_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a cursor within a room. One per connected client.
pub type CursorId = Uuid;

/// The node a remote cursor is focused on, shown as a hover highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorNode {
    /// Node kind, e.g. `"rectangle"` or `"text"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Pointer position within the node, in world coordinates.
    pub pos: [f64; 2],
}

/// Named color palette assigned to a cursor for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Slate,
    Amber,
    Rose,
    Emerald,
    Sky,
    Violet,
}

impl Palette {
    /// Every palette, in assignment order.
    pub const ALL: [Self; 6] = [Self::Slate, Self::Amber, Self::Rose, Self::Emerald, Self::Sky, Self::Violet];

    /// Pick a palette at random for a newly joined cursor.
    #[must_use]
    pub fn assign<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Primary display color as a CSS hex string.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Slate => "#64748B",
            Self::Amber => "#D97706",
            Self::Rose => "#E11D48",
            Self::Emerald => "#059669",
            Self::Sky => "#0284C7",
            Self::Violet => "#7C3AED",
        }
    }
}

/// Live presence record for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub cursor_id: CursorId,
    /// Route/path the participant is currently viewing.
    #[serde(default)]
    pub location: String,
    /// Pointer position in world coordinates; `None` until the first move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<[f64; 2]>,
    /// Text the participant has typed into the cursor composer.
    #[serde(default)]
    pub message: String,
    /// Whether the composer is open.
    #[serde(default)]
    pub typing: bool,
    /// Node the participant's pointer is over, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<CursorNode>,
    #[serde(default)]
    pub palette: Palette,
}

impl Cursor {
    /// A fresh cursor for a participant who just joined.
    #[must_use]
    pub fn new(cursor_id: CursorId, location: impl Into<String>, palette: Palette) -> Self {
        Self {
            cursor_id,
            location: location.into(),
            pos: None,
            message: String::new(),
            typing: false,
            node: None,
            palette,
        }
    }

    /// Placeholder record for a cursor first seen through a field update
    /// (open membership: unknown senders are created implicitly).
    #[must_use]
    pub fn placeholder(cursor_id: CursorId) -> Self {
        Self::new(cursor_id, String::new(), Palette::default())
    }
}
