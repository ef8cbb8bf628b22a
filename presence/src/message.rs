//! Broadcast message kinds and their payloads.
//!
//! DESIGN
//! ======
//! The transport is a host-supplied publish/subscribe channel with
//! at-least-once, unordered delivery — even within one kind. Every message
//! is therefore self-contained: it names the cursor it addresses and
//! carries the full new value of exactly one field (or, for `JOIN` and
//! `NOTIFY`, the full presence snapshot). Applying a message twice or out
//! of order converges to the same per-field last-write-wins state.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

use crate::cursor::{Cursor, CursorId, CursorNode};

/// One presence broadcast, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresenceMessage {
    /// A participant entered the room. Carries the full presence snapshot.
    Join { cursor: Cursor },
    /// A participant left; their cursor is garbage-collected.
    Leave { cursor_id: CursorId },
    /// Route/path change.
    Location { cursor_id: CursorId, location: String },
    /// Full presence snapshot, sent on request or to late joiners.
    Notify { cursor: Cursor },
    /// Pointer position only. Throttled at the sender.
    Pos { cursor_id: CursorId, pos: [f64; 2] },
    /// Focused-node pointer, cleared with `None`.
    Node {
        cursor_id: CursorId,
        node: Option<CursorNode>,
    },
    /// Composer text and typing indicator.
    Message {
        cursor_id: CursorId,
        message: String,
        typing: bool,
    },
}

impl PresenceMessage {
    /// The cursor this message addresses.
    #[must_use]
    pub fn cursor_id(&self) -> CursorId {
        match self {
            Self::Join { cursor } | Self::Notify { cursor } => cursor.cursor_id,
            Self::Leave { cursor_id }
            | Self::Location { cursor_id, .. }
            | Self::Pos { cursor_id, .. }
            | Self::Node { cursor_id, .. }
            | Self::Message { cursor_id, .. } => *cursor_id,
        }
    }

    /// The wire tag of this message.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "JOIN",
            Self::Leave { .. } => "LEAVE",
            Self::Location { .. } => "LOCATION",
            Self::Notify { .. } => "NOTIFY",
            Self::Pos { .. } => "POS",
            Self::Node { .. } => "NODE",
            Self::Message { .. } => "MESSAGE",
        }
    }
}
