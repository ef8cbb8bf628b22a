//! Per-room cursor registry and inbound message application.
//!
//! DESIGN
//! ======
//! One `Room` per document/session. Inbound messages update only the
//! addressed cursor's corresponding field; there is no cross-field or
//! cross-cursor ordering guarantee, so application is field-local and
//! last-write-wins. Membership is open: a field update for an unknown
//! cursor id creates a placeholder record that a later `JOIN`/`NOTIFY`
//! snapshot fills in. `LEAVE` removes the record outright.

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

use std::collections::HashMap;

use tracing::info;

use crate::cursor::{Cursor, CursorId};
use crate::message::PresenceMessage;

/// Live cursors for one room, keyed by cursor id.
#[derive(Debug, Clone, Default)]
pub struct Room {
    cursors: HashMap<CursorId, Cursor>,
}

impl Room {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one inbound message to the registry.
    pub fn apply(&mut self, msg: &PresenceMessage) {
        match msg {
            PresenceMessage::Join { cursor } => {
                info!(cursor_id = %cursor.cursor_id, "presence: cursor joined");
                self.cursors.insert(cursor.cursor_id, cursor.clone());
            }
            PresenceMessage::Notify { cursor } => {
                self.cursors.insert(cursor.cursor_id, cursor.clone());
            }
            PresenceMessage::Leave { cursor_id } => {
                if self.cursors.remove(cursor_id).is_some() {
                    info!(%cursor_id, "presence: cursor left");
                }
            }
            PresenceMessage::Location { cursor_id, location } => {
                self.entry(*cursor_id).location = location.clone();
            }
            PresenceMessage::Pos { cursor_id, pos } => {
                self.entry(*cursor_id).pos = Some(*pos);
            }
            PresenceMessage::Node { cursor_id, node } => {
                self.entry(*cursor_id).node = node.clone();
            }
            PresenceMessage::Message { cursor_id, message, typing } => {
                let cursor = self.entry(*cursor_id);
                cursor.message = message.clone();
                cursor.typing = *typing;
            }
        }
    }

    /// The addressed cursor, created as a placeholder if unknown.
    fn entry(&mut self, cursor_id: CursorId) -> &mut Cursor {
        self.cursors.entry(cursor_id).or_insert_with(|| Cursor::placeholder(cursor_id))
    }

    /// Look up a cursor by id.
    #[must_use]
    pub fn cursor(&self, id: &CursorId) -> Option<&Cursor> {
        self.cursors.get(id)
    }

    /// Iterate all live cursors in unspecified order.
    pub fn cursors(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.values()
    }

    /// Number of live cursors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Returns `true` if no cursors are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
