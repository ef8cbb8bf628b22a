//! Local-player presence session.
//!
//! Translates raw input events (pointer moves, key presses, route changes)
//! into outbound [`PresenceMessage`]s. Position updates go through the
//! 50 ms [`Throttle`]; everything else broadcasts immediately. The owning
//! component must call [`LocalPresence::leave`] and stop broadcasting on
//! teardown, or peers keep a stale cursor until their registry is synced.

#[cfg(test)]
#[path = "local_test.rs"]
mod local_test;

use std::time::Instant;

use crate::consts::{POS_BROADCAST_INTERVAL, TYPING_TRIGGER_KEY};
use crate::cursor::{Cursor, CursorId, CursorNode, Palette};
use crate::message::PresenceMessage;
use crate::throttle::Throttle;

/// Modifier keys held during a key event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether any modifier is held.
    #[must_use]
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// The local participant's presence state and outbound message production.
#[derive(Debug)]
pub struct LocalPresence {
    cursor: Cursor,
    pos_throttle: Throttle<[f64; 2]>,
}

impl LocalPresence {
    #[must_use]
    pub fn new(cursor_id: CursorId, location: impl Into<String>, palette: Palette) -> Self {
        Self {
            cursor: Cursor::new(cursor_id, location, palette),
            pos_throttle: Throttle::new(POS_BROADCAST_INTERVAL),
        }
    }

    /// The local cursor as currently known.
    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Announce this cursor to the room.
    #[must_use]
    pub fn join(&self) -> PresenceMessage {
        PresenceMessage::Join { cursor: self.cursor.clone() }
    }

    /// Withdraw this cursor from the room. Send on teardown.
    #[must_use]
    pub fn leave(&self) -> PresenceMessage {
        PresenceMessage::Leave { cursor_id: self.cursor.cursor_id }
    }

    /// Full presence snapshot, for presence-sync requests and late joiners.
    #[must_use]
    pub fn snapshot(&self) -> PresenceMessage {
        PresenceMessage::Notify { cursor: self.cursor.clone() }
    }

    /// Route/path change. Broadcast immediately.
    pub fn on_route_change(&mut self, location: impl Into<String>) -> PresenceMessage {
        self.cursor.location = location.into();
        PresenceMessage::Location {
            cursor_id: self.cursor.cursor_id,
            location: self.cursor.location.clone(),
        }
    }

    /// Pointer move. Local state updates on every event; the broadcast is
    /// throttled to one per interval, last value wins.
    pub fn on_pointer_move(&mut self, pos: [f64; 2], now: Instant) -> Option<PresenceMessage> {
        self.cursor.pos = Some(pos);
        self.pos_throttle
            .offer(pos, now)
            .map(|pos| PresenceMessage::Pos { cursor_id: self.cursor.cursor_id, pos })
    }

    /// Emit a buffered position once the throttle window reopens.
    pub fn flush_pos(&mut self, now: Instant) -> Option<PresenceMessage> {
        self.pos_throttle
            .flush(now)
            .map(|pos| PresenceMessage::Pos { cursor_id: self.cursor.cursor_id, pos })
    }

    /// Focused-node change (`None` clears). Broadcast immediately.
    pub fn on_node_focus(&mut self, node: Option<CursorNode>) -> PresenceMessage {
        self.cursor.node = node.clone();
        PresenceMessage::Node { cursor_id: self.cursor.cursor_id, node }
    }

    /// Replace the composer text. Broadcast immediately.
    pub fn on_message_input(&mut self, text: impl Into<String>) -> Option<PresenceMessage> {
        if !self.cursor.typing {
            return None;
        }
        self.cursor.message = text.into();
        Some(self.message_state())
    }

    /// Key press. The trigger key opens the composer, `Escape` clears the
    /// composer and its text; key presses with any modifier held are
    /// ignored so shortcuts never toggle typing.
    pub fn on_key_down(&mut self, key: &str, modifiers: Modifiers) -> Option<PresenceMessage> {
        if modifiers.any() {
            return None;
        }
        match key {
            _ if key == TYPING_TRIGGER_KEY && !self.cursor.typing => {
                self.cursor.typing = true;
                Some(self.message_state())
            }
            "Escape" if self.cursor.typing || !self.cursor.message.is_empty() => {
                self.cursor.typing = false;
                self.cursor.message.clear();
                Some(self.message_state())
            }
            _ => None,
        }
    }

    fn message_state(&self) -> PresenceMessage {
        PresenceMessage::Message {
            cursor_id: self.cursor.cursor_id,
            message: self.cursor.message.clone(),
            typing: self.cursor.typing,
        }
    }
}
