//! In-process publish/subscribe reference transport.
//!
//! DESIGN
//! ======
//! One `RoomHub` per room: a map from cursor id to a bounded channel
//! sender, one per subscribed peer. Broadcast walks the map and does a
//! best-effort `try_send` per peer — a peer whose channel is full misses
//! that message (presence is ephemeral; the next update supersedes it),
//! and peers whose receiver was dropped are pruned on the next broadcast.
//! Real deployments substitute their own channel behind the same shape;
//! nothing outside this module assumes in-process delivery.

#[cfg(test)]
#[path = "hub_test.rs"]
mod hub_test;

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::info;

use crate::cursor::CursorId;
use crate::message::PresenceMessage;

/// Default per-peer channel capacity.
pub const PEER_BUFFER: usize = 256;

/// Broadcast fan-out for one room's presence messages.
#[derive(Debug, Default)]
pub struct RoomHub {
    peers: HashMap<CursorId, mpsc::Sender<PresenceMessage>>,
}

impl RoomHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer and return its inbound message stream.
    pub fn subscribe(&mut self, cursor_id: CursorId) -> mpsc::Receiver<PresenceMessage> {
        let (tx, rx) = mpsc::channel(PEER_BUFFER);
        self.peers.insert(cursor_id, tx);
        info!(%cursor_id, peers = self.peers.len(), "hub: peer subscribed");
        rx
    }

    /// Remove a peer. Its receiver stops getting messages immediately.
    pub fn unsubscribe(&mut self, cursor_id: &CursorId) {
        if self.peers.remove(cursor_id).is_some() {
            info!(%cursor_id, peers = self.peers.len(), "hub: peer unsubscribed");
        }
    }

    /// Deliver a message to every subscribed peer except `exclude`
    /// (normally the sender). Returns the number of peers reached.
    pub fn broadcast(&mut self, msg: &PresenceMessage, exclude: Option<CursorId>) -> usize {
        let mut delivered = 0;
        let mut closed: Vec<CursorId> = Vec::new();

        for (cursor_id, tx) in &self.peers {
            if exclude == Some(*cursor_id) {
                continue;
            }
            if tx.is_closed() {
                closed.push(*cursor_id);
                continue;
            }
            // Best-effort: a full channel drops this message for that peer.
            if tx.try_send(msg.clone()).is_ok() {
                delivered += 1;
            }
        }

        for cursor_id in closed {
            self.peers.remove(&cursor_id);
            info!(%cursor_id, "hub: pruned closed peer");
        }
        delivered
    }

    /// Number of subscribed peers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Returns `true` if no peers are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
