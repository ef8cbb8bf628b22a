//! Multiplayer presence: per-room cursor state synchronization.
//!
//! Each client in a shared editing session owns one [`cursor::Cursor`]
//! record: pointer position, current route, typed message, typing indicator,
//! and focused-node pointer. Local interaction events produce outbound
//! [`message::PresenceMessage`]s; inbound messages update one cursor's field
//! in the local [`room::Room`]. State is ephemeral — created on join,
//! garbage-collected on leave, never persisted.
//!
//! The broadcast channel itself is a host concern: delivery is assumed
//! at-least-once and unordered, so every message is self-contained and
//! applies last-write-wins to a single field. [`hub::RoomHub`] is the
//! in-process reference transport used by tests and embedders.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`cursor`] | Cursor/presence records and color palettes |
//! | [`message`] | Broadcast message kinds and their payloads |
//! | [`room`] | Per-room cursor registry and message application |
//! | [`local`] | Local-player session producing outbound messages |
//! | [`throttle`] | Last-value-wins fixed-interval broadcast throttle |
//! | [`hub`] | In-process publish/subscribe reference transport |
//! | [`consts`] | Shared timing and input constants |

pub mod consts;
pub mod cursor;
pub mod hub;
pub mod local;
pub mod message;
pub mod room;
pub mod throttle;
