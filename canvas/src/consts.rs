//! Shared numeric constants for the canvas crate.

/// Default per-axis snap threshold in world units.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 4.0;

/// Default font size for text nodes created without an explicit size.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;
