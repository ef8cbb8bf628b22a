//! Shared timing and input constants for the presence crate.

use std::time::Duration;

/// Minimum interval between outbound cursor position broadcasts. Positions
/// arriving faster than this are dropped, last value wins.
pub const POS_BROADCAST_INTERVAL: Duration = Duration::from_millis(50);

/// Key that opens the cursor message composer and sets the typing indicator.
pub const TYPING_TRIGGER_KEY: &str = "/";
