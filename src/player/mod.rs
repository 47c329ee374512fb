//! Headless player model: the reference consumer of the bus.
//!
//! Keeps volume and play state of several player instances in sync, the way
//! embedded video elements on one page share mute state and let only one of
//! them play at a time.

#[allow(clippy::module_inception)]
mod player;

pub use player::{Player, PAUSE_CHANGED, PLAYER_KIND, VOLUME_CHANGED};
