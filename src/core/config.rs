//! # Bus configuration.
//!
//! Provides [`Config`] centralized settings for an [`EventBus`](crate::EventBus).
//!
//! Config is consumed by `EventBus::builder(config)`.

/// Configuration for an event bus.
///
/// ## Field semantics
/// - `prune_dead`: drop subscriptions whose context was dropped as soon as the
///   bus notices them (during `subscribe` and `publish`)
/// - `initial_capacity`: registry pre-allocation hint (`0` = no pre-allocation)
///
/// ## Notes
/// All fields are public for flexibility; start from `Config::default()`.
#[derive(Clone, Debug)]
pub struct Config {
    /// Remove dead-context subscriptions eagerly.
    ///
    /// When `false`, dead subscriptions are skipped on publish and stay in the
    /// registry until [`EventBus::prune`](crate::EventBus::prune) is called.
    pub prune_dead: bool,

    /// Number of subscriptions to pre-allocate.
    pub initial_capacity: usize,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `prune_dead = true`
    /// - `initial_capacity = 16`
    fn default() -> Self {
        Self {
            prune_dead: true,
            initial_capacity: 16,
        }
    }
}
