//! # Observers of bus activity.
//!
//! Observers see what the bus does (subscriptions, publishes, handler failures)
//! without taking part in dispatch. They run asynchronously on tokio workers,
//! so a bus with observers must be built inside a tokio runtime.
//!
//! ## Architecture
//! ```text
//! EventBus::publish ── dispatch handlers (sync) ──► DispatchEvent
//!                                                       │
//!                                                  ObserverSet::emit
//!                                                       │
//!                                     ┌─────────────────┼──────────────┐
//!                                     ▼                 ▼              ▼
//!                                 LogWriter          Metrics        Custom
//! ```

#[cfg(feature = "logging")]
mod log;
mod observer;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observer::Observe;
pub use set::ObserverSet;
