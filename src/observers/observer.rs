//! # Bus observer trait.
//!
//! Provides [`Observe`] an extension point for watching bus activity
//! (subscriptions, publishes, handler failures) without taking part in dispatch.
//!
//! Each observer gets:
//! - **Dedicated worker task** (runs independently of publishers)
//! - **Per-observer bounded queue** (capacity via [`Observe::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged; the worker keeps going)
//!
//! ## Architecture
//! ```text
//! EventBus ──► ObserverSet ──► [bounded queue] ──► worker task ──► observer.on_event()
//!                                               └─► panic caught → tracing::error!
//! ```
//!
//! ## Rules
//! - `publish` stays synchronous: observers never delay handlers.
//! - Queue overflow drops the record **for this observer only**.
//! - Records are processed sequentially (FIFO) per observer.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use vidbus::{DispatchEvent, DispatchKind, Observe};
//!
//! struct Metrics;
//!
//! #[async_trait]
//! impl Observe for Metrics {
//!     async fn on_event(&self, ev: &DispatchEvent) {
//!         if matches!(ev.kind, DispatchKind::HandlerFailed) {
//!             // export a metric, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "metrics" }
//!     fn queue_capacity(&self) -> usize { 2048 }
//! }
//! ```

use async_trait::async_trait;

use crate::events::DispatchEvent;

/// Observer of bus activity.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Processes a single record.
    ///
    /// Called from a dedicated worker task, not in the publisher context.
    async fn on_event(&self, event: &DispatchEvent);

    /// Returns the observer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this observer.
    ///
    /// The runtime clamps capacity to a minimum of 1.
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
