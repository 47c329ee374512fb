//! # Records of bus activity delivered to observers.
//!
//! The [`DispatchKind`] enum classifies what happened on the bus; the
//! [`DispatchEvent`] struct carries the metadata (event name, delivery filter,
//! counts, reasons).
//!
//! ## Ordering guarantees
//! Each record has a process-wide sequence number (`seq`) that increases
//! monotonically. Observers run on independent workers, so use `seq` to
//! restore order across observers.
//!
//! ## Example
//! ```rust
//! use vidbus::{DispatchEvent, DispatchKind};
//!
//! let ev = DispatchEvent::new(DispatchKind::Published)
//!     .with_event("vol")
//!     .with_count(2);
//!
//! assert_eq!(ev.kind, DispatchKind::Published);
//! assert_eq!(ev.event.as_deref(), Some("vol"));
//! assert_eq!(ev.count, Some(2));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::subscription::Kind;

/// Global sequence counter for record ordering.
static DISPATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of bus activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    /// A new subscription was stored.
    ///
    /// Sets:
    /// - `event`: event name
    /// - `target`: context kind (absent for detached subscriptions)
    Subscribed,

    /// `subscribe` was called with a triple already in the registry.
    ///
    /// Sets:
    /// - `event`: event name
    /// - `target`: context kind (absent for detached subscriptions)
    DuplicateIgnored,

    /// One or more subscriptions were removed explicitly.
    ///
    /// Sets:
    /// - `event`: event name (absent when removed by context)
    /// - `count`: number of removed subscriptions
    Unsubscribed,

    /// A publish completed.
    ///
    /// Sets:
    /// - `event`: event name
    /// - `target`: delivery filter kind (absent for broadcast)
    /// - `count`: number of handlers invoked
    Published,

    /// A handler failed; the fan-out was aborted.
    ///
    /// Sets:
    /// - `event`: event name
    /// - `target`: delivery filter kind (absent for broadcast)
    /// - `count`: position of the failing handler
    /// - `reason`: handler error message
    HandlerFailed,

    /// Subscriptions with dropped contexts were removed.
    ///
    /// Sets:
    /// - `count`: number of removed subscriptions
    Pruned,
}

impl DispatchKind {
    /// Returns a short stable label (kebab-case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchKind::Subscribed => "subscribed",
            DispatchKind::DuplicateIgnored => "duplicate-ignored",
            DispatchKind::Unsubscribed => "unsubscribed",
            DispatchKind::Published => "published",
            DispatchKind::HandlerFailed => "handler-failed",
            DispatchKind::Pruned => "pruned",
        }
    }
}

/// Bus activity record with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`DispatchKind`]
#[derive(Debug, Clone)]
pub struct DispatchEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Record classification.
    pub kind: DispatchKind,
    /// Event name, if applicable.
    pub event: Option<Arc<str>>,
    /// Context kind or delivery filter, if applicable.
    pub target: Option<Kind>,
    /// Count or position, meaning depends on `kind`.
    pub count: Option<usize>,
    /// Human-readable reason (handler errors).
    pub reason: Option<Arc<str>>,
}

impl DispatchEvent {
    /// Creates a new record of the given kind with current timestamp and next sequence number.
    pub fn new(kind: DispatchKind) -> Self {
        Self {
            seq: DISPATCH_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            event: None,
            target: None,
            count: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_event(mut self, event: impl Into<Arc<str>>) -> Self {
        self.event = Some(event.into());
        self
    }

    #[inline]
    pub fn with_target(mut self, target: Option<Kind>) -> Self {
        self.target = target;
        self
    }

    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(n);
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
