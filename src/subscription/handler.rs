//! # Shared handler values.
//!
//! A handler is identified by **identity**, not by behaviour: two handlers built
//! from the same closure are different handlers, while clones of one
//! [`Handler`] are the same handler. Keep a handler around (e.g. in a
//! `static`) when you need idempotent subscription or `unsubscribe`.
//!
//! - [`Handler<C>`] is bound to a context of type `C` (the receiver).
//! - [`DetachedHandler`] has no receiver.
//!
//! ## Example
//! ```rust
//! use vidbus::{Handler, Kind, Receiver, Value};
//!
//! struct Player;
//! impl Receiver for Player {
//!     fn kind(&self) -> Kind { Kind::from_static("custom-video") }
//! }
//!
//! let h = Handler::new(|_p: &Player, _args: &[Value]| Ok(()));
//! let same = h.clone();
//! let other = Handler::new(|_p: &Player, _args: &[Value]| Ok(()));
//! assert!(h.same_as(&same));
//! assert!(!h.same_as(&other));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::events::Value;

/// Result type returned by handlers.
pub type HandlerResult = Result<(), HandlerError>;

type BoundFn<C> = dyn Fn(&C, &[Value]) -> HandlerResult + Send + Sync;
type DetachedFn = dyn Fn(&[Value]) -> HandlerResult + Send + Sync;

/// Identity of a handler (address of its shared callback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct HandlerId(usize);

/// Handler invoked with its context bound as receiver.
pub struct Handler<C> {
    f: Arc<BoundFn<C>>,
}

impl<C: 'static> Handler<C> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&C, &[Value]) -> HandlerResult + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Whether both values are the same handler.
    #[inline]
    pub fn same_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    #[inline]
    pub(crate) fn id(&self) -> HandlerId {
        HandlerId(Arc::as_ptr(&self.f) as *const () as usize)
    }

    pub(crate) fn callback(&self) -> Arc<BoundFn<C>> {
        Arc::clone(&self.f)
    }
}

impl<C> Clone for Handler<C> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.f) as *const ())
    }
}

/// Handler without a receiver (the "null context" case).
#[derive(Clone)]
pub struct DetachedHandler {
    f: Arc<DetachedFn>,
}

impl DetachedHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> HandlerResult + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    #[inline]
    pub fn same_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    #[inline]
    pub(crate) fn id(&self) -> HandlerId {
        HandlerId(Arc::as_ptr(&self.f) as *const () as usize)
    }

    pub(crate) fn callback(&self) -> Arc<DetachedFn> {
        Arc::clone(&self.f)
    }
}

impl fmt::Debug for DetachedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DetachedHandler({:p})", Arc::as_ptr(&self.f) as *const ())
    }
}
