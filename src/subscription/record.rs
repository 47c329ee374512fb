//! # Stored subscription record.
//!
//! A [`Subscription`] holds the event name (compared by value), the handler
//! identity, and an optional weak context. Its callback is erased into a
//! single `invoke` closure that upgrades the context on each call.

use std::fmt;
use std::sync::Arc;

use crate::events::Value;
use crate::subscription::context::{ContextRef, Kind, Receiver, Target};
use crate::subscription::handler::{DetachedHandler, Handler, HandlerId, HandlerResult};

/// Erased call; `None` when the bound context has been dropped.
type Invoke = dyn Fn(&[Value]) -> Option<HandlerResult> + Send + Sync;

/// One (event, handler, context) registration.
pub(crate) struct Subscription {
    event: Arc<str>,
    handler: HandlerId,
    context: Option<ContextRef>,
    invoke: Box<Invoke>,
}

impl Subscription {
    /// Subscription bound to `ctx`; the handler receives `&C` as receiver.
    pub(crate) fn bound<C: Receiver>(event: &str, handler: &Handler<C>, ctx: &Arc<C>) -> Self {
        let weak = Arc::downgrade(ctx);
        let f = handler.callback();
        Self {
            event: event.into(),
            handler: handler.id(),
            context: Some(ContextRef::new(ctx)),
            invoke: Box::new(move |args: &[Value]| weak.upgrade().map(|c| f(&*c, args))),
        }
    }

    /// Subscription without a context.
    pub(crate) fn detached(event: &str, handler: &DetachedHandler) -> Self {
        let f = handler.callback();
        Self {
            event: event.into(),
            handler: handler.id(),
            context: None,
            invoke: Box::new(move |args: &[Value]| Some(f(args))),
        }
    }

    #[inline]
    pub(crate) fn event(&self) -> &str {
        &self.event
    }

    #[inline]
    pub(crate) fn kind(&self) -> Option<&Kind> {
        self.context.as_ref().map(ContextRef::kind)
    }

    /// Detached subscriptions never die.
    #[inline]
    pub(crate) fn is_alive(&self) -> bool {
        self.context.as_ref().map_or(true, ContextRef::is_alive)
    }

    /// Whether this record belongs to the (live) context at `addr`.
    #[inline]
    pub(crate) fn bound_to(&self, addr: usize) -> bool {
        self.context.as_ref().is_some_and(|c| c.is(addr))
    }

    /// Exact triple match: event by value, handler and context by identity.
    pub(crate) fn is(&self, event: &str, handler: HandlerId, context: Option<usize>) -> bool {
        if *self.event != *event || self.handler != handler {
            return false;
        }
        match (&self.context, context) {
            (None, None) => true,
            (Some(c), Some(addr)) => c.is(addr),
            _ => false,
        }
    }

    /// Identity key of this record, for duplicate checks.
    pub(crate) fn same_as(&self, other: &Subscription) -> bool {
        if !other.is_alive() {
            return false;
        }
        self.is(
            &other.event,
            other.handler,
            other.context.as_ref().map(ContextRef::addr),
        )
    }

    /// Delivery rule: equal event name and a target admitting our context kind.
    #[inline]
    pub(crate) fn matches(&self, event: &str, target: &Target) -> bool {
        *self.event == *event && target.admits(self.kind())
    }

    #[inline]
    pub(crate) fn invoke(&self, args: &[Value]) -> Option<HandlerResult> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("handler", &self.handler)
            .field("context", &self.context)
            .finish()
    }
}
