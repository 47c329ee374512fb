//! # Contexts, kinds and delivery targets.
//!
//! A context is the receiver a handler is bound to. Every context type reports
//! an explicit [`Kind`] tag; publishing with a [`Target::Kind`] restricts
//! delivery to subscriptions whose context has that kind.
//!
//! ## Rules
//! - The kind is captured **once**, at subscribe time.
//! - The bus keeps only a weak reference to the context; a dropped context is
//!   never invoked and never counts as a duplicate.
//! - Context identity is the address of the shared allocation (`Arc`).
//!
//! ## Example
//! ```rust
//! use vidbus::{Kind, Receiver, Target};
//!
//! struct Player;
//! impl Receiver for Player {
//!     fn kind(&self) -> Kind { Kind::from_static("custom-video") }
//! }
//!
//! let t = Target::of(&Player);
//! assert_eq!(t, Target::Kind(Kind::from_static("custom-video")));
//! assert!(Target::All.admits(None));
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Weak};

/// Explicit discriminant of a context type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kind(Cow<'static, str>);

impl Kind {
    /// Creates a kind from a static string; usable in `const` items.
    pub const fn from_static(tag: &'static str) -> Self {
        Kind(Cow::Borrowed(tag))
    }

    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Kind(tag.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value that handlers can be bound to.
///
/// Implementors are shared through `Arc` and report the kind used for
/// targeted delivery.
pub trait Receiver: Send + Sync + 'static {
    /// Returns the delivery kind of this receiver.
    fn kind(&self) -> Kind;
}

/// Delivery filter of a publish.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    /// Every subscription of the event, regardless of context.
    #[default]
    All,
    /// Only subscriptions whose context has this kind.
    Kind(Kind),
}

impl Target {
    /// Targets every receiver sharing the kind of `receiver`.
    pub fn of<R: Receiver + ?Sized>(receiver: &R) -> Self {
        Target::Kind(receiver.kind())
    }

    /// Whether a subscription with context kind `kind` passes this filter.
    ///
    /// Detached subscriptions (`None`) only pass [`Target::All`].
    #[inline]
    pub fn admits(&self, kind: Option<&Kind>) -> bool {
        match self {
            Target::All => true,
            Target::Kind(want) => kind == Some(want),
        }
    }

    /// Returns the kind filter, if any.
    pub fn kind(&self) -> Option<&Kind> {
        match self {
            Target::All => None,
            Target::Kind(k) => Some(k),
        }
    }
}

impl From<Kind> for Target {
    fn from(kind: Kind) -> Self {
        Target::Kind(kind)
    }
}

impl<R: Receiver> From<&R> for Target {
    fn from(receiver: &R) -> Self {
        Target::of(receiver)
    }
}

impl<R: Receiver> From<Option<&R>> for Target {
    fn from(receiver: Option<&R>) -> Self {
        receiver.map_or(Target::All, Target::of)
    }
}

/// Non-owning handle to a subscription's context.
#[derive(Clone)]
pub(crate) struct ContextRef {
    kind: Kind,
    addr: usize,
    weak: Weak<dyn Any + Send + Sync>,
}

impl ContextRef {
    pub(crate) fn new<C: Receiver>(ctx: &Arc<C>) -> Self {
        let weak: Weak<C> = Arc::downgrade(ctx);
        let weak: Weak<dyn Any + Send + Sync> = weak;
        Self {
            kind: ctx.kind(),
            addr: address_of(ctx),
            weak,
        }
    }

    #[inline]
    pub(crate) fn kind(&self) -> &Kind {
        &self.kind
    }

    #[inline]
    pub(crate) fn is_alive(&self) -> bool {
        self.weak.strong_count() > 0
    }

    /// Identity check; a dropped context matches nothing.
    #[inline]
    pub(crate) fn is(&self, addr: usize) -> bool {
        self.addr == addr && self.is_alive()
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        self.addr
    }
}

impl fmt::Debug for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextRef")
            .field("kind", &self.kind)
            .field("addr", &format_args!("{:#x}", self.addr))
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Address of the shared allocation behind `ctx`.
#[inline]
pub(crate) fn address_of<C>(ctx: &Arc<C>) -> usize {
    Arc::as_ptr(ctx) as *const () as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;
    impl Receiver for Foo {
        fn kind(&self) -> Kind {
            Kind::from_static("foo")
        }
    }

    #[test]
    fn kind_filter_requires_equal_tag() {
        let t = Target::of(&Foo);
        assert!(t.admits(Some(&Kind::new("foo"))));
        assert!(!t.admits(Some(&Kind::new("bar"))));
        assert!(!t.admits(None));
    }

    #[test]
    fn absent_receiver_broadcasts() {
        let t: Target = Option::<&Foo>::None.into();
        assert_eq!(t, Target::All);
        assert!(t.kind().is_none());
    }

    #[test]
    fn dropped_context_loses_identity() {
        let ctx = Arc::new(Foo);
        let r = ContextRef::new(&ctx);
        let addr = address_of(&ctx);
        assert!(r.is(addr));
        drop(ctx);
        assert!(!r.is_alive());
        assert!(!r.is(addr));
    }
}
