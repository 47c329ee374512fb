//! # Subscription building blocks.
//!
//! ## Contents
//! - [`Handler`], [`DetachedHandler`] shared callbacks, compared by identity
//! - [`Receiver`], [`Kind`] contexts and their explicit delivery tag
//! - [`Target`] delivery filter used by `publish`
//! - `Subscription` (crate-internal) the stored (event, handler, context) record

mod context;
mod handler;
mod record;

pub(crate) use context::address_of;
pub use context::{Kind, Receiver, Target};
pub use handler::{DetachedHandler, Handler, HandlerResult};
pub(crate) use record::Subscription;
