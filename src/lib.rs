//! # vidbus
//!
//! **vidbus** is a small publish/subscribe bus used to keep several video
//! player instances on one page in sync (shared mute state, one player at a time).
//!
//! Handlers subscribe to an event name together with a context (the receiver
//! they are bound to). Publishing an event invokes every matching handler
//! synchronously, in subscription order, optionally restricted to contexts of
//! one explicit [`Kind`].
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Player A   │   │   Player B   │   │   Other UI   │
//!     │ kind=video   │   │ kind=video   │   │ kind=panel   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ subscribe(event, handler, ctx)      │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventBus                                                         │
//! │  - Registry (ordered, de-duplicated (event, handler, ctx) triples)│
//! │  - weak contexts, explicit Kind tags                              │
//! │  - ObserverSet (optional async observers)                         │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ publish(event, target, args)
//!        ▼
//!   snapshot of matches ──► handler(&ctx, args) in subscription order
//!        │
//!        └──► DispatchEvent ──► ObserverSet ──► observer workers
//! ```
//!
//! ### Matching
//! ```text
//! matches(sub) = sub.event == event
//!             && (target == All || target == Kind(sub.context.kind))
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                     |
//! |-------------------|--------------------------------------------------------------|----------------------------------------|
//! | **Bus**           | Subscribe, publish, unsubscribe, prune.                      | [`EventBus`], [`Config`]               |
//! | **Handlers**      | Identity-compared callbacks, bound or detached.              | [`Handler`], [`DetachedHandler`]       |
//! | **Delivery**      | Explicit kind tags for targeted publishes.                   | [`Receiver`], [`Kind`], [`Target`]     |
//! | **Arguments**     | Dynamically typed positional arguments.                      | [`Value`], [`ArgsExt`], [`args!`]      |
//! | **Errors**        | Typed handler and bus errors.                                | [`HandlerError`], [`BusError`]         |
//! | **Observers**     | Async hooks on bus activity (logging, metrics).              | [`Observe`], [`DispatchEvent`]         |
//! | **Player**        | Headless player state kept in sync through the bus.          | [`Player`]                             |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] observer backed by `tracing` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use vidbus::{EventBus, Player};
//!
//! let bus = EventBus::new();
//! let a = Player::attach(&bus);
//! let b = Player::attach(&bus);
//!
//! a.toggle_mute().unwrap();
//! assert!(b.is_muted());
//!
//! b.play().unwrap();
//! a.play().unwrap();
//! assert!(b.is_paused());
//! ```
mod core;
mod error;
mod events;
mod observers;
mod player;
mod subscription;

// ---- Public re-exports ----

pub use core::{Config, EventBus, EventBusBuilder};
pub use error::{BusError, HandlerError};
pub use events::{ArgsExt, DispatchEvent, DispatchKind, Value};
pub use observers::{Observe, ObserverSet};
pub use player::{Player, PAUSE_CHANGED, PLAYER_KIND, VOLUME_CHANGED};
pub use subscription::{DetachedHandler, Handler, HandlerResult, Kind, Receiver, Target};

// Optional: expose a simple built-in logger observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
