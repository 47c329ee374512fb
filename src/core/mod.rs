//! Bus core: registry, dispatch and construction.
//!
//! The public API from this module is [`EventBus`] (with its builder) and
//! [`Config`].
//!
//! Internal modules:
//! - [`bus`]: subscribe/publish/unsubscribe over a locked registry, snapshot dispatch;
//! - [`registry`]: ordered, de-duplicated subscription store;
//! - [`builder`]: wires configuration, registry and observers together;
//! - [`config`]: bus settings.

mod builder;
mod bus;
mod config;
mod registry;

pub use builder::EventBusBuilder;
pub use bus::EventBus;
pub use config::Config;
