use std::sync::{Arc, RwLock};

use super::{bus::EventBus, registry::Registry};
use crate::{
    core::Config,
    observers::{Observe, ObserverSet},
};

/// Builder for constructing an [`EventBus`] with optional observers.
pub struct EventBusBuilder {
    cfg: Config,
    observers: Vec<Arc<dyn Observe>>,
}

impl EventBusBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            observers: Vec::new(),
        }
    }

    /// Sets observers of bus activity.
    ///
    /// Observers receive a [`DispatchEvent`](crate::DispatchEvent) for every
    /// operation, through dedicated workers with bounded queues.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Builds the bus and returns a shared handle to it.
    ///
    /// # Panics
    /// Spawning observer workers needs a tokio runtime; building with
    /// observers outside of one panics.
    pub fn build(self) -> Arc<EventBus> {
        let registry = RwLock::new(Registry::with_capacity(self.cfg.initial_capacity));
        let observers = ObserverSet::new(self.observers);
        Arc::new(EventBus::new_internal(self.cfg, registry, observers))
    }
}
