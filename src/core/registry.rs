//! # Subscription registry - ordered, de-duplicated store.
//!
//! ## Rules
//! - Insertion order is preserved; it is the dispatch order.
//! - A (event, handler, context) triple appears at most once.
//! - Records of dropped contexts are inert: they never match a duplicate check
//!   and are skipped on dispatch until pruned.
//! - The registry is not synchronized; [`EventBus`](crate::EventBus) wraps it
//!   in a lock and hands out snapshots for dispatch.

use std::sync::Arc;

use crate::subscription::{Subscription, Target};

/// Ordered subscription store.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: Vec<Arc<Subscription>>,
}

impl Registry {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends `sub` unless an identical triple is already stored.
    ///
    /// Returns `true` when the record was added.
    pub(crate) fn insert(&mut self, sub: Subscription) -> bool {
        if self.entries.iter().any(|s| s.same_as(&sub)) {
            return false;
        }
        self.entries.push(Arc::new(sub));
        true
    }

    /// Removes records for which `pred` holds; returns how many were removed.
    pub(crate) fn remove_where(&mut self, mut pred: impl FnMut(&Subscription) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|s| !pred(&**s));
        before - self.entries.len()
    }

    /// Removes records whose context has been dropped.
    pub(crate) fn prune(&mut self) -> usize {
        self.remove_where(|s| !s.is_alive())
    }

    /// Snapshot of matching records, in insertion order.
    pub(crate) fn matching(&self, event: &str, target: &Target) -> Vec<Arc<Subscription>> {
        self.entries
            .iter()
            .filter(|s| s.matches(event, target))
            .cloned()
            .collect()
    }

    /// Number of live records for `event`.
    pub(crate) fn count_for(&self, event: &str) -> usize {
        self.entries
            .iter()
            .filter(|s| s.event() == event && s.is_alive())
            .count()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
