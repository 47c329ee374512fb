//! # Event bus: subscription registry plus synchronous dispatch.
//!
//! [`EventBus`] maps event names to an ordered list of subscriptions and invokes
//! the matching handlers in-line when an event is published.
//!
//! ## Architecture
//! ```text
//! subscribe(event, handler, ctx) ──► Registry (ordered, de-duplicated)
//!                                         │
//! publish(event, target, args)            │ read lock: copy matching records
//!     │                                   ▼
//!     └──────────────────────────► snapshot ──► handler(ctx, args) #1
//!                                           ──► handler(ctx, args) #2
//!                                           ──► ...
//! ```
//!
//! ## Rules
//! - **Idempotent subscribe**: an identical (event, handler, context) triple is stored once.
//! - **Matching**: equal event name, and the target is `All` or equals the context kind.
//! - **Order**: handlers run in subscription order, synchronously, on the caller's thread.
//! - **Snapshot dispatch**: the lock is released before handlers run; handlers may
//!   subscribe, unsubscribe or publish reentrantly, and such changes only affect
//!   later publishes.
//! - **Failure**: the first handler error aborts the fan-out and is returned;
//!   panics propagate unchanged.
//! - **Weak contexts**: the bus never keeps a context alive; dropped contexts are skipped.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{builder::EventBusBuilder, registry::Registry};
use crate::core::Config;
use crate::error::BusError;
use crate::events::{DispatchEvent, DispatchKind, Value};
use crate::observers::ObserverSet;
use crate::subscription::{
    address_of, DetachedHandler, Handler, Kind, Receiver, Subscription, Target,
};

/// Registry of (event, handler, context) subscriptions.
///
/// Create one per page/process and share the returned `Arc` with every
/// consumer; there is no global instance.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use vidbus::{args, ArgsExt, EventBus, Handler, Kind, Receiver, Value};
///
/// struct Player { id: u32 }
/// impl Receiver for Player {
///     fn kind(&self) -> Kind { Kind::from_static("custom-video") }
/// }
///
/// let bus = EventBus::new();
/// let on_volume = Handler::new(|p: &Player, args: &[Value]| {
///     let _volume = args.float(0)?;
///     println!("player {} got volume", p.id);
///     Ok(())
/// });
///
/// let (a, b) = (Arc::new(Player { id: 1 }), Arc::new(Player { id: 2 }));
/// assert!(bus.subscribe("vol", &on_volume, &a));
/// assert!(bus.subscribe("vol", &on_volume, &b));
/// assert!(!bus.subscribe("vol", &on_volume, &a)); // duplicate
///
/// let invoked = bus.publish("vol", &*a, &args![0.5]).unwrap();
/// assert_eq!(invoked, 2);
/// ```
pub struct EventBus {
    cfg: Config,
    registry: RwLock<Registry>,
    observers: ObserverSet,
}

impl EventBus {
    /// Creates a bus with default configuration and no observers.
    pub fn new() -> Arc<Self> {
        Self::builder(Config::default()).build()
    }

    /// Returns a builder for configuring observers.
    pub fn builder(cfg: Config) -> EventBusBuilder {
        EventBusBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        registry: RwLock<Registry>,
        observers: ObserverSet,
    ) -> Self {
        Self {
            cfg,
            registry,
            observers,
        }
    }

    /// Subscribes `handler` to `event` with `ctx` bound as receiver.
    ///
    /// Returns `true` when a new subscription was stored and `false` when the
    /// identical triple was already present. Only a weak reference to `ctx` is
    /// kept; call [`unsubscribe_context`](Self::unsubscribe_context) before
    /// dropping a context to release its records early.
    pub fn subscribe<C: Receiver>(&self, event: &str, handler: &Handler<C>, ctx: &Arc<C>) -> bool {
        let sub = Subscription::bound(event, handler, ctx);
        let kind = sub.kind().cloned();
        self.insert(sub, event, kind)
    }

    /// Subscribes `handler` to `event` without a context.
    ///
    /// Detached subscriptions only receive untargeted publishes ([`Target::All`]).
    pub fn subscribe_detached(&self, event: &str, handler: &DetachedHandler) -> bool {
        self.insert(Subscription::detached(event, handler), event, None)
    }

    fn insert(&self, sub: Subscription, event: &str, kind: Option<Kind>) -> bool {
        let (added, pruned) = {
            let mut reg = self.write();
            let pruned = if self.cfg.prune_dead { reg.prune() } else { 0 };
            (reg.insert(sub), pruned)
        };
        self.report_pruned(pruned);

        if added {
            tracing::debug!(event, kind = ?kind, "subscribed");
        } else {
            tracing::trace!(event, kind = ?kind, "duplicate subscription ignored");
        }
        self.notify(|| {
            let k = if added {
                DispatchKind::Subscribed
            } else {
                DispatchKind::DuplicateIgnored
            };
            DispatchEvent::new(k).with_event(event).with_target(kind)
        });
        added
    }

    /// Publishes `event`, invoking every matching handler in subscription order.
    ///
    /// `target` selects receivers: [`Target::All`] (or `None`) reaches every
    /// subscription of `event`; a receiver or [`Kind`] restricts delivery to
    /// contexts of that kind. `args` are forwarded verbatim.
    ///
    /// Returns the number of handlers invoked.
    ///
    /// # Errors
    /// [`BusError::Handler`] when a handler fails; handlers after it are not invoked.
    pub fn publish(
        &self,
        event: &str,
        target: impl Into<Target>,
        args: &[Value],
    ) -> Result<usize, BusError> {
        let target = target.into();
        let snapshot = self.read().matching(event, &target);

        let mut invoked = 0;
        let mut dead = 0;
        let mut failure = None;
        for sub in snapshot.iter() {
            match sub.invoke(args) {
                None => dead += 1,
                Some(Ok(())) => invoked += 1,
                Some(Err(source)) => {
                    // dead records are not part of the fan-out
                    failure = Some(BusError::Handler {
                        event: event.to_string(),
                        position: invoked,
                        source,
                    });
                    break;
                }
            }
        }
        drop(snapshot);

        if dead > 0 && self.cfg.prune_dead {
            self.prune();
        }

        match failure {
            Some(err) => {
                tracing::debug!(event, target = ?target.kind(), error = %err, "publish aborted");
                self.notify(|| {
                    let BusError::Handler { position, source, .. } = &err;
                    DispatchEvent::new(DispatchKind::HandlerFailed)
                        .with_event(event)
                        .with_target(target.kind().cloned())
                        .with_count(*position)
                        .with_reason(source.to_string())
                });
                Err(err)
            }
            None => {
                tracing::trace!(event, target = ?target.kind(), invoked, "published");
                self.notify(|| {
                    DispatchEvent::new(DispatchKind::Published)
                        .with_event(event)
                        .with_target(target.kind().cloned())
                        .with_count(invoked)
                });
                Ok(invoked)
            }
        }
    }

    /// Removes the exact (event, handler, ctx) subscription.
    ///
    /// Returns whether a subscription was removed.
    pub fn unsubscribe<C: Receiver>(
        &self,
        event: &str,
        handler: &Handler<C>,
        ctx: &Arc<C>,
    ) -> bool {
        let (id, addr) = (handler.id(), address_of(ctx));
        let removed = self.write().remove_where(|s| s.is(event, id, Some(addr)));
        self.report_removed(Some(event), removed);
        removed > 0
    }

    /// Removes a detached subscription.
    pub fn unsubscribe_detached(&self, event: &str, handler: &DetachedHandler) -> bool {
        let id = handler.id();
        let removed = self.write().remove_where(|s| s.is(event, id, None));
        self.report_removed(Some(event), removed);
        removed > 0
    }

    /// Removes every subscription bound to `ctx`.
    ///
    /// Call this before the last strong reference to a context is dropped.
    /// Returns the number of removed subscriptions.
    pub fn unsubscribe_context<C: Receiver>(&self, ctx: &Arc<C>) -> usize {
        let addr = address_of(ctx);
        let removed = self.write().remove_where(|s| s.bound_to(addr));
        self.report_removed(None, removed);
        removed
    }

    /// Removes subscriptions whose context has been dropped.
    pub fn prune(&self) -> usize {
        let pruned = self.write().prune();
        self.report_pruned(pruned);
        pruned
    }

    /// Total number of stored subscriptions (including not yet pruned dead ones).
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live subscriptions for `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.read().count_for(event)
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Drains observer queues and stops their workers.
    ///
    /// The bus keeps dispatching afterwards; only observation stops.
    pub async fn shutdown(&self) {
        self.observers.shutdown().await;
    }

    fn report_removed(&self, event: Option<&str>, removed: usize) {
        if removed == 0 {
            return;
        }
        tracing::debug!(event = event.unwrap_or("*"), removed, "unsubscribed");
        self.notify(|| {
            let ev = DispatchEvent::new(DispatchKind::Unsubscribed).with_count(removed);
            match event {
                Some(name) => ev.with_event(name),
                None => ev,
            }
        });
    }

    fn report_pruned(&self, pruned: usize) {
        if pruned == 0 {
            return;
        }
        tracing::debug!(pruned, "pruned subscriptions of dropped contexts");
        self.notify(|| DispatchEvent::new(DispatchKind::Pruned).with_count(pruned));
    }

    #[inline]
    fn notify(&self, make: impl FnOnce() -> DispatchEvent) {
        if !self.observers.is_empty() {
            self.observers.emit(make());
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("cfg", &self.cfg)
            .field("subscriptions", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::events::ArgsExt;
    use crate::observers::Observe;
    use crate::args;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Foo {
        id: u32,
    }
    impl Receiver for Foo {
        fn kind(&self) -> Kind {
            Kind::from_static("foo")
        }
    }

    struct Bar;
    impl Receiver for Bar {
        fn kind(&self) -> Kind {
            Kind::from_static("bar")
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    /// Handler recording "<tag>:<receiver id>:<args>".
    fn recorder(tag: &'static str, log: &Log) -> Handler<Foo> {
        let log = Arc::clone(log);
        Handler::new(move |ctx: &Foo, args: &[Value]| {
            let args: Vec<String> = args.iter().map(Value::to_string).collect();
            log.lock()
                .unwrap()
                .push(format!("{tag}:{}:{}", ctx.id, args.join(",")));
            Ok(())
        })
    }

    #[test]
    fn subscribe_is_idempotent() {
        let bus = EventBus::new();
        let calls = log();
        let h = recorder("h", &calls);
        let ctx = Arc::new(Foo { id: 1 });

        assert!(bus.subscribe("e", &h, &ctx));
        assert!(!bus.subscribe("e", &h, &ctx));
        assert!(!bus.subscribe("e", &h.clone(), &ctx));
        assert_eq!(bus.len(), 1);

        assert_eq!(bus.publish("e", Target::All, &[]).unwrap(), 1);
        assert_eq!(entries(&calls), vec!["h:1:"]);
    }

    #[test]
    fn fan_out_by_name_forwards_arguments() {
        let bus = EventBus::new();
        let calls = log();
        let h = recorder("h", &calls);
        let (a, b) = (Arc::new(Foo { id: 1 }), Arc::new(Foo { id: 2 }));
        bus.subscribe("e", &h, &a);
        bus.subscribe("e", &h, &b);

        bus.publish("e", Target::All, &args![1, "a"]).unwrap();
        assert_eq!(entries(&calls), vec!["h:1:1,\"a\"", "h:2:1,\"a\""]);
    }

    #[test]
    fn kind_target_filters_other_kinds() {
        let bus = EventBus::new();
        let calls = log();
        let foo = Arc::new(Foo { id: 7 });
        let bar = Arc::new(Bar);
        let bar_calls = Arc::clone(&calls);
        let on_bar = Handler::new(move |_: &Bar, _: &[Value]| {
            bar_calls.lock().unwrap().push("bar".into());
            Ok(())
        });
        bus.subscribe("e", &recorder("foo", &calls), &foo);
        bus.subscribe("e", &on_bar, &bar);

        assert_eq!(bus.publish("e", &*foo, &[]).unwrap(), 1);
        assert_eq!(entries(&calls), vec!["foo:7:"]);

        assert_eq!(bus.publish("e", Kind::new("bar"), &[]).unwrap(), 1);
        assert_eq!(bus.publish("e", Kind::new("baz"), &[]).unwrap(), 0);
        assert_eq!(entries(&calls), vec!["foo:7:", "bar"]);
    }

    #[test]
    fn untargeted_publish_reaches_every_kind() {
        let bus = EventBus::new();
        let calls = log();
        let on_bar = Handler::new(|_: &Bar, _: &[Value]| Ok(()));
        let detached = DetachedHandler::new(|_| Ok(()));
        bus.subscribe("e", &recorder("foo", &calls), &Arc::new(Foo { id: 1 }));
        let bar = Arc::new(Bar);
        bus.subscribe("e", &on_bar, &bar);
        bus.subscribe_detached("e", &detached);

        let foo = Arc::new(Foo { id: 2 });
        bus.subscribe("e", &recorder("foo2", &calls), &foo);

        // the first Foo was a temporary and is gone
        assert_eq!(bus.publish("e", None::<&Foo>, &[]).unwrap(), 3);
        assert_eq!(bus.publish("e", &*foo, &[]).unwrap(), 1);
    }

    #[test]
    fn dispatch_follows_subscription_order() {
        let bus = EventBus::new();
        let calls = log();
        let ctx = Arc::new(Foo { id: 1 });
        for tag in ["first", "second", "third"] {
            bus.subscribe("e", &recorder(tag, &calls), &ctx);
        }
        bus.publish("e", Target::All, &[]).unwrap();
        assert_eq!(entries(&calls), vec!["first:1:", "second:1:", "third:1:"]);
    }

    #[test]
    fn unmatched_event_invokes_nothing() {
        let bus = EventBus::new();
        let calls = log();
        bus.subscribe("e", &recorder("h", &calls), &Arc::new(Foo { id: 1 }));
        assert_eq!(bus.publish("unregistered", Target::All, &[]).unwrap(), 0);
        assert!(entries(&calls).is_empty());
    }

    #[test]
    fn same_kind_instances_all_receive_targeted_publish() {
        let bus = EventBus::new();
        let calls = log();
        let (p1, p2) = (Arc::new(Foo { id: 1 }), Arc::new(Foo { id: 2 }));
        bus.subscribe("vol", &recorder("h1", &calls), &p1);
        bus.subscribe("vol", &recorder("h2", &calls), &p2);

        assert_eq!(bus.publish("vol", &*p1, &args![0.5]).unwrap(), 2);
        assert_eq!(entries(&calls), vec!["h1:1:0.5", "h2:2:0.5"]);
    }

    #[test]
    fn dropped_context_is_skipped_and_pruned() {
        let bus = EventBus::builder(Config {
            prune_dead: false,
            ..Config::default()
        })
        .build();
        let calls = log();
        let ctx = Arc::new(Foo { id: 1 });
        bus.subscribe("e", &recorder("h", &calls), &ctx);
        drop(ctx);

        assert_eq!(bus.subscriber_count("e"), 0);
        assert_eq!(bus.publish("e", Target::All, &[]).unwrap(), 0);
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.prune(), 1);
        assert!(bus.is_empty());
        assert!(entries(&calls).is_empty());
    }

    #[test]
    fn eager_pruning_drops_dead_records_on_publish() {
        let bus = EventBus::new();
        let h = recorder("h", &log());
        let ctx = Arc::new(Foo { id: 1 });
        bus.subscribe("e", &h, &ctx);
        drop(ctx);
        bus.publish("e", Target::All, &[]).unwrap();
        assert!(bus.is_empty());
    }

    #[test]
    fn unsubscribe_removes_exact_triple() {
        let bus = EventBus::new();
        let calls = log();
        let (h1, h2) = (recorder("h1", &calls), recorder("h2", &calls));
        let ctx = Arc::new(Foo { id: 1 });
        bus.subscribe("e", &h1, &ctx);
        bus.subscribe("e", &h2, &ctx);
        bus.subscribe("other", &h1, &ctx);

        assert!(bus.unsubscribe("e", &h1, &ctx));
        assert!(!bus.unsubscribe("e", &h1, &ctx));
        assert_eq!(bus.len(), 2);

        bus.publish("e", Target::All, &[]).unwrap();
        assert_eq!(entries(&calls), vec!["h2:1:"]);

        assert_eq!(bus.unsubscribe_context(&ctx), 2);
        assert!(bus.is_empty());
    }

    #[test]
    fn unsubscribe_detached_handler() {
        let bus = EventBus::new();
        let d = DetachedHandler::new(|_| Ok(()));
        bus.subscribe_detached("e", &d);
        assert!(bus.unsubscribe_detached("e", &d));
        assert!(!bus.unsubscribe_detached("e", &d));
    }

    #[test]
    fn failing_handler_aborts_fan_out() {
        let bus = EventBus::new();
        let calls = log();
        let ctx = Arc::new(Foo { id: 1 });
        let boom = Handler::new(|_: &Foo, args: &[Value]| {
            args.float(0)?;
            Ok(())
        });
        bus.subscribe("e", &recorder("before", &calls), &ctx);
        bus.subscribe("e", &boom, &ctx);
        bus.subscribe("e", &recorder("after", &calls), &ctx);

        let err = bus.publish("e", Target::All, &args!["x"]).unwrap_err();
        assert_eq!(
            err,
            BusError::Handler {
                event: "e".into(),
                position: 1,
                source: HandlerError::BadArgument {
                    index: 0,
                    expected: "float"
                },
            }
        );
        assert_eq!(entries(&calls), vec!["before:1:\"x\""]);
    }

    #[test]
    fn failure_position_ignores_dropped_contexts() {
        let bus = EventBus::new();
        let calls = log();
        let gone = Arc::new(Foo { id: 1 });
        let live = Arc::new(Foo { id: 2 });
        let boom = Handler::new(|_: &Foo, _: &[Value]| Err(HandlerError::failed("boom")));
        bus.subscribe("e", &recorder("gone", &calls), &gone);
        bus.subscribe("e", &boom, &live);
        drop(gone);

        let err = bus.publish("e", Target::All, &[]).unwrap_err();
        assert!(matches!(err, BusError::Handler { position: 0, .. }));
        assert!(entries(&calls).is_empty());
    }

    #[test]
    #[should_panic(expected = "handler panic")]
    fn handler_panic_propagates_to_publisher() {
        let bus = EventBus::new();
        let ctx = Arc::new(Foo { id: 1 });
        let h = Handler::new(|_: &Foo, _: &[Value]| panic!("handler panic"));
        bus.subscribe("e", &h, &ctx);
        let _ = bus.publish("e", Target::All, &[]);
    }

    #[test]
    fn reentrant_subscribe_applies_to_later_publishes() {
        let bus = EventBus::new();
        let calls = log();
        let ctx = Arc::new(Foo { id: 1 });
        let late = recorder("late", &calls);

        let bus_in = Arc::downgrade(&bus);
        let ctx_in = Arc::downgrade(&ctx);
        let late_in = late.clone();
        let adder = Handler::new(move |_: &Foo, _: &[Value]| {
            if let (Some(bus), Some(ctx)) = (bus_in.upgrade(), ctx_in.upgrade()) {
                bus.subscribe("e", &late_in, &ctx);
            }
            Ok(())
        });
        bus.subscribe("e", &adder, &ctx);

        assert_eq!(bus.publish("e", Target::All, &[]).unwrap(), 1);
        assert!(entries(&calls).is_empty());
        assert_eq!(bus.publish("e", Target::All, &[]).unwrap(), 2);
        assert_eq!(entries(&calls), vec!["late:1:"]);
    }

    #[test]
    fn reentrant_unsubscribe_applies_to_later_publishes() {
        let bus = EventBus::new();
        let calls = log();
        let (first, second) = (Arc::new(Foo { id: 1 }), Arc::new(Foo { id: 2 }));

        let bus_in = Arc::downgrade(&bus);
        let second_in = Arc::downgrade(&second);
        let remover = Handler::new(move |_: &Foo, _: &[Value]| {
            if let (Some(bus), Some(ctx)) = (bus_in.upgrade(), second_in.upgrade()) {
                bus.unsubscribe_context(&ctx);
            }
            Ok(())
        });
        bus.subscribe("e", &remover, &first);
        bus.subscribe("e", &recorder("h", &calls), &second);

        assert_eq!(bus.publish("e", Target::All, &[]).unwrap(), 2);
        assert_eq!(entries(&calls), vec!["h:2:"]);

        assert_eq!(bus.publish("e", Target::All, &[]).unwrap(), 1);
        assert_eq!(entries(&calls), vec!["h:2:"]);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn reentrant_publish_runs_nested_dispatch() {
        let bus = EventBus::new();
        let calls = log();
        let ctx = Arc::new(Foo { id: 1 });
        let bus_in = Arc::downgrade(&bus);
        let relay = Handler::new(move |_: &Foo, args: &[Value]| {
            if let Some(bus) = bus_in.upgrade() {
                bus.publish("inner", Target::All, args)
                    .map_err(|e| HandlerError::failed(e.as_message()))?;
            }
            Ok(())
        });
        bus.subscribe("outer", &relay, &ctx);
        bus.subscribe("inner", &recorder("inner", &calls), &ctx);

        bus.publish("outer", Target::All, &args![true]).unwrap();
        assert_eq!(entries(&calls), vec!["inner:1:true"]);
    }

    #[test]
    fn empty_event_name_is_accepted() {
        let bus = EventBus::new();
        let calls = log();
        bus.subscribe("", &recorder("h", &calls), &Arc::new(Foo { id: 3 }));
        assert_eq!(bus.len(), 1);
    }

    struct Collect(Arc<Mutex<Vec<DispatchEvent>>>);

    #[async_trait]
    impl Observe for Collect {
        async fn on_event(&self, ev: &DispatchEvent) {
            self.0.lock().unwrap().push(ev.clone());
        }
    }

    fn kinds(seen: &Mutex<Vec<DispatchEvent>>) -> Vec<(DispatchKind, Option<usize>)> {
        seen.lock()
            .unwrap()
            .iter()
            .map(|ev| (ev.kind, ev.count))
            .collect()
    }

    #[tokio::test]
    async fn observers_see_bus_activity() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let bus = EventBus::builder(Config::default())
            .with_observers(vec![Arc::new(Collect(Arc::clone(&seen)))])
            .build();
        let calls = log();
        let h = recorder("h", &calls);
        let ctx = Arc::new(Foo { id: 1 });

        bus.subscribe("e", &h, &ctx);
        bus.subscribe("e", &h, &ctx);
        bus.publish("e", &*ctx, &[]).unwrap();
        bus.unsubscribe_context(&ctx);
        bus.shutdown().await;

        assert_eq!(
            kinds(&seen),
            vec![
                (DispatchKind::Subscribed, None),
                (DispatchKind::DuplicateIgnored, None),
                (DispatchKind::Published, Some(1)),
                (DispatchKind::Unsubscribed, Some(1)),
            ]
        );
    }

    #[tokio::test]
    async fn observers_see_failures_and_pruning() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let bus = EventBus::builder(Config::default())
            .with_observers(vec![Arc::new(Collect(Arc::clone(&seen)))])
            .build();
        let calls = log();
        let gone = Arc::new(Foo { id: 1 });
        let live = Arc::new(Foo { id: 2 });
        let strict = Handler::new(|_: &Foo, args: &[Value]| {
            args.float(0)?;
            Ok(())
        });
        bus.subscribe("e", &recorder("gone", &calls), &gone);
        bus.subscribe("e", &strict, &live);
        drop(gone);

        assert!(bus.publish("e", &*live, &args!["x"]).is_err());
        bus.shutdown().await;

        assert_eq!(
            kinds(&seen),
            vec![
                (DispatchKind::Subscribed, None),
                (DispatchKind::Subscribed, None),
                (DispatchKind::Pruned, Some(1)),
                (DispatchKind::HandlerFailed, Some(0)),
            ]
        );
        let seen = seen.lock().unwrap();
        let failed = &seen[3];
        assert_eq!(failed.event.as_deref(), Some("e"));
        assert_eq!(failed.target, Some(Kind::from_static("foo")));
        assert_eq!(
            failed.reason.as_deref(),
            Some("bad argument #0: expected float")
        );
        assert!(entries(&calls).is_empty());
    }
}
