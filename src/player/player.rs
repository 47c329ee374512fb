//! # Headless video player state synchronized through the bus.
//!
//! Every [`Player`] subscribes to two events:
//! - [`VOLUME_CHANGED`]: `[volume: float]`, the new volume every player adopts;
//! - [`PAUSE_CHANGED`]: `[id: text]`, the player that started playing; all others pause.
//!
//! Both are published targeted at [`PLAYER_KIND`], so only players receive them.
//!
//! ## Flow
//! ```text
//! player A: toggle_mute()
//!     ├─► A.volume = 0.0
//!     └─► publish(VOLUME_CHANGED, kind=custom-video, [0.0])
//!              ├─► A.on_volume_changed(0.0)
//!              └─► B.on_volume_changed(0.0)   → B muted too
//!
//! player A: play()
//!     └─► publish(PAUSE_CHANGED, kind=custom-video, ["vdx_1"])
//!              ├─► A: same id, keeps playing
//!              └─► B: pauses
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use crate::core::EventBus;
use crate::error::{BusError, HandlerError};
use crate::events::{ArgsExt, Value};
use crate::subscription::{Handler, Kind, Receiver};

/// Volume changed on one player; payload: new volume (`0.0..=1.0`).
pub const VOLUME_CHANGED: &str = "custom_video_volume_changed";

/// A player started playing; payload: its id.
pub const PAUSE_CHANGED: &str = "custom_video_pause_changed";

/// Delivery kind shared by all players.
pub const PLAYER_KIND: Kind = Kind::from_static("custom-video");

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

// Shared across instances, so attaching the same player twice is a no-op.
static ON_VOLUME: LazyLock<Handler<Player>> =
    LazyLock::new(|| Handler::new(Player::on_volume_changed));
static ON_PAUSE: LazyLock<Handler<Player>> =
    LazyLock::new(|| Handler::new(Player::on_pause_changed));

#[derive(Debug)]
struct State {
    volume: f64,
    paused: bool,
}

/// Player instance: volume and play state, kept in sync with sibling players.
#[derive(Debug)]
pub struct Player {
    id: String,
    bus: Arc<EventBus>,
    state: Mutex<State>,
}

impl Player {
    /// Creates a paused, unmuted player with a generated id (`vdx_<n>`) and
    /// subscribes it to the bus.
    pub fn attach(bus: &Arc<EventBus>) -> Arc<Self> {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self::attach_with_id(bus, format!("vdx_{n}"))
    }

    /// Like [`attach`](Self::attach), with an explicit id.
    pub fn attach_with_id(bus: &Arc<EventBus>, id: impl Into<String>) -> Arc<Self> {
        let player = Arc::new(Self {
            id: id.into(),
            bus: Arc::clone(bus),
            state: Mutex::new(State {
                volume: 1.0,
                paused: true,
            }),
        });
        player.subscribe();
        player
    }

    /// (Re)subscribes this player's handlers; idempotent.
    pub fn subscribe(self: &Arc<Self>) {
        self.bus.subscribe(VOLUME_CHANGED, &*ON_VOLUME, self);
        self.bus.subscribe(PAUSE_CHANGED, &*ON_PAUSE, self);
    }

    /// Removes this player's subscriptions; returns how many were removed.
    pub fn detach(self: &Arc<Self>) -> usize {
        self.bus.unsubscribe_context(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn volume(&self) -> f64 {
        self.state().volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume() == 0.0
    }

    pub fn is_paused(&self) -> bool {
        self.state().paused
    }

    /// Flips between muted and full volume and broadcasts the new volume to
    /// every player.
    ///
    /// Returns the number of players that applied the change.
    pub fn toggle_mute(&self) -> Result<usize, BusError> {
        let volume = {
            let mut st = self.state();
            st.volume = if st.volume > 0.0 { 0.0 } else { 1.0 };
            st.volume
        };
        self.bus.publish(VOLUME_CHANGED, self, &[Value::Float(volume)])
    }

    /// Starts playback and pauses every other player.
    pub fn play(&self) -> Result<usize, BusError> {
        self.state().paused = false;
        self.bus
            .publish(PAUSE_CHANGED, self, &[Value::from(self.id.as_str())])
    }

    /// Pauses playback locally; siblings are not notified.
    pub fn pause(&self) {
        self.state().paused = true;
    }

    /// Toggles between play and pause, like the player's play button.
    pub fn toggle_play(&self) -> Result<usize, BusError> {
        if self.is_paused() {
            self.play()
        } else {
            self.pause();
            Ok(0)
        }
    }

    fn on_volume_changed(&self, args: &[Value]) -> Result<(), HandlerError> {
        let volume = args.float(0)?;
        if !volume.is_finite() {
            return Err(HandlerError::failed(format!("invalid volume {volume}")));
        }
        self.state().volume = volume.clamp(0.0, 1.0);
        Ok(())
    }

    fn on_pause_changed(&self, args: &[Value]) -> Result<(), HandlerError> {
        if args.text(0)? != self.id {
            self.pause();
        }
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Receiver for Player {
    fn kind(&self) -> Kind {
        PLAYER_KIND
    }
}
