//! # Example: mute_sync
//!
//! Demonstrates three players sharing one bus:
//! - muting one player mutes all of them;
//! - starting one player pauses the others;
//! - a non-player subscriber is not reached by player-targeted publishes.
//!
//! ## Flow
//! ```text
//! EventBus::builder(cfg).with_observers([LogWriter]).build()
//!     ├─► Player::attach() x3 ──► subscribe(VOLUME_CHANGED / PAUSE_CHANGED)
//!     ├─► a.toggle_mute() ──► publish(VOLUME_CHANGED, kind=custom-video)
//!     ├─► b.play()        ──► publish(PAUSE_CHANGED, kind=custom-video)
//!     └─► LogWriter ──► tracing output
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example mute_sync --features logging
//! ```

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vidbus::{
    Config, EventBus, Handler, Kind, LogWriter, Observe, Player, Receiver, Value, VOLUME_CHANGED,
};

/// A volume indicator that is not a player.
struct VolumeMeter;

impl Receiver for VolumeMeter {
    fn kind(&self) -> Kind {
        Kind::from_static("volume-meter")
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let observers: Vec<Arc<dyn Observe>> = vec![Arc::new(LogWriter::new())];
    let bus = EventBus::builder(Config::default())
        .with_observers(observers)
        .build();

    let a = Player::attach(&bus);
    let b = Player::attach(&bus);
    let c = Player::attach(&bus);

    let meter = Arc::new(VolumeMeter);
    let on_volume = Handler::new(|_: &VolumeMeter, args: &[Value]| {
        println!("[meter] volume -> {}", args.first().cloned().unwrap_or_default());
        Ok(())
    });
    bus.subscribe(VOLUME_CHANGED, &on_volume, &meter);

    let reached = a.toggle_mute()?;
    println!("[demo] mute from {}: {reached} players updated", a.id());
    for p in [&a, &b, &c] {
        println!("[demo] {} muted={}", p.id(), p.is_muted());
    }

    b.play()?;
    c.play()?;
    for p in [&a, &b, &c] {
        println!("[demo] {} paused={}", p.id(), p.is_paused());
    }

    // Untargeted: the meter hears it too.
    let reached = bus.publish(VOLUME_CHANGED, None::<&Player>, &[Value::Float(1.0)])?;
    println!("[demo] broadcast reached {reached} subscribers");

    bus.shutdown().await;
    Ok(())
}
