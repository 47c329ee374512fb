//! # LogWriter — bus activity logger
//!
//! A minimal observer that forwards every [`DispatchEvent`] to `tracing`.
//! Use it for tests or demos; install any `tracing` subscriber to see output.
//!
//! ## Example output
//! ```text
//! DEBUG vidbus: [subscribed] event="custom_video_volume_changed" kind=custom-video
//! DEBUG vidbus: [published] event="custom_video_volume_changed" target=custom-video invoked=2
//!  WARN vidbus: [handler-failed] event="vol" target=* position=1 err="handler failed: boom"
//! ```

use async_trait::async_trait;

use crate::events::{DispatchEvent, DispatchKind};
use crate::observers::Observe;

/// Tracing-backed observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Observe for LogWriter {
    async fn on_event(&self, e: &DispatchEvent) {
        let event = e.event.as_deref().unwrap_or("-");
        let target = e.target.as_ref().map_or("*", |k| k.as_str());
        match e.kind {
            DispatchKind::Subscribed | DispatchKind::DuplicateIgnored => {
                tracing::debug!(
                    seq = e.seq,
                    "[{}] event={event:?} kind={target}",
                    e.kind.as_label()
                );
            }
            DispatchKind::Published => {
                tracing::debug!(
                    seq = e.seq,
                    "[published] event={event:?} target={target} invoked={}",
                    e.count.unwrap_or(0)
                );
            }
            DispatchKind::HandlerFailed => {
                tracing::warn!(
                    seq = e.seq,
                    "[handler-failed] event={event:?} target={target} position={} err={:?}",
                    e.count.unwrap_or(0),
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
            DispatchKind::Unsubscribed | DispatchKind::Pruned => {
                tracing::debug!(
                    seq = e.seq,
                    "[{}] event={event:?} removed={}",
                    e.kind.as_label(),
                    e.count.unwrap_or(0)
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
