//! Scroll emission and feedback sinks
//!
//! The engine drives two outputs: synthetic scroll events injected into
//! the host input stream ([`ScrollSink`]) and overlay notifications for a
//! presentation layer the core knows nothing about ([`FeedbackSink`]).
//! Feedback is delivered as events on a channel so UI toolkits subscribe
//! instead of being called into directly.

pub mod portal;

pub use portal::PortalScrollSink;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

use crate::engine::Direction;
use crate::input::Result;

/// Injects a synthetic 2-axis scroll event into the OS input stream.
///
/// Units are host scroll units; positive `delta_x` scrolls right and the
/// sign of `delta_y` follows the drag-down-scrolls-down convention of
/// [`crate::engine::curve::evaluate`]. Failures are expected to be
/// transient; the tick loop logs and retries next cycle.
#[async_trait]
pub trait ScrollSink: Send + Sync {
    /// Emit one scroll event.
    async fn emit_scroll(&self, delta_x: f64, delta_y: f64) -> Result<()>;
}

/// Scroll sink that only logs, for `--dry-run` and tests.
pub struct LogSink;

#[async_trait]
impl ScrollSink for LogSink {
    async fn emit_scroll(&self, delta_x: f64, delta_y: f64) -> Result<()> {
        debug!(delta_x, delta_y, "scroll (dry run)");
        Ok(())
    }
}

/// Receives overlay notifications on gesture transitions and direction
/// changes. Never called redundantly every tick.
pub trait FeedbackSink: Send {
    /// Gesture started; show the overlay centered on the origin.
    fn show(&mut self, origin_x: f64, origin_y: f64);
    /// Gesture ended; hide the overlay.
    fn hide(&mut self);
    /// Direction classification changed.
    fn set_direction(&mut self, direction: Direction);
    /// Overlay sizing hint changed.
    fn resize(&mut self, size: f64);
}

/// Overlay notification, as delivered to feedback subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackEvent {
    /// Show the overlay at the gesture origin
    Show {
        /// Origin X in screen coordinates
        x: f64,
        /// Origin Y in screen coordinates
        y: f64,
    },
    /// Hide the overlay
    Hide,
    /// New direction classification
    Direction(Direction),
    /// New overlay size hint
    Resize(f64),
}

/// Feedback sink forwarding events to a subscriber channel.
///
/// Dropped subscribers are tolerated: overlay feedback is cosmetic and
/// must never stall or fail the engine.
pub struct ChannelFeedback {
    tx: UnboundedSender<FeedbackEvent>,
}

impl ChannelFeedback {
    /// Create a sink together with its subscription end.
    pub fn channel() -> (Self, UnboundedReceiver<FeedbackEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn push(&self, event: FeedbackEvent) {
        trace!(?event, "feedback");
        let _ = self.tx.send(event);
    }
}

impl FeedbackSink for ChannelFeedback {
    fn show(&mut self, origin_x: f64, origin_y: f64) {
        self.push(FeedbackEvent::Show {
            x: origin_x,
            y: origin_y,
        });
    }

    fn hide(&mut self) {
        self.push(FeedbackEvent::Hide);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.push(FeedbackEvent::Direction(direction));
    }

    fn resize(&mut self, size: f64) {
        self.push(FeedbackEvent::Resize(size));
    }
}

/// Feedback sink for headless runs.
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn show(&mut self, _origin_x: f64, _origin_y: f64) {}
    fn hide(&mut self) {}
    fn set_direction(&mut self, _direction: Direction) {}
    fn resize(&mut self, _size: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_feedback_forwards_events() {
        let (mut sink, mut rx) = ChannelFeedback::channel();
        sink.show(10.0, 20.0);
        sink.set_direction(Direction::Up);
        sink.hide();

        assert_eq!(rx.try_recv().unwrap(), FeedbackEvent::Show { x: 10.0, y: 20.0 });
        assert_eq!(rx.try_recv().unwrap(), FeedbackEvent::Direction(Direction::Up));
        assert_eq!(rx.try_recv().unwrap(), FeedbackEvent::Hide);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_feedback_survives_dropped_subscriber() {
        let (mut sink, rx) = ChannelFeedback::channel();
        drop(rx);
        sink.show(0.0, 0.0);
        sink.hide();
    }
}
