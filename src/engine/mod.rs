//! Scroll engine
//!
//! Owns the gesture state machine and the periodic tick loop. Button
//! edges arrive from the listener thread over a channel; each tick takes
//! a tuning snapshot, samples the pointer, evaluates the response curve,
//! and drives the scroll and feedback sinks.
//!
//! # Concurrency
//!
//! The engine task is the only writer of gesture state, so no lock guards
//! the `active`/`origin` pair; the listener communicates exclusively via
//! the event channel. Tuning is shared behind a [`TuningHandle`] and read
//! as one snapshot at the top of each tick, never mid-computation.
//!
//! The loop runs until process exit. A failed position query or scroll
//! injection skips the current tick; the fixed cadence is the retry.

pub mod curve;
pub mod state;

pub use curve::{Direction, TickOutput};
pub use state::{GestureState, Transition};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::config::{CalibrationConfig, PollingConfig, TuningHandle};
use crate::input::{ButtonEvent, PointerQuery};
use crate::sink::{FeedbackSink, ScrollSink};

/// The input-to-scroll transform engine.
pub struct ScrollEngine<Q: PointerQuery, F: FeedbackSink> {
    tuning: TuningHandle,
    unit_scale: f64,
    active_interval: Duration,
    idle_interval: Duration,
    pointer: Q,
    scroll: Arc<dyn ScrollSink>,
    feedback: F,
    events: UnboundedReceiver<ButtonEvent>,
    events_open: bool,
    state: GestureState,
    shown_overlay_size: Option<f64>,
}

impl<Q: PointerQuery, F: FeedbackSink> ScrollEngine<Q, F> {
    /// Create an engine wired to its collaborators.
    pub fn new(
        tuning: TuningHandle,
        calibration: CalibrationConfig,
        polling: PollingConfig,
        pointer: Q,
        scroll: Arc<dyn ScrollSink>,
        feedback: F,
        events: UnboundedReceiver<ButtonEvent>,
    ) -> Self {
        Self {
            tuning,
            unit_scale: calibration.unit_scale,
            active_interval: Duration::from_millis(polling.active_interval_ms),
            idle_interval: Duration::from_millis(polling.idle_interval_ms),
            pointer,
            scroll,
            feedback,
            events,
            events_open: true,
            state: GestureState::new(),
            shown_overlay_size: None,
        }
    }

    /// Whether a gesture is currently active.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Run the engine until process exit.
    pub async fn run(mut self) {
        loop {
            let interval = if self.state.is_active() {
                self.active_interval
            } else {
                self.idle_interval
            };

            if self.events_open {
                let received = tokio::select! {
                    maybe_event = self.events.recv() => Some(maybe_event),
                    _ = tokio::time::sleep(interval) => None,
                };
                match received {
                    Some(Some(event)) => self.handle_button(event),
                    Some(None) => {
                        // Listener thread is gone; keep ticking so the
                        // daemon stays alive, but no gesture can start.
                        warn!("button listener stopped; engine is inert");
                        self.events_open = false;
                    }
                    None => self.tick().await,
                }
            } else {
                tokio::time::sleep(interval).await;
                self.tick().await;
            }
        }
    }

    /// Apply one button edge to the gesture state machine.
    pub fn handle_button(&mut self, event: ButtonEvent) {
        match self.state.on_button(&event) {
            Transition::Started { origin } => {
                let overlay_size = self.tuning.read().overlay_size;
                if self.shown_overlay_size != Some(overlay_size) {
                    self.feedback.resize(overlay_size);
                    self.shown_overlay_size = Some(overlay_size);
                }
                self.feedback.show(origin.x, origin.y);
            }
            Transition::Stopped => self.feedback.hide(),
            Transition::None => {}
        }
    }

    /// Execute one tick: sample, transform, emit.
    ///
    /// Public so tests can drive the engine deterministically without the
    /// timer loop.
    pub async fn tick(&mut self) {
        if !self.state.is_active() {
            return;
        }

        let tuning = *self.tuning.read();

        let position = match self.pointer.position() {
            Ok(position) => position,
            Err(e) => {
                // Transient; retried next tick.
                debug!("position query failed: {}", e);
                return;
            }
        };

        let origin = self.state.origin();
        let output = curve::evaluate(
            &tuning,
            self.unit_scale,
            position.x - origin.x,
            position.y - origin.y,
        );

        if output.direction != self.state.last_direction() {
            self.feedback.set_direction(output.direction);
        }
        self.state.set_last_direction(output.direction);

        if let Some((delta_x, delta_y)) = output.scroll {
            if let Err(e) = self.scroll.emit_scroll(delta_x, delta_y).await {
                debug!("scroll injection failed: {}", e);
            }
        }
    }
}
