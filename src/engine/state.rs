//! Gesture state machine
//!
//! Two states, Idle and Active. A middle-button press toggles between
//! them; a left or right press while Active cancels the gesture so the
//! user can click through without scrolling. Release edges never cause
//! transitions.

use tracing::debug;

use super::curve::Direction;
use crate::input::{ButtonEvent, PointerButton, Position};

/// State transition produced by a button edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Gesture started; the overlay should appear at `origin`
    Started {
        /// Anchor position recorded at the press edge
        origin: Position,
    },
    /// Gesture ended (toggle-off or interrupting click)
    Stopped,
    /// No state change
    None,
}

/// Tracks whether a scroll gesture is in progress and its anchor origin.
///
/// Exactly one instance exists for the process lifetime, owned by the
/// engine loop; button edges arrive over the listener channel so no lock
/// is needed around the `active`/`origin` pair.
#[derive(Debug)]
pub struct GestureState {
    active: bool,
    origin: Position,
    last_direction: Direction,
}

impl GestureState {
    /// Create the initial (idle) state.
    pub fn new() -> Self {
        Self {
            active: false,
            origin: Position::default(),
            last_direction: Direction::Neutral,
        }
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Anchor origin of the current gesture. Fixed until the gesture ends.
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Last direction forwarded to the feedback sink.
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Record the direction computed this tick. Callers compare against
    /// [`Self::last_direction`] first to suppress redundant feedback.
    pub fn set_last_direction(&mut self, direction: Direction) {
        self.last_direction = direction;
    }

    /// Apply a button edge. Only press edges matter.
    pub fn on_button(&mut self, event: &ButtonEvent) -> Transition {
        if !event.pressed {
            return Transition::None;
        }

        match event.button {
            PointerButton::Middle => {
                if self.active {
                    self.deactivate();
                    Transition::Stopped
                } else {
                    self.active = true;
                    self.origin = event.position;
                    self.last_direction = Direction::Neutral;
                    debug!(x = event.position.x, y = event.position.y, "gesture started");
                    Transition::Started {
                        origin: event.position,
                    }
                }
            }
            PointerButton::Left | PointerButton::Right => {
                if self.active {
                    self.deactivate();
                    Transition::Stopped
                } else {
                    Transition::None
                }
            }
        }
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.last_direction = Direction::Neutral;
        debug!("gesture stopped");
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new()
    }
}
