//! Global Input Listener Contract
//!
//! The engine depends on two capabilities, both modeled as traits so the
//! transform can be tested without a display server:
//!
//! - **Button edges**: press/release notifications for the three standard
//!   buttons, each carrying the pointer position at the time of the event,
//!   delivered on a channel from whatever thread the backend runs on.
//! - **Position query**: a synchronous "current absolute pointer position"
//!   lookup usable from the tick loop, decoupled from event delivery.
//!
//! The shipped backend is [`poller::DevicePoller`], which derives both from
//! polled `device_query` state on a dedicated thread.

pub mod error;
pub mod poller;

pub use error::{InputError, Result};
pub use poller::DevicePoller;

use tokio::sync::mpsc::UnboundedSender;

/// The three standard pointer buttons the gesture machine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button; interrupts an active gesture
    Left,
    /// Secondary button; interrupts an active gesture
    Right,
    /// Gesture toggle
    Middle,
}

/// Absolute pointer position in global screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// X coordinate, pixels from the left edge of the virtual screen
    pub x: f64,
    /// Y coordinate, pixels from the top edge of the virtual screen
    pub y: f64,
}

impl Position {
    /// Construct a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A button press or release edge.
#[derive(Debug, Clone, Copy)]
pub struct ButtonEvent {
    /// Which button changed state
    pub button: PointerButton,
    /// True on the press edge, false on release
    pub pressed: bool,
    /// Pointer position at the time of the edge
    pub position: Position,
}

/// Synchronous current-pointer-position query.
pub trait PointerQuery: Send + Sync {
    /// Sample the current absolute pointer position.
    fn position(&self) -> Result<Position>;
}

impl PointerQuery for Box<dyn PointerQuery> {
    fn position(&self) -> Result<Position> {
        (**self).position()
    }
}

/// Query that never yields a position, used when listener setup failed
/// and the daemon runs inert.
pub struct InertPointer;

impl PointerQuery for InertPointer {
    fn position(&self) -> Result<Position> {
        Err(InputError::PositionQuery("no input backend".to_string()))
    }
}

/// A source of global button edges.
///
/// Implementations deliver [`ButtonEvent`]s on `events` from their own
/// thread and return a [`PointerQuery`] for the tick loop. Setup failure
/// (no display, missing input permission) is returned once; callers log
/// it and run inert rather than crashing.
pub trait ButtonListener {
    /// The position query handle produced alongside event delivery.
    type Query: PointerQuery;

    /// Start delivering button edges to `events`.
    fn listen(self, events: UnboundedSender<ButtonEvent>) -> Result<Self::Query>;
}
