//! # glidescroll
//!
//! Middle-button drag-to-scroll emulation for Linux desktops.
//!
//! Pressing the middle mouse button anchors an origin point; cursor
//! displacement from that origin is converted into synthetic scroll-wheel
//! events with a dead zone, a power-law acceleration curve, and optional
//! horizontal output. Pressing middle again (or clicking left/right)
//! ends the gesture.
//!
//! # Architecture
//!
//! ```text
//! glidescroll
//!   ├─> Button Listener (device_query poller, dedicated thread)
//!   │     └─> press/release edges ──channel──> ScrollEngine
//!   ├─> ScrollEngine (tokio task)
//!   │     ├─> Gesture State (Idle/Active, anchor origin)
//!   │     ├─> Response Curve (dead zone + power law)
//!   │     └─> Direction Classifier (feedback events)
//!   ├─> Scroll Sink (XDG RemoteDesktop portal axis injection)
//!   └─> Feedback Channel (show/hide/direction for an overlay UI)
//! ```
//!
//! # Data Flow
//!
//! **Gesture Path:** Poller → ButtonEvent channel → ScrollEngine → state transition
//!
//! **Scroll Path:** Tick → position query → curve → ScrollSink → Compositor
//!
//! **Feedback Path:** ScrollEngine → FeedbackEvent channel → overlay (external)

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Daemon configuration and preset persistence
pub mod config;

/// Gesture state machine, response curve, and the tick loop
pub mod engine;

/// Global pointer listener contract and the polled backend
pub mod input;

/// Scroll emission and feedback sinks
pub mod sink;
