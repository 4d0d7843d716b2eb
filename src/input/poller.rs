//! Polled `device_query` backend
//!
//! Samples global mouse state on a dedicated thread, derives press/release
//! edges from consecutive samples, and publishes the latest pointer
//! position for the tick loop's synchronous query.
//!
//! Polling (rather than an event hook) is a deliberate simplicity/latency
//! tradeoff carried over from the interval-driven design: at the sample
//! period of [`DevicePoller::default`], button edges land well inside one
//! engine tick.
//!
//! Known limitation: a polled backend observes the middle button but
//! cannot consume it, so the host still sees a native middle-click when a
//! gesture starts.

use device_query::{DeviceQuery, DeviceState};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

use super::error::{InputError, Result};
use super::{ButtonEvent, ButtonListener, PointerButton, PointerQuery, Position};

/// device_query reports buttons as a by-index bitmap whose numbering
/// follows the host convention: X11 core buttons are 1=left, 2=middle,
/// 3=right, while the Windows backend reports 1=left, 2=right, 3=middle.
#[cfg(not(target_os = "windows"))]
const BUTTON_SLOTS: [(usize, PointerButton); 3] = [
    (1, PointerButton::Left),
    (2, PointerButton::Middle),
    (3, PointerButton::Right),
];
#[cfg(target_os = "windows")]
const BUTTON_SLOTS: [(usize, PointerButton); 3] = [
    (1, PointerButton::Left),
    (2, PointerButton::Right),
    (3, PointerButton::Middle),
];

/// Global mouse poller.
pub struct DevicePoller {
    interval: Duration,
}

impl DevicePoller {
    /// Create a poller with the given sample period.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for DevicePoller {
    /// 5 ms sample period, a fraction of the fastest engine tick.
    fn default() -> Self {
        Self::new(Duration::from_millis(5))
    }
}

/// Position query backed by the poller's most recent sample.
#[derive(Clone)]
pub struct SampledPointer {
    latest: Arc<Mutex<Option<Position>>>,
}

impl PointerQuery for SampledPointer {
    fn position(&self) -> Result<Position> {
        (*self.latest.lock())
            .ok_or_else(|| InputError::PositionQuery("no pointer sample yet".to_string()))
    }
}

impl ButtonListener for DevicePoller {
    type Query = SampledPointer;

    fn listen(self, events: UnboundedSender<ButtonEvent>) -> Result<SampledPointer> {
        let latest = Arc::new(Mutex::new(None));
        let query = SampledPointer {
            latest: Arc::clone(&latest),
        };

        // DeviceState::new panics when it cannot reach the display server,
        // so the thread reports setup success or failure over a one-shot
        // handshake before entering its loop.
        let (ready_tx, ready_rx) = mpsc::channel::<std::result::Result<(), String>>();
        let interval = self.interval;

        thread::Builder::new()
            .name("glidescroll-poller".to_string())
            .spawn(move || {
                let device = match panic::catch_unwind(AssertUnwindSafe(DeviceState::new)) {
                    Ok(device) => {
                        let _ = ready_tx.send(Ok(()));
                        device
                    }
                    Err(_) => {
                        let _ = ready_tx.send(Err(
                            "cannot open input devices (no display or missing permission)"
                                .to_string(),
                        ));
                        return;
                    }
                };

                let mut previous = [false; BUTTON_SLOTS.len()];
                loop {
                    let mouse = device.get_mouse();
                    let position = Position::new(mouse.coords.0 as f64, mouse.coords.1 as f64);
                    *latest.lock() = Some(position);

                    for (slot, (index, button)) in BUTTON_SLOTS.iter().enumerate() {
                        let pressed = mouse.button_pressed.get(*index).copied().unwrap_or(false);
                        if pressed == previous[slot] {
                            continue;
                        }
                        previous[slot] = pressed;
                        trace!(?button, pressed, ?position, "button edge");

                        let event = ButtonEvent {
                            button: *button,
                            pressed,
                            position,
                        };
                        if events.send(event).is_err() {
                            debug!("button event receiver dropped, stopping poller");
                            return;
                        }
                    }

                    thread::sleep(interval);
                }
            })
            .map_err(|e| InputError::ListenerSetup(format!("failed to spawn poller: {}", e)))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(query),
            Ok(Err(reason)) => Err(InputError::ListenerSetup(reason)),
            Err(_) => Err(InputError::ListenerSetup(
                "poller thread exited during setup".to_string(),
            )),
        }
    }
}
