//! XDG RemoteDesktop portal scroll injection
//!
//! Opens a Portal RemoteDesktop session with the pointer device selected
//! and injects continuous axis events via `NotifyPointerAxis`. Works on
//! any compositor with a RemoteDesktop portal backend, including from
//! inside a Flatpak sandbox.
//!
//! Session setup may prompt the user for approval the first time; that is
//! portal policy, not something the daemon can bypass.

use ashpd::desktop::remote_desktop::{DeviceType, RemoteDesktop};
use ashpd::desktop::PersistMode;
use ashpd::desktop::Session;
use async_trait::async_trait;
use enumflags2::BitFlags;
use tracing::{debug, info};

use super::ScrollSink;
use crate::input::{InputError, Result};

/// Scroll sink backed by the RemoteDesktop portal.
pub struct PortalScrollSink {
    proxy: RemoteDesktop<'static>,
    session: Session<'static, RemoteDesktop<'static>>,
}

impl PortalScrollSink {
    /// Create the portal session and select the pointer device.
    pub async fn connect() -> Result<Self> {
        let proxy = RemoteDesktop::new()
            .await
            .map_err(|e| InputError::Portal(format!("RemoteDesktop proxy: {}", e)))?;

        let session = proxy
            .create_session()
            .await
            .map_err(|e| InputError::Portal(format!("create_session: {}", e)))?;

        let devices: BitFlags<DeviceType> = DeviceType::Pointer.into();
        proxy
            .select_devices(&session, devices, None, PersistMode::DoNot)
            .await
            .map_err(|e| InputError::Portal(format!("select_devices: {}", e)))?;

        // First start on a fresh session may show an approval dialog.
        proxy
            .start(&session, None)
            .await
            .map_err(|e| InputError::Portal(format!("start: {}", e)))?;

        info!("RemoteDesktop portal session started (pointer device)");
        Ok(Self { proxy, session })
    }
}

/// Translate an engine scroll vector into wl_pointer axis deltas.
///
/// The engine's vertical sign follows the wheel convention (negative y
/// scrolls content down); wl_pointer axis values are positive toward the
/// bottom of the surface, so the vertical component flips here.
fn to_axis_deltas(delta_x: f64, delta_y: f64) -> (f64, f64) {
    (delta_x, -delta_y)
}

#[async_trait]
impl ScrollSink for PortalScrollSink {
    async fn emit_scroll(&self, delta_x: f64, delta_y: f64) -> Result<()> {
        let (axis_x, axis_y) = to_axis_deltas(delta_x, delta_y);
        debug!(axis_x, axis_y, "inject scroll");
        self.proxy
            .notify_pointer_axis(&self.session, axis_x, axis_y, true)
            .await
            .map_err(|e| InputError::Injection(format!("notify_pointer_axis: {}", e)))
    }
}
