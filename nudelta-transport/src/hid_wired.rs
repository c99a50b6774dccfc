//! HID transport over the wired USB vendor interface

use std::ffi::CString;

use hidapi::{HidApi, HidDevice};
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::{cmd, REPORT_ID};
use crate::types::DeviceDescriptor;
use crate::Transport;

/// Blocking feature-report transport for a USB-connected Air75
pub struct HidWiredTransport {
    device: HidDevice,
    info: DeviceDescriptor,
}

impl HidWiredTransport {
    /// Open the interface described by `descriptor`
    pub fn open(descriptor: &DeviceDescriptor) -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        let path = CString::new(descriptor.path.as_bytes()).map_err(|_| {
            TransportError::Internal(format!("invalid device path {:?}", descriptor.path))
        })?;
        let device = api.open_path(&path)?;
        debug!("Opened HID device at {}", descriptor.path);
        Ok(Self::new(device, descriptor.clone()))
    }

    /// Wrap an already opened device
    pub fn new(device: HidDevice, info: DeviceDescriptor) -> Self {
        Self { device, info }
    }
}

impl Transport for HidWiredTransport {
    fn write_report(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        if let [_, command, page, ..] = frame {
            debug!(
                "Sending {} (0x{:02X}) page {}: {:02X?}",
                cmd::name(*command),
                command,
                page,
                &frame[..frame.len().min(12)]
            );
        }
        self.device.send_feature_report(frame)?;
        Ok(())
    }

    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        if let Some(first) = buf.first_mut() {
            *first = REPORT_ID;
        }
        let n = self.device.get_feature_report(buf)?;
        debug!("Received {} bytes: {:02X?}", n, &buf[..n.min(12)]);
        Ok(n)
    }

    fn device_info(&self) -> &DeviceDescriptor {
        &self.info
    }
}

impl Drop for HidWiredTransport {
    fn drop(&mut self) {
        debug!("Closing HID device at {}", self.info.path);
    }
}
