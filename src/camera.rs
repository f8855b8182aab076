//! Camera object: a driver, a borrowed device handle and the cached image geometry.

use log::{debug, warn};

use crate::color::color_to_bitdepth;
use crate::traits::{CameraError, DeviceHandle, Result, StatusCode, UeyeDriver};

/// An opened uEye camera as seen by the attribute bridge.
///
/// `width`, `height` and `bitdepth` mirror the acquisition setup chosen when
/// the device was opened. The attribute accessors only read them;
/// [`Camera::switch_color_mode`] is the one place that updates `bitdepth`.
#[derive(Debug)]
pub struct Camera<D> {
    driver: D,
    handle: DeviceHandle,
    width: u32,
    height: u32,
    bitdepth: u32,
}

impl<D: UeyeDriver> Camera<D> {
    /// Wrap an already opened device.
    pub const fn new(
        driver: D,
        handle: DeviceHandle,
        width: u32,
        height: u32,
        bitdepth: u32,
    ) -> Self {
        Self {
            driver,
            handle,
            width,
            height,
            bitdepth,
        }
    }

    /// Device handle used for every native call.
    pub const fn handle(&self) -> DeviceHandle {
        self.handle
    }

    /// Cached image width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Cached image height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cached bits per pixel of the current color mode.
    pub const fn bitdepth(&self) -> u32 {
        self.bitdepth
    }

    /// Access the driver directly.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Split borrow of the handle and the driver for a native call.
    pub(crate) fn native(&mut self) -> (DeviceHandle, &mut D) {
        (self.handle, &mut self.driver)
    }

    /// Switch the sensor to `mode` and record its bitdepth.
    pub fn switch_color_mode(&mut self, mode: i32) -> Result<()> {
        debug!("is_SetColorMode({}, {mode})", self.handle);
        let status = StatusCode(self.driver.set_color_mode(self.handle, mode));
        if !status.is_success() {
            warn!("is_SetColorMode({}, {mode}) returned {status}", self.handle);
            return Err(CameraError::Io {
                message: "Failed to set color mode".to_owned(),
                status: Some(status),
            });
        }

        self.bitdepth = color_to_bitdepth(mode);
        Ok(())
    }
}
