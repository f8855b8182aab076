//! Attribute bridge between host values and native uEye configuration calls.
//!
//! Every setter follows the same pipeline: presence check, type conversion,
//! domain precondition, native call, status mapping. A failure at any stage
//! returns immediately, so rejected input never reaches the driver.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::camera::Camera;
use crate::color::color_to_bitdepth;
use crate::traits::{
    CameraError, ExposureCommand, PixelClockCommand, Result, StatusCode, UeyeDriver,
    GET_COLOR_MODE, GET_MASTER_GAIN, IGNORE_PARAMETER,
};
use crate::validation::{expect_float, expect_int, narrow, non_negative, require_present, Value};

/// A hardware-backed camera attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Image width.
    Width,
    /// Image height.
    Height,
    /// Sensor pixel clock in MHz.
    PixelClock,
    /// uEye color mode enumerant.
    ColorMode,
    /// Master hardware gain.
    Gain,
    /// Exposure time in milliseconds.
    Exposure,
}

impl Attribute {
    /// Every attribute, in table order.
    pub const ALL: [Self; 6] = [
        Self::Width,
        Self::Height,
        Self::PixelClock,
        Self::ColorMode,
        Self::Gain,
        Self::Exposure,
    ];

    /// Name the attribute is exposed under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::PixelClock => "pixelclock",
            Self::ColorMode => "color_mode",
            Self::Gain => "gain",
            Self::Exposure => "exposure",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn doc(self) -> &'static str {
        match self {
            Self::Width => "Image width",
            Self::Height => "Image height",
            Self::PixelClock => "Pixel Clock of camera",
            Self::ColorMode => "Color mode of images",
            Self::Gain => "Hardware gain (individual RGB gains not yet supported)",
            Self::Exposure => "Exposure time",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| CameraError::UnknownAttribute(s.to_owned()))
    }
}

/// Messages reported when a native setter rejects a value.
struct StatusMessages {
    call: &'static str,
    range: &'static str,
    failure: &'static str,
}

const PIXEL_CLOCK_SET: StatusMessages = StatusMessages {
    call: "is_PixelClock(SET)",
    range: "Pixel clock value out of range",
    failure: "Failed to set pixel clock.",
};

const GAIN_SET: StatusMessages = StatusMessages {
    call: "is_SetHardwareGain",
    range: "Gain out of range.",
    failure: "Unable to set gain.",
};

const EXPOSURE_SET: StatusMessages = StatusMessages {
    call: "is_Exposure(SET_EXPOSURE)",
    range: "Exposure out of range",
    failure: "Failed to set exposure time",
};

/// Map a setter's native status onto success or an error kind.
fn check_set_status(status: StatusCode, messages: &StatusMessages) -> Result<()> {
    match status {
        StatusCode::SUCCESS => Ok(()),
        StatusCode::INVALID_PARAMETER => {
            warn!("{} rejected parameter", messages.call);
            Err(CameraError::Value(messages.range.to_owned()))
        }
        other => {
            warn!("{} returned {other}", messages.call);
            Err(CameraError::Io {
                message: messages.failure.to_owned(),
                status: Some(other),
            })
        }
    }
}

fn bitdepth_unsupported() -> CameraError {
    CameraError::Unsupported(
        "Changing color mode to different bitdepth not yet supported.".to_owned(),
    )
}

fn geometry_unsupported(attr: Attribute) -> CameraError {
    CameraError::Unsupported(format!("Changing image {attr} not yet supported."))
}

impl<D: UeyeDriver> Camera<D> {
    /// Width cannot be changed once the device is open.
    #[allow(clippy::unused_self)]
    pub fn set_width(&mut self, _width: u32) -> Result<()> {
        Err(geometry_unsupported(Attribute::Width))
    }

    /// Height cannot be changed once the device is open.
    #[allow(clippy::unused_self)]
    pub fn set_height(&mut self, _height: u32) -> Result<()> {
        Err(geometry_unsupported(Attribute::Height))
    }

    /// Read the current pixel clock in MHz.
    pub fn pixelclock(&mut self) -> Result<u32> {
        let (handle, driver) = self.native();
        let mut clock: u32 = 0;

        debug!("is_PixelClock({handle}, GET)");
        let status = driver.pixel_clock(handle, PixelClockCommand::Get, &mut clock);
        if !status.is_success() {
            warn!("is_PixelClock({handle}, GET) returned {status}");
            return Err(CameraError::Io {
                message: "Failed to retrieve pixel clock from camera".to_owned(),
                status: Some(status),
            });
        }
        Ok(clock)
    }

    /// Set the pixel clock in MHz.
    ///
    /// Negative values are rejected here, before the driver is asked.
    pub fn set_pixelclock(&mut self, clock: i64) -> Result<()> {
        let clock = non_negative(clock, "Pixel clock must be positive.")?;
        let mut clock: u32 = narrow(clock, PIXEL_CLOCK_SET.range)?;

        let (handle, driver) = self.native();
        debug!("is_PixelClock({handle}, SET, {clock})");
        let status = driver.pixel_clock(handle, PixelClockCommand::Set, &mut clock);
        check_set_status(status, &PIXEL_CLOCK_SET)
    }

    /// Read the current color mode.
    pub fn color_mode(&mut self) -> i32 {
        let (handle, driver) = self.native();
        debug!("is_SetColorMode({handle}, GET_COLOR_MODE)");
        driver.set_color_mode(handle, GET_COLOR_MODE)
    }

    /// Switch color mode without changing the cached bitdepth.
    ///
    /// Modes with a different bitdepth would invalidate the capture buffers
    /// and are rejected without touching the device, as are modes with no
    /// known bitdepth.
    pub fn set_color_mode(&mut self, mode: i32) -> Result<()> {
        let bitdepth = color_to_bitdepth(mode);
        if bitdepth == 0 || bitdepth != self.bitdepth() {
            return Err(bitdepth_unsupported());
        }
        self.switch_color_mode(mode)
    }

    /// Read the master gain. Per-channel gains are left untouched.
    pub fn gain(&mut self) -> i32 {
        let (handle, driver) = self.native();
        debug!("is_SetHardwareGain({handle}, GET_MASTER_GAIN)");
        driver.set_hardware_gain(
            handle,
            GET_MASTER_GAIN,
            IGNORE_PARAMETER,
            IGNORE_PARAMETER,
            IGNORE_PARAMETER,
        )
    }

    /// Set the master gain. Per-channel gains are left untouched.
    pub fn set_gain(&mut self, gain: i64) -> Result<()> {
        let gain: i32 = narrow(gain, GAIN_SET.range)?;
        // The query sentinel would read the gain back instead of writing it.
        if gain == GET_MASTER_GAIN {
            return Err(CameraError::Value(GAIN_SET.range.to_owned()));
        }

        let (handle, driver) = self.native();
        debug!("is_SetHardwareGain({handle}, {gain})");
        let status = StatusCode(driver.set_hardware_gain(
            handle,
            gain,
            IGNORE_PARAMETER,
            IGNORE_PARAMETER,
            IGNORE_PARAMETER,
        ));
        check_set_status(status, &GAIN_SET)
    }

    /// Read the exposure time in milliseconds.
    pub fn exposure(&mut self) -> Result<f64> {
        let (handle, driver) = self.native();
        let mut exposure: f64 = 0.0;

        debug!("is_Exposure({handle}, GET_EXPOSURE)");
        let status = driver.exposure(handle, ExposureCommand::GetExposure, &mut exposure);
        if !status.is_success() {
            warn!("is_Exposure({handle}, GET_EXPOSURE) returned {status}");
            return Err(CameraError::Io {
                message: format!(
                    "Failed to retrieve exposure time from camera. Returned: {status}"
                ),
                status: Some(status),
            });
        }
        Ok(exposure)
    }

    /// Set the exposure time in milliseconds.
    pub fn set_exposure(&mut self, exposure: f64) -> Result<()> {
        let mut exposure = exposure;

        let (handle, driver) = self.native();
        debug!("is_Exposure({handle}, SET_EXPOSURE, {exposure})");
        let status = driver.exposure(handle, ExposureCommand::SetExposure, &mut exposure);
        check_set_status(status, &EXPOSURE_SET)
    }

    /// Read an attribute as a host value.
    pub fn get_attr(&mut self, attr: Attribute) -> Result<Value> {
        Ok(match attr {
            Attribute::Width => Value::from(self.width()),
            Attribute::Height => Value::from(self.height()),
            Attribute::PixelClock => Value::from(self.pixelclock()?),
            Attribute::ColorMode => Value::from(self.color_mode()),
            Attribute::Gain => Value::from(self.gain()),
            Attribute::Exposure => Value::from(self.exposure()?),
        })
    }

    /// Write an attribute from a host value. `None` requests a delete.
    pub fn set_attr(&mut self, attr: Attribute, value: Option<&Value>) -> Result<()> {
        let value = require_present(attr.name(), value)?;

        match attr {
            Attribute::Width | Attribute::Height => Err(geometry_unsupported(attr)),
            Attribute::PixelClock => {
                let clock = expect_int(value, "Pixel clock must be an int or long.")?;
                self.set_pixelclock(clock)
            }
            Attribute::ColorMode => {
                let mode = expect_int(value, "Color mode must be an int.")?;
                let Ok(mode) = i32::try_from(mode) else {
                    return Err(bitdepth_unsupported());
                };
                self.set_color_mode(mode)
            }
            Attribute::Gain => {
                let gain = expect_int(value, "Gain must be an int.")?;
                self.set_gain(gain)
            }
            Attribute::Exposure => {
                let exposure = expect_float(value)?;
                self.set_exposure(exposure)
            }
        }
    }
}
