//! V4L2 driver implementation using the v4l crate.
//!
//! Serves uEye cameras (and development webcams) through the kernel's video
//! interface. The uEye entry points are translated into V4L2 controls and
//! pixel formats; anything V4L2 cannot express answers `NOT_SUPPORTED`.

use std::io;

use log::{debug, warn};
use v4l::control::{Control, Value as ControlValue};
use v4l::video::Capture;
use v4l::{Device, FourCC};

use crate::camera::Camera;
use crate::color::{self, color_to_bitdepth};
use crate::traits::{
    CameraError, DeviceHandle, ExposureCommand, PixelClockCommand, Result, StatusCode,
    UeyeDriver, GET_COLOR_MODE, GET_MASTER_GAIN,
};

/// `V4L2_CID_GAIN`
const CID_GAIN: u32 = 0x0098_0913;
/// `V4L2_CID_EXPOSURE_ABSOLUTE`, in units of 100 us.
const CID_EXPOSURE_ABSOLUTE: u32 = 0x009a_0902;
/// `V4L2_CID_PIXEL_RATE`, in Hz. Read-only.
const CID_PIXEL_RATE: u32 = 0x009f_0902;

/// Exposure control units per millisecond.
const EXPOSURE_UNITS_PER_MS: f64 = 10.0;
const HZ_PER_MHZ: i64 = 1_000_000;

// Linux errno values reported by the V4L2 ioctls.
const EBADF: i32 = 9;
const ENODEV: i32 = 19;
const EINVAL: i32 = 22;
const ERANGE: i32 = 34;
const ETIMEDOUT: i32 = 110;

/// V4L2 device exposing the uEye driver entry points.
pub struct V4L2Driver {
    device: Device,
    index: u32,
    card: String,
}

impl V4L2Driver {
    /// Open a V4L2 device by index (e.g., 0 for /dev/video0).
    pub fn open(index: u32) -> Result<Self> {
        let device = Device::new(index as usize)
            .map_err(|err| CameraError::DeviceOpenFailed(err.to_string()))?;

        let caps = device
            .query_caps()
            .map_err(|err| CameraError::DeviceOpenFailed(err.to_string()))?;
        debug!("opened /dev/video{index}: {} ({})", caps.card, caps.driver);

        Ok(Self {
            device,
            index,
            card: caps.card,
        })
    }

    /// Card/device name reported by the kernel driver.
    pub fn card(&self) -> &str {
        &self.card
    }

    /// Handle under which this device answers native calls.
    pub const fn handle(&self) -> DeviceHandle {
        DeviceHandle::from_raw(self.index)
    }

    /// Build a camera object from the device's current capture format.
    pub fn into_camera(self) -> Result<Camera<Self>> {
        let fmt = self
            .device
            .format()
            .map_err(|err| CameraError::DeviceOpenFailed(err.to_string()))?;
        let bitdepth = fourcc_to_color_mode(fmt.fourcc).map_or(0, color_to_bitdepth);
        let handle = self.handle();

        Ok(Camera::new(self, handle, fmt.width, fmt.height, bitdepth))
    }

    fn read_control(&self, id: u32) -> std::result::Result<i64, StatusCode> {
        let control = self.device.control(id).map_err(|err| status_from_io(&err))?;
        match control.value {
            ControlValue::Integer(value) => Ok(value),
            _ => {
                warn!("control {id:#x} is not an integer control");
                Err(StatusCode::NOT_SUPPORTED)
            }
        }
    }

    fn write_control(&self, id: u32, value: i64) -> StatusCode {
        let control = Control {
            id,
            value: ControlValue::Integer(value),
        };
        match self.device.set_control(control) {
            Ok(()) => StatusCode::SUCCESS,
            Err(err) => status_from_io(&err),
        }
    }
}

impl UeyeDriver for V4L2Driver {
    fn pixel_clock(
        &mut self,
        handle: DeviceHandle,
        command: PixelClockCommand,
        param: &mut u32,
    ) -> StatusCode {
        if handle != self.handle() {
            return StatusCode::INVALID_CAMERA_HANDLE;
        }

        match command {
            PixelClockCommand::Get => {
                let rate = match self.read_control(CID_PIXEL_RATE) {
                    Ok(rate) => rate,
                    Err(status) => return status,
                };
                match u32::try_from(rate / HZ_PER_MHZ) {
                    Ok(mhz) => {
                        *param = mhz;
                        StatusCode::SUCCESS
                    }
                    Err(_) => StatusCode::IO_REQUEST_FAILED,
                }
            }
            // The pixel rate is fixed by the sensor driver.
            PixelClockCommand::Set => StatusCode::NOT_SUPPORTED,
        }
    }

    fn exposure(
        &mut self,
        handle: DeviceHandle,
        command: ExposureCommand,
        param: &mut f64,
    ) -> StatusCode {
        if handle != self.handle() {
            return StatusCode::INVALID_CAMERA_HANDLE;
        }

        match command {
            ExposureCommand::GetExposure => match self.read_control(CID_EXPOSURE_ABSOLUTE) {
                Ok(units) => {
                    #[allow(clippy::cast_precision_loss)]
                    let ms = units as f64 / EXPOSURE_UNITS_PER_MS;
                    *param = ms;
                    StatusCode::SUCCESS
                }
                Err(status) => status,
            },
            ExposureCommand::SetExposure => {
                let units = (*param * EXPOSURE_UNITS_PER_MS).round();
                if !units.is_finite() || units < 0.0 || units > f64::from(i32::MAX) {
                    return StatusCode::INVALID_PARAMETER;
                }
                #[allow(clippy::cast_possible_truncation)]
                let units = units as i64;
                self.write_control(CID_EXPOSURE_ABSOLUTE, units)
            }
        }
    }

    fn set_color_mode(&mut self, handle: DeviceHandle, mode: i32) -> i32 {
        if handle != self.handle() {
            return StatusCode::INVALID_CAMERA_HANDLE.0;
        }

        let mut fmt = match self.device.format() {
            Ok(fmt) => fmt,
            Err(err) => return status_from_io(&err).0,
        };

        if mode == GET_COLOR_MODE {
            return fourcc_to_color_mode(fmt.fourcc).unwrap_or(StatusCode::NO_SUCCESS.0);
        }

        let Some(fourcc) = color_mode_to_fourcc(mode) else {
            return StatusCode::INVALID_PARAMETER.0;
        };
        fmt.fourcc = fourcc;
        match self.device.set_format(&fmt) {
            Ok(actual) if actual.fourcc == fourcc => StatusCode::SUCCESS.0,
            Ok(actual) => {
                warn!("driver substituted {} for {}", actual.fourcc, fourcc);
                StatusCode::NOT_SUPPORTED.0
            }
            Err(err) => status_from_io(&err).0,
        }
    }

    fn set_hardware_gain(
        &mut self,
        handle: DeviceHandle,
        master: i32,
        _red: i32,
        _green: i32,
        _blue: i32,
    ) -> i32 {
        if handle != self.handle() {
            return StatusCode::INVALID_CAMERA_HANDLE.0;
        }

        if master == GET_MASTER_GAIN {
            return match self.read_control(CID_GAIN) {
                Ok(gain) => i32::try_from(gain).unwrap_or(StatusCode::NO_SUCCESS.0),
                Err(status) => {
                    warn!("reading gain returned {status}");
                    StatusCode::NO_SUCCESS.0
                }
            };
        }

        self.write_control(CID_GAIN, i64::from(master)).0
    }
}

/// Map an ioctl failure onto the closest uEye status.
fn status_from_io(err: &io::Error) -> StatusCode {
    match err.raw_os_error() {
        Some(ERANGE) => StatusCode::INVALID_PARAMETER,
        Some(EINVAL) => StatusCode::NOT_SUPPORTED,
        Some(ETIMEDOUT) => StatusCode::TIMED_OUT,
        Some(EBADF | ENODEV) => StatusCode::INVALID_CAMERA_HANDLE,
        _ => StatusCode::IO_REQUEST_FAILED,
    }
}

/// uEye color mode produced by a V4L2 pixel format.
fn fourcc_to_color_mode(fourcc: FourCC) -> Option<i32> {
    match &fourcc.repr {
        b"GREY" => Some(color::MONO8),
        b"Y12 " => Some(color::MONO12),
        b"Y16 " => Some(color::MONO16),
        b"BA81" => Some(color::SENSOR_RAW8),
        b"UYVY" | b"YUYV" => Some(color::UYVY_PACKED),
        b"RGBP" => Some(color::BGR565_PACKED),
        b"RGB3" => Some(color::RGB8_PACKED),
        b"BGR3" => Some(color::BGR8_PACKED),
        _ => None,
    }
}

/// V4L2 pixel format for a uEye color mode.
fn color_mode_to_fourcc(mode: i32) -> Option<FourCC> {
    let code = match mode {
        color::MONO8 => b"GREY",
        color::MONO12 => b"Y12 ",
        color::MONO16 => b"Y16 ",
        color::SENSOR_RAW8 => b"BA81",
        color::UYVY_PACKED => b"UYVY",
        color::BGR565_PACKED => b"RGBP",
        color::RGB8_PACKED => b"RGB3",
        color::BGR8_PACKED => b"BGR3",
        _ => return None,
    };
    Some(FourCC::new(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc_mapping_round_trips_known_modes() {
        for mode in [
            color::MONO8,
            color::MONO16,
            color::SENSOR_RAW8,
            color::UYVY_PACKED,
            color::RGB8_PACKED,
            color::BGR8_PACKED,
        ] {
            let fourcc = color_mode_to_fourcc(mode).expect("mode has a pixel format");
            assert_eq!(fourcc_to_color_mode(fourcc), Some(mode));
        }
    }

    #[test]
    fn test_yuyv_reads_as_uyvy_bitdepth() {
        let mode = fourcc_to_color_mode(FourCC::new(b"YUYV")).expect("YUYV is known");
        assert_eq!(color_to_bitdepth(mode), 16);
    }

    #[test]
    fn test_unknown_formats() {
        assert_eq!(fourcc_to_color_mode(FourCC::new(b"MJPG")), None);
        assert_eq!(color_mode_to_fourcc(color::RGBA8_PACKED), None);
    }

    #[test]
    fn test_status_from_io() {
        let status = |errno| status_from_io(&io::Error::from_raw_os_error(errno));
        assert_eq!(status(ERANGE), StatusCode::INVALID_PARAMETER);
        assert_eq!(status(EINVAL), StatusCode::NOT_SUPPORTED);
        assert_eq!(status(ETIMEDOUT), StatusCode::TIMED_OUT);
        assert_eq!(status(ENODEV), StatusCode::INVALID_CAMERA_HANDLE);
        assert_eq!(status(5), StatusCode::IO_REQUEST_FAILED);
    }
}
