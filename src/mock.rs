//! Mock driver implementation for testing without hardware.

use crate::color::{self, color_to_bitdepth};
use crate::traits::{
    DeviceHandle, ExposureCommand, PixelClockCommand, StatusCode, UeyeDriver, GET_COLOR_MODE,
    GET_MASTER_GAIN,
};

/// Accepted pixel clock range in MHz.
const PIXEL_CLOCK_RANGE: std::ops::RangeInclusive<u32> = 5..=43;
/// Accepted exposure range in milliseconds.
const EXPOSURE_RANGE: std::ops::RangeInclusive<f64> = 0.01..=1000.0;
/// Accepted master gain range.
const GAIN_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

/// One recorded native call.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    /// `is_PixelClock`
    PixelClock {
        /// Handle the call was issued on.
        handle: DeviceHandle,
        /// Command issued.
        command: PixelClockCommand,
        /// Byte size of the parameter buffer.
        size: usize,
    },
    /// `is_Exposure`
    Exposure {
        /// Handle the call was issued on.
        handle: DeviceHandle,
        /// Command issued.
        command: ExposureCommand,
        /// Byte size of the parameter buffer.
        size: usize,
    },
    /// `is_SetColorMode`
    SetColorMode {
        /// Requested mode or `GET_COLOR_MODE`.
        mode: i32,
    },
    /// `is_SetHardwareGain`
    SetHardwareGain {
        /// Master gain or `GET_MASTER_GAIN`.
        master: i32,
        /// Red channel.
        red: i32,
        /// Green channel.
        green: i32,
        /// Blue channel.
        blue: i32,
    },
}

/// Mock uEye driver that records every call it receives.
#[derive(Debug)]
pub struct MockDriver {
    pixel_clock: u32,
    exposure: f64,
    color_mode: i32,
    gain: i32,
    forced_status: Option<StatusCode>,
    calls: Vec<NativeCall>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Create a new mock driver with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixel_clock: 30,
            exposure: 10.0,
            color_mode: color::MONO8,
            gain: 0,
            forced_status: None,
            calls: Vec::new(),
        }
    }

    /// Make every status-returning call answer with `status`.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.forced_status = Some(status);
        self
    }

    /// Start from the given master gain.
    #[must_use]
    pub fn with_gain(mut self, gain: i32) -> Self {
        self.gain = gain;
        self
    }

    /// Start from the given color mode.
    #[must_use]
    pub fn with_color_mode(mut self, mode: i32) -> Self {
        self.color_mode = mode;
        self
    }

    /// All calls received so far.
    pub fn calls(&self) -> &[NativeCall] {
        &self.calls
    }

    /// Exposure currently stored in the mock device.
    pub const fn stored_exposure(&self) -> f64 {
        self.exposure
    }

    /// Pixel clock currently stored in the mock device.
    pub const fn stored_pixel_clock(&self) -> u32 {
        self.pixel_clock
    }
}

impl UeyeDriver for MockDriver {
    fn pixel_clock(
        &mut self,
        handle: DeviceHandle,
        command: PixelClockCommand,
        param: &mut u32,
    ) -> StatusCode {
        self.calls.push(NativeCall::PixelClock {
            handle,
            command,
            size: std::mem::size_of_val(&*param),
        });
        if let Some(status) = self.forced_status {
            return status;
        }

        match command {
            PixelClockCommand::Get => *param = self.pixel_clock,
            PixelClockCommand::Set => {
                if !PIXEL_CLOCK_RANGE.contains(&*param) {
                    return StatusCode::INVALID_PARAMETER;
                }
                self.pixel_clock = *param;
            }
        }
        StatusCode::SUCCESS
    }

    fn exposure(
        &mut self,
        handle: DeviceHandle,
        command: ExposureCommand,
        param: &mut f64,
    ) -> StatusCode {
        self.calls.push(NativeCall::Exposure {
            handle,
            command,
            size: std::mem::size_of_val(&*param),
        });
        if let Some(status) = self.forced_status {
            return status;
        }

        match command {
            ExposureCommand::GetExposure => *param = self.exposure,
            ExposureCommand::SetExposure => {
                if !EXPOSURE_RANGE.contains(&*param) {
                    return StatusCode::INVALID_PARAMETER;
                }
                self.exposure = *param;
            }
        }
        StatusCode::SUCCESS
    }

    fn set_color_mode(&mut self, _handle: DeviceHandle, mode: i32) -> i32 {
        self.calls.push(NativeCall::SetColorMode { mode });
        if mode == GET_COLOR_MODE {
            return self.color_mode;
        }
        if let Some(status) = self.forced_status {
            return status.0;
        }

        if color_to_bitdepth(mode) == 0 {
            return StatusCode::INVALID_PARAMETER.0;
        }
        self.color_mode = mode;
        StatusCode::SUCCESS.0
    }

    fn set_hardware_gain(
        &mut self,
        _handle: DeviceHandle,
        master: i32,
        red: i32,
        green: i32,
        blue: i32,
    ) -> i32 {
        self.calls.push(NativeCall::SetHardwareGain {
            master,
            red,
            green,
            blue,
        });
        if master == GET_MASTER_GAIN {
            return self.gain;
        }
        if let Some(status) = self.forced_status {
            return status.0;
        }

        if !GAIN_RANGE.contains(&master) {
            return StatusCode::INVALID_PARAMETER.0;
        }
        self.gain = master;
        StatusCode::SUCCESS.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::IGNORE_PARAMETER;

    const HANDLE: DeviceHandle = DeviceHandle::from_raw(1);

    #[test]
    fn test_mock_driver_records_calls() {
        let mut driver = MockDriver::new();
        let mut clock = 0u32;
        let status = driver.pixel_clock(HANDLE, PixelClockCommand::Get, &mut clock);

        assert_eq!(status, StatusCode::SUCCESS);
        assert_eq!(clock, 30);
        assert_eq!(
            driver.calls(),
            &[NativeCall::PixelClock {
                handle: HANDLE,
                command: PixelClockCommand::Get,
                size: 4,
            }]
        );
    }

    #[test]
    fn test_mock_driver_range_checks() {
        let mut driver = MockDriver::new();
        let mut clock = 99u32;
        assert_eq!(
            driver.pixel_clock(HANDLE, PixelClockCommand::Set, &mut clock),
            StatusCode::INVALID_PARAMETER
        );
        assert_eq!(driver.stored_pixel_clock(), 30);

        let mut exposure = 0.0;
        assert_eq!(
            driver.exposure(HANDLE, ExposureCommand::SetExposure, &mut exposure),
            StatusCode::INVALID_PARAMETER
        );
        assert_eq!(
            driver.set_hardware_gain(HANDLE, 101, IGNORE_PARAMETER, IGNORE_PARAMETER, IGNORE_PARAMETER),
            StatusCode::INVALID_PARAMETER.0
        );
    }

    #[test]
    fn test_mock_driver_forced_status() {
        let mut driver = MockDriver::new().with_status(StatusCode::TIMED_OUT);
        let mut exposure = 0.0;
        assert_eq!(
            driver.exposure(HANDLE, ExposureCommand::GetExposure, &mut exposure),
            StatusCode::TIMED_OUT
        );
        assert_eq!(driver.set_color_mode(HANDLE, color::MONO8), StatusCode::TIMED_OUT.0);
    }

    #[test]
    fn test_mock_driver_queries_ignore_forced_status() {
        let mut driver = MockDriver::new()
            .with_gain(12)
            .with_color_mode(color::RGB8_PACKED)
            .with_status(StatusCode::TIMED_OUT);
        assert_eq!(driver.set_color_mode(HANDLE, GET_COLOR_MODE), color::RGB8_PACKED);
        assert_eq!(
            driver.set_hardware_gain(
                HANDLE,
                GET_MASTER_GAIN,
                IGNORE_PARAMETER,
                IGNORE_PARAMETER,
                IGNORE_PARAMETER
            ),
            12
        );
    }
}
