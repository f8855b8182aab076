//! Core traits and types for the uEye driver abstraction.

use std::fmt;

/// Non-owning reference to an opened uEye device (`HIDS`).
///
/// The handle is owned by whatever opened the device. Copying it never
/// duplicates the device and dropping it never closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(u32);

impl DeviceHandle {
    /// Wrap a raw `HIDS` value obtained from the device-open call.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw `HIDS` value passed to native calls.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hids:{}", self.0)
    }
}

/// Fixed-width result code returned by uEye SDK calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub i32);

impl StatusCode {
    /// `IS_NO_SUCCESS`
    pub const NO_SUCCESS: Self = Self(-1);
    /// `IS_SUCCESS`
    pub const SUCCESS: Self = Self(0);
    /// `IS_INVALID_CAMERA_HANDLE`
    pub const INVALID_CAMERA_HANDLE: Self = Self(1);
    /// `IS_IO_REQUEST_FAILED`
    pub const IO_REQUEST_FAILED: Self = Self(2);
    /// `IS_TIMED_OUT`
    pub const TIMED_OUT: Self = Self(122);
    /// `IS_INVALID_PARAMETER`
    pub const INVALID_PARAMETER: Self = Self(125);
    /// `IS_NOT_SUPPORTED`
    pub const NOT_SUPPORTED: Self = Self(155);

    /// Whether the call succeeded.
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Commands accepted by `is_PixelClock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PixelClockCommand {
    /// `IS_PIXELCLOCK_CMD_GET`
    Get = 5,
    /// `IS_PIXELCLOCK_CMD_SET`
    Set = 6,
}

/// Commands accepted by `is_Exposure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ExposureCommand {
    /// `IS_EXPOSURE_CMD_GET_EXPOSURE`
    GetExposure = 3,
    /// `IS_EXPOSURE_CMD_SET_EXPOSURE`
    SetExposure = 12,
}

/// `IS_GET_COLOR_MODE`: query value for `is_SetColorMode`.
pub const GET_COLOR_MODE: i32 = 0x8000;

/// `IS_GET_MASTER_GAIN`: query value for the master channel of `is_SetHardwareGain`.
pub const GET_MASTER_GAIN: i32 = 0x8000;

/// `IS_IGNORE_PARAMETER`: leaves a gain channel untouched.
pub const IGNORE_PARAMETER: i32 = -1;

/// Which of the four error kinds a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested change is structurally disallowed.
    Unsupported,
    /// The value cannot be converted to the native type, or a delete was attempted.
    Type,
    /// The value has the right type but is out of range.
    Value,
    /// The native call failed for any other reason.
    Io,
    /// Backend setup failed (library load, device open).
    Device,
}

/// Error type for camera attribute operations.
#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    /// The requested change is not supported by this layer.
    #[error("{0}")]
    Unsupported(String),

    /// Input has the wrong type or was missing.
    #[error("{0}")]
    Type(String),

    /// Input is out of range.
    #[error("{0}")]
    Value(String),

    /// No attribute with the given name exists.
    #[error("Camera has no attribute '{0}'")]
    UnknownAttribute(String),

    /// A native call failed.
    #[error("{message}")]
    Io {
        /// What was being attempted.
        message: String,
        /// Raw status returned by the driver, when one was returned.
        status: Option<StatusCode>,
    },

    /// Failed to open the device.
    #[error("Failed to open device: {0}")]
    DeviceOpenFailed(String),

    /// Failed to load the native SDK.
    #[error("Failed to load uEye SDK: {0}")]
    LibraryLoad(String),
}

impl CameraError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::Type(_) | Self::UnknownAttribute(_) => ErrorKind::Type,
            Self::Value(_) => ErrorKind::Value,
            Self::Io { .. } => ErrorKind::Io,
            Self::DeviceOpenFailed(_) | Self::LibraryLoad(_) => ErrorKind::Device,
        }
    }

    /// Raw native status carried by an I/O error.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Io { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type for camera operations.
pub type Result<T> = std::result::Result<T, CameraError>;

/// The native uEye entry points the attribute bridge consumes.
///
/// Each method mirrors one SDK function. Parameter buffers are typed so
/// that their size always matches the native storage size of the value.
/// Implementations must not retain the handle past the call.
pub trait UeyeDriver {
    /// `is_PixelClock(hids, command, &param, sizeof(UINT))`
    fn pixel_clock(
        &mut self,
        handle: DeviceHandle,
        command: PixelClockCommand,
        param: &mut u32,
    ) -> StatusCode;

    /// `is_Exposure(hids, command, &param, sizeof(double))`
    fn exposure(
        &mut self,
        handle: DeviceHandle,
        command: ExposureCommand,
        param: &mut f64,
    ) -> StatusCode;

    /// `is_SetColorMode(hids, mode)`
    ///
    /// With [`GET_COLOR_MODE`] returns the current mode, otherwise a status code.
    fn set_color_mode(&mut self, handle: DeviceHandle, mode: i32) -> i32;

    /// `is_SetHardwareGain(hids, master, red, green, blue)`
    ///
    /// With `master == GET_MASTER_GAIN` returns the current master gain,
    /// otherwise a status code.
    fn set_hardware_gain(
        &mut self,
        handle: DeviceHandle,
        master: i32,
        red: i32,
        green: i32,
        blue: i32,
    ) -> i32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CameraError::Unsupported("x".to_owned()).kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(CameraError::Type("x".to_owned()).kind(), ErrorKind::Type);
        assert_eq!(CameraError::Value("x".to_owned()).kind(), ErrorKind::Value);
        assert_eq!(
            CameraError::UnknownAttribute("zoom".to_owned()).kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn test_io_error_carries_status() {
        let err = CameraError::Io {
            message: "Unable to set gain.".to_owned(),
            status: Some(StatusCode::TIMED_OUT),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.status(), Some(StatusCode::TIMED_OUT));
        assert_eq!(err.to_string(), "Unable to set gain.");
    }

    #[test]
    fn test_handle_is_plain_copy() {
        let handle = DeviceHandle::from_raw(3);
        let copy = handle;
        assert_eq!(handle, copy);
        assert_eq!(copy.as_raw(), 3);
        assert_eq!(handle.to_string(), "hids:3");
    }
}
