//! ids-camera: typed attribute access for IDS uEye cameras
//!
//! This library maps camera attributes (exposure, pixel clock, color mode,
//! gain, image geometry) onto the native uEye configuration calls behind a
//! driver trait, enabling both production use with real hardware and testing
//! with mock drivers.

pub mod attributes;
pub mod camera;
pub mod color;
pub mod device;
pub mod traits;
#[cfg(feature = "ueye")]
pub mod ueye;
pub mod validation;

#[cfg(test)]
pub mod mock;

pub use attributes::Attribute;
pub use camera::Camera;
pub use device::V4L2Driver;
pub use traits::{
    CameraError, DeviceHandle, ErrorKind, ExposureCommand, PixelClockCommand, Result, StatusCode,
    UeyeDriver,
};
#[cfg(feature = "ueye")]
pub use ueye::UeyeLibrary;
pub use validation::Value;
