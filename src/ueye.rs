//! uEye SDK driver, loaded from `libueye_api` at runtime.
//!
//! Only the four configuration entry points the attribute bridge needs are
//! resolved. Device handles come from whatever opened the camera; this
//! module never calls `is_InitCamera` or `is_ExitCamera`.

#![allow(unsafe_code)]

use std::ffi::c_void;

use libloading::Library;
use log::debug;

use crate::traits::{
    CameraError, DeviceHandle, ExposureCommand, PixelClockCommand, Result, StatusCode,
    UeyeDriver,
};

type IsPixelClock =
    unsafe extern "C" fn(hids: u32, command: u32, param: *mut c_void, size: u32) -> i32;
type IsExposure =
    unsafe extern "C" fn(hids: u32, command: u32, param: *mut c_void, size: u32) -> i32;
type IsSetColorMode = unsafe extern "C" fn(hids: u32, mode: i32) -> i32;
type IsSetHardwareGain =
    unsafe extern "C" fn(hids: u32, master: i32, red: i32, green: i32, blue: i32) -> i32;

#[cfg(all(target_os = "windows", target_pointer_width = "64"))]
const LIBRARY_NAME: &str = "ueye_api_64.dll";
#[cfg(all(target_os = "windows", not(target_pointer_width = "64")))]
const LIBRARY_NAME: &str = "ueye_api.dll";
#[cfg(not(target_os = "windows"))]
const LIBRARY_NAME: &str = "libueye_api.so";

/// Byte size of a native parameter, as the SDK expects it in `cbSizeOfParam`.
#[allow(clippy::cast_possible_truncation)]
const fn param_size<T>() -> u32 {
    std::mem::size_of::<T>() as u32
}

/// The uEye API library with its configuration entry points resolved.
pub struct UeyeLibrary {
    _library: Library,
    pixel_clock: IsPixelClock,
    exposure: IsExposure,
    set_color_mode: IsSetColorMode,
    set_hardware_gain: IsSetHardwareGain,
}

impl UeyeLibrary {
    /// Load the SDK from the default library search path.
    pub fn load() -> Result<Self> {
        Self::load_from(LIBRARY_NAME)
    }

    /// Load the SDK from an explicit path.
    pub fn load_from(path: &str) -> Result<Self> {
        debug!("loading uEye SDK from {path}");
        // SAFETY: libueye_api runs no initialisation code with preconditions.
        let library = unsafe { Library::new(path) }
            .map_err(|err| CameraError::LibraryLoad(err.to_string()))?;

        // SAFETY: the symbol types match the prototypes declared in ueye.h.
        unsafe {
            let pixel_clock = *library
                .get::<IsPixelClock>(b"is_PixelClock\0")
                .map_err(|err| CameraError::LibraryLoad(err.to_string()))?;
            let exposure = *library
                .get::<IsExposure>(b"is_Exposure\0")
                .map_err(|err| CameraError::LibraryLoad(err.to_string()))?;
            let set_color_mode = *library
                .get::<IsSetColorMode>(b"is_SetColorMode\0")
                .map_err(|err| CameraError::LibraryLoad(err.to_string()))?;
            let set_hardware_gain = *library
                .get::<IsSetHardwareGain>(b"is_SetHardwareGain\0")
                .map_err(|err| CameraError::LibraryLoad(err.to_string()))?;

            Ok(Self {
                _library: library,
                pixel_clock,
                exposure,
                set_color_mode,
                set_hardware_gain,
            })
        }
    }
}

impl UeyeDriver for UeyeLibrary {
    fn pixel_clock(
        &mut self,
        handle: DeviceHandle,
        command: PixelClockCommand,
        param: &mut u32,
    ) -> StatusCode {
        // SAFETY: `param` is a live UINT and its exact size is passed along.
        let ret = unsafe {
            (self.pixel_clock)(
                handle.as_raw(),
                command as u32,
                std::ptr::from_mut(param).cast(),
                param_size::<u32>(),
            )
        };
        StatusCode(ret)
    }

    fn exposure(
        &mut self,
        handle: DeviceHandle,
        command: ExposureCommand,
        param: &mut f64,
    ) -> StatusCode {
        // SAFETY: `param` is a live double and its exact size is passed along.
        let ret = unsafe {
            (self.exposure)(
                handle.as_raw(),
                command as u32,
                std::ptr::from_mut(param).cast(),
                param_size::<f64>(),
            )
        };
        StatusCode(ret)
    }

    fn set_color_mode(&mut self, handle: DeviceHandle, mode: i32) -> i32 {
        // SAFETY: scalar arguments only.
        unsafe { (self.set_color_mode)(handle.as_raw(), mode) }
    }

    fn set_hardware_gain(
        &mut self,
        handle: DeviceHandle,
        master: i32,
        red: i32,
        green: i32,
        blue: i32,
    ) -> i32 {
        // SAFETY: scalar arguments only.
        unsafe { (self.set_hardware_gain)(handle.as_raw(), master, red, green, blue) }
    }
}
