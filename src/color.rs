//! uEye color mode enumerants and their pixel bitdepths.

/// `IS_CM_BGRA8_PACKED`
pub const BGRA8_PACKED: i32 = 0;
/// `IS_CM_BGR8_PACKED`
pub const BGR8_PACKED: i32 = 1;
/// `IS_CM_BGR565_PACKED`
pub const BGR565_PACKED: i32 = 2;
/// `IS_CM_BGR5_PACKED`
pub const BGR5_PACKED: i32 = 3;
/// `IS_CM_MONO8`
pub const MONO8: i32 = 6;
/// `IS_CM_SENSOR_RAW8`
pub const SENSOR_RAW8: i32 = 11;
/// `IS_CM_UYVY_PACKED`
pub const UYVY_PACKED: i32 = 12;
/// `IS_CM_BGRY8_PACKED`
pub const BGRY8_PACKED: i32 = 24;
/// `IS_CM_BGR10_PACKED`
pub const BGR10_PACKED: i32 = 25;
/// `IS_CM_MONO12`
pub const MONO12: i32 = 26;
/// `IS_CM_SENSOR_RAW12`
pub const SENSOR_RAW12: i32 = 27;
/// `IS_CM_MONO16`
pub const MONO16: i32 = 28;
/// `IS_CM_SENSOR_RAW16`
pub const SENSOR_RAW16: i32 = 29;
/// `IS_CM_RGBA8_PACKED`
pub const RGBA8_PACKED: i32 = 128;
/// `IS_CM_RGB8_PACKED`
pub const RGB8_PACKED: i32 = 129;
/// `IS_CM_RGBY8_PACKED`
pub const RGBY8_PACKED: i32 = 152;
/// `IS_CM_RGB10_PACKED`
pub const RGB10_PACKED: i32 = 153;

/// Bits per pixel produced by a color mode, or 0 for an unknown mode.
#[must_use]
pub const fn color_to_bitdepth(mode: i32) -> u32 {
    match mode {
        MONO8 | SENSOR_RAW8 => 8,
        MONO12 | MONO16 | SENSOR_RAW12 | SENSOR_RAW16 | BGR5_PACKED | BGR565_PACKED
        | UYVY_PACKED => 16,
        BGR8_PACKED | RGB8_PACKED => 24,
        BGRA8_PACKED | RGBA8_PACKED | BGRY8_PACKED | RGBY8_PACKED | BGR10_PACKED
        | RGB10_PACKED => 32,
        _ => 0,
    }
}
