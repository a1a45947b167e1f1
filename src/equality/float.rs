//! Tolerant comparison of floating-point values
//!
//! Two floating-point values that are "the same" may differ in their least
//! significant bits after arithmetic. They are considered equal when their
//! difference is within an epsilon that scales with the smaller magnitude
//! of the two, but never drops below the resolution of the precision.

use super::Precision;

/// Multiplier applied to the machine resolution of each precision
pub const FUZZ_FACTOR: f64 = 1000.0;

pub const SINGLE_RESOLUTION: f64 = 1e-7 * FUZZ_FACTOR;
pub const DOUBLE_RESOLUTION: f64 = 1e-15 * FUZZ_FACTOR;
pub const EXTENDED_RESOLUTION: f64 = 1e-19 * FUZZ_FACTOR;

impl Precision {
    /// The smallest epsilon used for comparisons at this precision
    pub const fn resolution(self) -> f64 {
        match self {
            Precision::Single => SINGLE_RESOLUTION,
            Precision::Double => DOUBLE_RESOLUTION,
            Precision::Extended => EXTENDED_RESOLUTION,
        }
    }
}

/// The tolerance for comparing `x` and `y` at the given precision
pub fn epsilon(x: f64, y: f64, precision: Precision) -> f64 {
    let resolution = precision.resolution();
    (x.abs().min(y.abs()) * resolution).max(resolution)
}

/// Whether `x` and `y` are the same value up to representation noise
///
/// Identical values are always the same, which includes equal infinities.
/// An infinity is the same as nothing but itself, and NaN is never the same
/// as anything.
pub fn same_value(x: f64, y: f64, precision: Precision) -> bool {
    if x == y {
        return true;
    }
    if x.is_infinite() || y.is_infinite() {
        return false;
    }
    (x - y).abs() <= epsilon(x, y, precision)
}
