//! Unit conversion utilities.
//!
//! DrawingML stores lengths in English Metric Units (EMU) and angles in
//! 60 000ths of a degree. Everything the generators emit is in pixels.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const ANGLE_UNITS_PER_DEGREE: i64 = 60_000;
/// Adjustment handles on round/snip rectangles are expressed in 1/50 000ths
/// of the half-extent.
pub const ADJUST_UNITS_PER_FACTOR: f64 = 50_000.0;
pub const DEFAULT_DPI: u32 = 96;

/// Pixels per EMU at the given DPI.
#[inline]
pub fn px_per_emu(dpi: u32) -> f64 {
    dpi as f64 / EMUS_PER_INCH as f64
}

/// Convert a stored angle to whole degrees.
///
/// Rounds to the nearest degree; `None` yields 0.
#[inline]
pub fn angle_to_degrees(angle: Option<i64>) -> f64 {
    match angle {
        Some(a) => (a as f64 / ANGLE_UNITS_PER_DEGREE as f64).round(),
        None => 0.0,
    }
}

/// Convert a stored angle to fractional degrees, used for adjustment
/// handles where sub-degree precision matters.
#[inline]
pub fn angle_units_to_degrees(angle: i64) -> f64 {
    angle as f64 / ANGLE_UNITS_PER_DEGREE as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_to_degrees() {
        assert_eq!(angle_to_degrees(None), 0.0);
        assert_eq!(angle_to_degrees(Some(5_400_000)), 90.0);
        assert_eq!(angle_to_degrees(Some(2_729_999)), 45.0);
        assert_eq!(angle_to_degrees(Some(-5_400_000)), -90.0);
    }

    #[test]
    fn test_px_per_emu() {
        assert!((EMUS_PER_INCH as f64 * px_per_emu(96) - 96.0).abs() < 1e-9);
        assert!((12_700.0 * px_per_emu(72) - 1.0).abs() < 1e-9);
    }
}
