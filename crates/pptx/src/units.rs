//! DrawingML length units.

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// English Metric Units per point.
pub const EMU_PER_POINT: i64 = 12_700;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert inches, rounding to the nearest EMU.
    pub fn inches(value: f64) -> Self {
        Self((value * EMU_PER_INCH as f64).round() as i64)
    }

    /// Convert points, rounding to the nearest EMU.
    pub fn points(value: f64) -> Self {
        Self((value * EMU_PER_POINT as f64).round() as i64)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

/// Font size in hundredths of a point, as used by `a:rPr/@sz`.
pub fn font_size_attr(points: f64) -> u32 {
    (points * 100.0).round() as u32
}
