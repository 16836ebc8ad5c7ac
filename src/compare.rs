//! Pixel comparison under a tolerance.
//!
//! Policy, applied in order:
//! 1. If either pixel has alpha `0` the pair matches (wildcard).
//! 2. With `tolerance <= 0` all four channels must be equal.
//! 3. Otherwise the HSL lightness of the two pixels may differ by at most
//!    `tolerance`, both lightness values lying in `[0, 1]`.

use crate::pixel::Argb;

/// Decides whether two pixels match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorComparator {
    tolerance: f32,
}

impl ColorComparator {
    /// Negative and NaN tolerances behave like `0` (exact match).
    pub fn new(tolerance: f32) -> Self {
        let tolerance = if tolerance.is_nan() { 0.0 } else { tolerance };
        Self { tolerance }
    }

    /// Exact comparator.
    pub fn exact() -> Self {
        Self::new(0.0)
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    #[inline]
    pub fn matches(&self, a: Argb, b: Argb) -> bool {
        if a.is_transparent() || b.is_transparent() {
            return true;
        }
        if self.tolerance <= 0.0 {
            return a == b;
        }
        (a.brightness() - b.brightness()).abs() <= self.tolerance
    }
}

impl Default for ColorComparator {
    fn default() -> Self {
        Self::exact()
    }
}
