//! Integer helpers for rectangle arithmetic.

/// Length of the overlap between `[a0, a1)` and `[b0, b1)`.
pub(crate) fn overlap_1d(a0: u32, a1: u32, b0: u32, b1: u32) -> u32 {
    a1.min(b1).saturating_sub(a0.max(b0))
}

/// Number of whole target-sized tiles that fit along an axis.
pub(crate) fn tiles(extent: u32, tile: u32) -> u64 {
    if tile == 0 {
        return 0;
    }
    u64::from(extent / tile)
}

#[cfg(test)]
mod tests {
    use super::{overlap_1d, tiles};

    #[test]
    fn overlap_handles_disjoint_and_nested_ranges() {
        assert_eq!(overlap_1d(0, 4, 4, 8), 0);
        assert_eq!(overlap_1d(0, 10, 2, 5), 3);
        assert_eq!(overlap_1d(3, 9, 0, 5), 2);
    }

    #[test]
    fn tiles_floors_and_guards_zero() {
        assert_eq!(tiles(17, 4), 4);
        assert_eq!(tiles(3, 4), 0);
        assert_eq!(tiles(10, 0), 0);
    }
}
