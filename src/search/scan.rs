//! Sliding-window scan over one rectangular area.
//!
//! Every top-left placement inside the area is visited row-major. A window
//! is tested on a subsampled grid (every `SAMPLE_STRIDE`-th row and column of
//! the target) and rejected at the first mismatching sample.
//!
//! After a hit the scan jumps `target.width` columns to the right, and a row
//! that produced any hit is followed by a jump of `target.height` rows. This
//! suppresses repeated reports of one occurrence; a second true occurrence
//! overlapping the first can be skipped as a result.
//!
//! Skip-ahead also means raising the tolerance does not only add hits. A
//! looser comparator can accept an earlier window in the same row, and the
//! jump that follows may step over an occurrence the exact scan reported.

use crate::buffer::{PixelBuffer, Rect};
use crate::compare::ColorComparator;
use crate::search::cancel::CancelToken;
use crate::util::{FindError, FindResult};

/// Row and column step of the sampled comparison grid.
pub const SAMPLE_STRIDE: usize = 4;

/// Checks that `target` fits inside `area` and `area` lies inside `source`.
pub(crate) fn validate_area(
    source: &PixelBuffer,
    target: &PixelBuffer,
    area: Rect,
) -> FindResult<()> {
    if area.width < target.width() || area.height < target.height() {
        return Err(FindError::AreaTooSmall {
            area_width: area.width,
            area_height: area.height,
            target_width: target.width(),
            target_height: target.height(),
        });
    }
    if !source.bounds().contains(&area) {
        return Err(FindError::AreaOutOfBounds {
            area,
            width: source.width(),
            height: source.height(),
        });
    }
    Ok(())
}

/// Lazy, single-pass sequence of matches inside one area.
///
/// Ends when the area is exhausted or the cancel token is observed; a
/// cancelled scan simply stops yielding.
pub struct Scan<'a> {
    source: &'a PixelBuffer,
    target: &'a PixelBuffer,
    cmp: ColorComparator,
    cancel: CancelToken,
    x0: u32,
    x_max: u32,
    y_max: u32,
    x: u32,
    y: u32,
    row_hit: bool,
    done: bool,
    windows: u64,
}

impl<'a> Scan<'a> {
    /// Validates the area and prepares a scan; no pixels are compared yet.
    pub fn new(
        source: &'a PixelBuffer,
        target: &'a PixelBuffer,
        area: Rect,
        cmp: ColorComparator,
        cancel: CancelToken,
    ) -> FindResult<Self> {
        validate_area(source, target, area)?;
        Ok(Self {
            source,
            target,
            cmp,
            cancel,
            x0: area.x,
            x_max: area.right() - target.width(),
            y_max: area.bottom() - target.height(),
            x: area.x,
            y: area.y,
            row_hit: false,
            done: false,
            windows: 0,
        })
    }

    /// Number of candidate windows on which at least one sample was compared.
    pub fn windows_tested(&self) -> u64 {
        self.windows
    }

    /// `Some(true)` on a match, `None` when cancellation interrupted the test.
    fn window_matches(&mut self, x: u32, y: u32) -> Option<bool> {
        let tw = self.target.width();
        let th = self.target.height();
        for ty in (0..th).step_by(SAMPLE_STRIDE) {
            if self.cancel.is_cancelled() {
                return None;
            }
            if ty == 0 {
                self.windows += 1;
            }
            for tx in (0..tw).step_by(SAMPLE_STRIDE) {
                let s = self.source.at(x + tx, y + ty);
                let t = self.target.at(tx, ty);
                if !self.cmp.matches(s, t) {
                    return Some(false);
                }
            }
        }
        Some(true)
    }
}

impl Iterator for Scan<'_> {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        while !self.done {
            if self.y > self.y_max {
                self.done = true;
                break;
            }
            if self.x > self.x_max {
                let step = if self.row_hit { self.target.height() } else { 1 };
                self.y = self.y.saturating_add(step.max(1));
                self.x = self.x0;
                self.row_hit = false;
                continue;
            }

            let (x, y) = (self.x, self.y);
            match self.window_matches(x, y) {
                None => {
                    self.done = true;
                }
                Some(true) => {
                    self.row_hit = true;
                    self.x = x.saturating_add(self.target.width());
                    return Some(Rect::new(x, y, self.target.width(), self.target.height()));
                }
                Some(false) => {
                    self.x = x + 1;
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Scan<'_> {}

#[cfg(test)]
mod tests {
    use super::Scan;
    use crate::buffer::{PixelBuffer, Rect};
    use crate::compare::ColorComparator;
    use crate::pixel::Argb;
    use crate::search::cancel::CancelToken;
    use crate::util::FindError;

    fn patterned(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let v = ((x * 13) ^ (y * 7) ^ (x * y)) as u8;
                buf.set(x, y, Argb::rgb(v, v.wrapping_mul(3), 255 - v)).unwrap();
            }
        }
        buf
    }

    #[test]
    fn finds_verbatim_patch() {
        let source = patterned(40, 30);
        let target = source.crop(Rect::new(17, 9, 8, 6)).unwrap();
        let hits: Vec<Rect> = Scan::new(
            &source,
            &target,
            source.bounds(),
            ColorComparator::exact(),
            CancelToken::new(),
        )
        .unwrap()
        .collect();
        assert!(hits.contains(&Rect::new(17, 9, 8, 6)));
    }

    #[test]
    fn rejects_area_smaller_than_target() {
        let source = patterned(20, 20);
        let target = PixelBuffer::new(8, 8).unwrap();
        let err = Scan::new(
            &source,
            &target,
            Rect::new(0, 0, 7, 20),
            ColorComparator::exact(),
            CancelToken::new(),
        )
        .err()
        .unwrap();
        assert_eq!(
            err,
            FindError::AreaTooSmall {
                area_width: 7,
                area_height: 20,
                target_width: 8,
                target_height: 8,
            }
        );
    }

    #[test]
    fn rejects_area_outside_source() {
        let source = patterned(20, 20);
        let target = PixelBuffer::new(4, 4).unwrap();
        let err = Scan::new(
            &source,
            &target,
            Rect::new(10, 10, 12, 12),
            ColorComparator::exact(),
            CancelToken::new(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, FindError::AreaOutOfBounds { .. }));
    }

    #[test]
    fn skip_ahead_reports_each_tile_once() {
        // A uniform source matches everywhere; skip-ahead tiles it.
        let source = PixelBuffer::filled(12, 8, Argb::RED).unwrap();
        let target = PixelBuffer::filled(4, 4, Argb::RED).unwrap();
        let hits: Vec<Rect> = Scan::new(
            &source,
            &target,
            source.bounds(),
            ColorComparator::exact(),
            CancelToken::new(),
        )
        .unwrap()
        .collect();
        assert_eq!(
            hits,
            vec![
                Rect::new(0, 0, 4, 4),
                Rect::new(4, 0, 4, 4),
                Rect::new(8, 0, 4, 4),
                Rect::new(0, 4, 4, 4),
                Rect::new(4, 4, 4, 4),
                Rect::new(8, 4, 4, 4),
            ]
        );
    }

    #[test]
    fn cancelled_scan_yields_nothing() {
        let source = PixelBuffer::filled(16, 16, Argb::RED).unwrap();
        let target = PixelBuffer::filled(4, 4, Argb::RED).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut scan = Scan::new(
            &source,
            &target,
            source.bounds(),
            ColorComparator::exact(),
            cancel,
        )
        .unwrap();
        assert_eq!(scan.next(), None);
        assert_eq!(scan.next(), None);
    }

    #[test]
    fn subsampling_ignores_unsampled_pixels() {
        let mut source = PixelBuffer::filled(8, 8, Argb::WHITE).unwrap();
        let target = PixelBuffer::filled(8, 8, Argb::WHITE).unwrap();
        // (1, 1) is not on the stride-4 grid.
        source.set(1, 1, Argb::BLACK).unwrap();
        let mut scan = Scan::new(
            &source,
            &target,
            source.bounds(),
            ColorComparator::exact(),
            CancelToken::new(),
        )
        .unwrap();
        assert_eq!(scan.next(), Some(Rect::new(0, 0, 8, 8)));
        assert_eq!(scan.windows_tested(), 1);
    }

    #[test]
    fn hits_taken_before_cancellation_are_kept() {
        let source = PixelBuffer::filled(32, 8, Argb::RED).unwrap();
        let target = PixelBuffer::filled(8, 8, Argb::RED).unwrap();
        let cancel = CancelToken::new();
        let mut scan = Scan::new(
            &source,
            &target,
            source.bounds(),
            ColorComparator::exact(),
            cancel.clone(),
        )
        .unwrap();

        let first = scan.next();
        cancel.cancel();
        let rest: Vec<Rect> = scan.by_ref().collect();

        assert_eq!(first, Some(Rect::new(0, 0, 8, 8)));
        assert!(rest.is_empty());
        assert_eq!(scan.next(), None);
        assert_eq!(scan.windows_tested(), 1);
    }

    #[test]
    fn looser_tolerance_can_step_over_an_exact_hit() {
        let mut source = PixelBuffer::filled(40, 8, Argb::WHITE).unwrap();
        let mut target = PixelBuffer::new(8, 8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let v = (x * 29 + y * 7) as u8;
                target.set(x, y, Argb::rgb(v, 0, 255 - v)).unwrap();
            }
        }
        source.blit(&target, 5, 0).unwrap();

        let run = |tolerance: f32| -> Vec<Rect> {
            Scan::new(
                &source,
                &target,
                source.bounds(),
                ColorComparator::new(tolerance),
                CancelToken::new(),
            )
            .unwrap()
            .collect()
        };

        assert_eq!(run(0.0), vec![Rect::new(5, 0, 8, 8)]);
        let loose = run(1.0);
        assert_eq!(loose.len(), 5);
        assert!(!loose.contains(&Rect::new(5, 0, 8, 8)));
    }
}
