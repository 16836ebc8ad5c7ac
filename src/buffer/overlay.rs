//! Rectangle outline renderer.
//!
//! Drawing mutates the buffer. A search borrows its source immutably, so the
//! borrow checker already serializes overlay writes against in-flight scans
//! on the same buffer; callers sharing a buffer through `Arc` must clone it
//! or wait for the search handle before drawing.

use crate::buffer::{PixelBuffer, Rect};
use crate::pixel::Argb;

impl PixelBuffer {
    /// Draws the outline of `rect` inward with the given `thickness`.
    ///
    /// Parts of the outline falling outside the buffer are clipped. A
    /// thickness of zero is treated as one.
    pub fn draw_rect(&mut self, rect: Rect, color: Argb, thickness: u32) {
        if rect.is_empty() {
            return;
        }
        let t = thickness.max(1);
        let x1 = rect.right().min(self.width());
        let y1 = rect.bottom().min(self.height());
        if rect.x >= x1 || rect.y >= y1 {
            return;
        }
        let inner_x0 = rect.x.saturating_add(t);
        let inner_y0 = rect.y.saturating_add(t);
        let inner_x1 = rect.right().saturating_sub(t);
        let inner_y1 = rect.bottom().saturating_sub(t);
        let width = self.width() as usize;
        let pixels = self.pixels_mut();
        for y in rect.y..y1 {
            let on_band = y < inner_y0 || y >= inner_y1;
            let row = &mut pixels[y as usize * width..(y as usize + 1) * width];
            for x in rect.x..x1 {
                if on_band || x < inner_x0 || x >= inner_x1 {
                    row[x as usize] = color;
                }
            }
        }
    }

    /// Draws every rectangle in `rects` with the same style.
    pub fn draw_rects<'a, I>(&mut self, rects: I, color: Argb, thickness: u32)
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        for rect in rects {
            self.draw_rect(*rect, color, thickness);
        }
    }
}
