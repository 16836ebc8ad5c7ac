//! Owned pixel buffers and rectangles.
//!
//! `PixelBuffer` stores packed ARGB pixels row-major in one contiguous
//! vector with `stride == width`, so pixel `(x, y)` lives at
//! `x + y * width`. Dimensions are fixed at construction; pixel values can be
//! rewritten in place. Checked accessors return `FindError::OutOfBounds`
//! instead of touching a neighbouring row.

use crate::pixel::Argb;
use crate::util::math::overlap_1d;
use crate::util::{FindError, FindResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod overlay;

/// Axis-aligned rectangle used both for search areas and match results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, saturating at `u32::MAX`.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` when `other` lies fully inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Area of the intersection with `other`.
    pub fn intersection_area(&self, other: &Rect) -> u64 {
        let w = overlap_1d(self.x, self.right(), other.x, other.right());
        let h = overlap_1d(self.y, self.bottom(), other.y, other.bottom());
        u64::from(w) * u64::from(h)
    }

    /// Intersection over union in `[0, 1]`; zero when either side is empty.
    pub fn iou(&self, other: &Rect) -> f32 {
        let inter = self.intersection_area(other);
        let union = self.area() + other.area() - inter;
        if union == 0 {
            return 0.0;
        }
        inter as f32 / union as f32
    }
}

/// Opaque image source that can be converted into a `PixelBuffer`.
///
/// Pixel format conversion is the implementor's job; the buffer only copies
/// the packed values it is handed.
pub trait ExternalImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Pixel at `(x, y)`; only called with in-range coordinates.
    fn pixel(&self, x: u32, y: u32) -> Argb;
}

/// Owned, contiguous ARGB image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Argb>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Creates a zero-filled (fully transparent) buffer.
    pub fn new(width: u32, height: u32) -> FindResult<Self> {
        Self::filled(width, height, Argb::TRANSPARENT)
    }

    /// Creates a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Argb) -> FindResult<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            pixels: vec![color; len],
            width,
            height,
        })
    }

    /// Wraps a row-major pixel vector of exactly `width * height` entries.
    pub fn from_pixels(pixels: Vec<Argb>, width: u32, height: u32) -> FindResult<Self> {
        let needed = pixel_count(width, height)?;
        if pixels.len() != needed {
            return Err(FindError::BufferSizeMismatch {
                needed,
                got: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Copies an external image into a new buffer.
    pub fn from_source<I: ExternalImage + ?Sized>(source: &I) -> FindResult<Self> {
        let width = source.width();
        let height = source.height();
        let mut pixels = Vec::with_capacity(pixel_count(width, height)?);
        for y in 0..height {
            for x in 0..width {
                pixels.push(source.pixel(x, y));
            }
        }
        Self::from_pixels(pixels, width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full-buffer rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Row-major backing slice.
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Argb] {
        &mut self.pixels
    }

    /// Returns the pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> FindResult<Argb> {
        let idx = self.index(x, y)?;
        Ok(self.pixels[idx])
    }

    /// Overwrites the pixel at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, color: Argb) -> FindResult<()> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = color;
        Ok(())
    }

    /// Returns row `y` as a slice of `width` pixels.
    pub fn row(&self, y: u32) -> Option<&[Argb]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.pixels.get(start..start + self.width as usize)
    }

    /// Copies the pixels under `rect` into a new buffer.
    pub fn crop(&self, rect: Rect) -> FindResult<PixelBuffer> {
        if rect.is_empty() {
            return Err(FindError::InvalidDimensions {
                width: rect.width,
                height: rect.height,
            });
        }
        if !self.bounds().contains(&rect) {
            return Err(FindError::AreaOutOfBounds {
                area: rect,
                width: self.width,
                height: self.height,
            });
        }
        let mut pixels = Vec::with_capacity(pixel_count(rect.width, rect.height)?);
        for y in rect.y..rect.bottom() {
            let row = self.row(y).ok_or(FindError::OutOfBounds {
                x: rect.x,
                y,
                width: self.width,
                height: self.height,
            })?;
            pixels.extend_from_slice(&row[rect.x as usize..rect.right() as usize]);
        }
        Self::from_pixels(pixels, rect.width, rect.height)
    }

    /// Copies `patch` into this buffer with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, patch: &PixelBuffer, x: u32, y: u32) -> FindResult<()> {
        let dst = Rect::new(x, y, patch.width, patch.height);
        if !self.bounds().contains(&dst) {
            return Err(FindError::AreaOutOfBounds {
                area: dst,
                width: self.width,
                height: self.height,
            });
        }
        let width = self.width as usize;
        for (py, src_row) in patch.pixels.chunks_exact(patch.width as usize).enumerate() {
            let start = (y as usize + py) * width + x as usize;
            self.pixels[start..start + src_row.len()].copy_from_slice(src_row);
        }
        Ok(())
    }

    /// Coarse 16x16 brightness fingerprint.
    ///
    /// The buffer is sampled nearest-neighbour onto a 16x16 grid; each cell
    /// becomes `1` when its lightness is below one half and `0` otherwise.
    /// Cells are emitted row-major, separated by `", "`.
    pub fn signature(&self) -> String {
        const CELLS: u32 = 16;
        let mut bits = Vec::with_capacity((CELLS * CELLS) as usize);
        for cy in 0..CELLS {
            let y = (u64::from(cy) * u64::from(self.height) / u64::from(CELLS)) as usize;
            for cx in 0..CELLS {
                let x = (u64::from(cx) * u64::from(self.width) / u64::from(CELLS)) as usize;
                let pixel = self.pixels[x + y * self.width as usize];
                bits.push(if pixel.brightness() < 0.5 { "1" } else { "0" });
            }
        }
        bits.join(", ")
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> FindResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(FindError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x as usize + y as usize * self.width as usize)
    }

    /// Unchecked-by-contract lookup for scan loops that validated their range.
    #[inline]
    pub(crate) fn at(&self, x: u32, y: u32) -> Argb {
        self.pixels[x as usize + y as usize * self.width as usize]
    }
}

fn pixel_count(width: u32, height: u32) -> FindResult<usize> {
    if width == 0 || height == 0 {
        return Err(FindError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(FindError::InvalidDimensions { width, height })
}
