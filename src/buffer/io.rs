//! Loading and saving buffers via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::buffer::{ExternalImage, PixelBuffer};
use crate::pixel::Argb;
use crate::util::{FindError, FindResult};
use std::path::Path;

impl ExternalImage for image::RgbaImage {
    fn width(&self) -> u32 {
        image::RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        image::RgbaImage::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Argb {
        Argb::from(self.get_pixel(x, y).0)
    }
}

/// Creates a buffer from an RGBA image.
pub fn buffer_from_rgba_image(img: &image::RgbaImage) -> FindResult<PixelBuffer> {
    PixelBuffer::from_source(img)
}

/// Converts any decoded image to RGBA and copies it into a buffer.
pub fn buffer_from_dynamic_image(img: &image::DynamicImage) -> FindResult<PixelBuffer> {
    buffer_from_rgba_image(&img.to_rgba8())
}

/// Converts a buffer back into an RGBA image.
pub fn rgba_image_from_buffer(buf: &PixelBuffer) -> FindResult<image::RgbaImage> {
    let raw: Vec<u8> = buf
        .pixels()
        .iter()
        .flat_map(|p| <[u8; 4]>::from(*p))
        .collect();
    image::RgbaImage::from_raw(buf.width(), buf.height(), raw).ok_or(
        FindError::BufferSizeMismatch {
            needed: buf.pixels().len() * 4,
            got: 0,
        },
    )
}

/// Loads an image from disk into a buffer.
pub fn load_buffer<P: AsRef<Path>>(path: P) -> FindResult<PixelBuffer> {
    let img = image::open(path).map_err(|err| FindError::ImageIo {
        reason: err.to_string(),
    })?;
    buffer_from_dynamic_image(&img)
}

/// Saves a buffer to disk; the format follows the file extension.
pub fn save_buffer<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> FindResult<()> {
    rgba_image_from_buffer(buf)?
        .save(path)
        .map_err(|err| FindError::ImageIo {
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{buffer_from_rgba_image, rgba_image_from_buffer};
    use crate::pixel::Argb;

    #[test]
    fn rgba_channels_survive_conversion() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(1, 0, image::Rgba([10, 20, 30, 40]));
        let buf = buffer_from_rgba_image(&img).unwrap();
        assert_eq!(buf.get(1, 0).unwrap(), Argb::new(40, 10, 20, 30));
        assert_eq!(rgba_image_from_buffer(&buf).unwrap(), img);
    }
}
