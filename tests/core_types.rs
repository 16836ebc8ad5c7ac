use pixelfind::{Argb, ExternalImage, FindError, PixelBuffer, Rect};

#[test]
fn pixel_buffer_rejects_zero_dimensions() {
    let err = PixelBuffer::new(0, 3).err().unwrap();
    assert_eq!(
        err,
        FindError::InvalidDimensions {
            width: 0,
            height: 3,
        }
    );
}

#[test]
fn pixel_buffer_starts_zero_filled() {
    let buf = PixelBuffer::new(3, 2).unwrap();
    assert_eq!(buf.pixels().len(), 6);
    assert!(buf.pixels().iter().all(|p| *p == Argb::TRANSPARENT));
}

#[test]
fn from_pixels_checks_length() {
    let err = PixelBuffer::from_pixels(vec![Argb::BLACK; 5], 2, 3)
        .err()
        .unwrap();
    assert_eq!(err, FindError::BufferSizeMismatch { needed: 6, got: 5 });
}

#[test]
fn get_and_set_use_row_major_layout() {
    let mut buf = PixelBuffer::new(4, 3).unwrap();
    buf.set(3, 1, Argb::RED).unwrap();
    assert_eq!(buf.pixels()[3 + 4], Argb::RED);
    assert_eq!(buf.get(3, 1).unwrap(), Argb::RED);
    assert_eq!(buf.row(1).unwrap()[3], Argb::RED);
    assert!(buf.row(3).is_none());
}

#[test]
fn out_of_range_access_is_an_error_not_a_neighbour() {
    let mut buf = PixelBuffer::filled(4, 3, Argb::WHITE).unwrap();
    // x == width would alias (0, y + 1) in the flat vector.
    let err = buf.get(4, 0).err().unwrap();
    assert_eq!(
        err,
        FindError::OutOfBounds {
            x: 4,
            y: 0,
            width: 4,
            height: 3,
        }
    );
    assert!(buf.set(0, 3, Argb::BLACK).is_err());
    assert!(buf.pixels().iter().all(|p| *p == Argb::WHITE));
}

struct Gradient;

impl ExternalImage for Gradient {
    fn width(&self) -> u32 {
        5
    }

    fn height(&self) -> u32 {
        2
    }

    fn pixel(&self, x: u32, y: u32) -> Argb {
        Argb::rgb(x as u8 * 10, y as u8, 0)
    }
}

#[test]
fn from_source_copies_external_pixels() {
    let buf = PixelBuffer::from_source(&Gradient).unwrap();
    assert_eq!((buf.width(), buf.height()), (5, 2));
    assert_eq!(buf.get(4, 1).unwrap(), Argb::rgb(40, 1, 0));
}

#[test]
fn crop_rejects_regions_outside_the_buffer() {
    let buf = PixelBuffer::new(10, 10).unwrap();
    let err = buf.crop(Rect::new(8, 8, 4, 4)).err().unwrap();
    assert_eq!(
        err,
        FindError::AreaOutOfBounds {
            area: Rect::new(8, 8, 4, 4),
            width: 10,
            height: 10,
        }
    );
}

#[test]
fn rect_containment_and_edges() {
    let outer = Rect::new(2, 3, 10, 10);
    assert_eq!((outer.right(), outer.bottom()), (12, 13));
    assert!(outer.contains(&Rect::new(2, 3, 10, 10)));
    assert!(!outer.contains(&Rect::new(1, 3, 2, 2)));
}
