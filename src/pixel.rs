//! Packed 32-bit ARGB colors.

/// A pixel packed as `0xAARRGGBB`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully transparent black; matches anything under the wildcard rule.
    pub const TRANSPARENT: Argb = Argb(0);
    pub const BLACK: Argb = Argb(0xFF00_0000);
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);
    pub const RED: Argb = Argb(0xFFFF_0000);

    /// Packs the four channels.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xFF, r, g, b)
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Returns `true` when the alpha channel is zero.
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// HSL lightness in `[0, 1]`: the mean of the largest and smallest RGB
    /// channel. Alpha is ignored.
    pub fn brightness(self) -> f32 {
        let (r, g, b) = (self.r(), self.g(), self.b());
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        (f32::from(max) + f32::from(min)) / (2.0 * 255.0)
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Argb(value)
    }
}

impl From<Argb> for u32 {
    fn from(value: Argb) -> Self {
        value.0
    }
}

impl From<[u8; 4]> for Argb {
    /// Converts from `[r, g, b, a]` channel order as used by RGBA images.
    fn from(rgba: [u8; 4]) -> Self {
        Argb::new(rgba[3], rgba[0], rgba[1], rgba[2])
    }
}

impl From<Argb> for [u8; 4] {
    fn from(value: Argb) -> Self {
        [value.r(), value.g(), value.b(), value.a()]
    }
}
