//! pixelfind locates a small reference image inside a larger one.
//!
//! Pixels are compared one by one under a tolerance, on a subsampled grid,
//! and the search area is split into four overlapping quadrants that are
//! scanned in parallel when the `rayon` feature is enabled (the default).
//! Zero-alpha pixels act as wildcards, so a target can mask out regions it
//! does not care about.

pub mod buffer;
pub mod compare;
pub mod lowlevel;
pub mod pixel;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use buffer::io;
pub use buffer::{ExternalImage, PixelBuffer, Rect};
pub use compare::ColorComparator;
pub use pixel::Argb;
pub use search::{
    find, find_all, spawn_find, spawn_find_all, CancelToken, FindConfig, Finder, Match,
    SearchHandle,
};
pub use util::{FindError, FindResult};
