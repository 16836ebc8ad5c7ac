//! Building blocks for custom search pipelines.
//!
//! Most callers should use `Finder`; these items expose the single-area
//! scan, the quadrant planner and the seam merge pass on their own.

pub use crate::search::{merge_overlapping, plan_quadrants, Scan, SAMPLE_STRIDE};
