//! Locating a target buffer inside a source buffer.
//!
//! `Finder` is the entry point: it holds the target and a `FindConfig`, and
//! runs either a first-match or an all-matches search through the quadrant
//! scheduler. `Scan` exposes the underlying single-area iterator.
//!
//! Source and target are only read during a search. Drawing onto a source
//! that a background search still reads must wait for that search.

pub(crate) mod cancel;
pub(crate) mod handle;
pub(crate) mod merge;
pub(crate) mod quadrant;
pub(crate) mod scan;

use crate::buffer::{PixelBuffer, Rect};
use crate::compare::ColorComparator;
use crate::util::FindResult;
use quadrant::{find_all_in, find_first_in, Job};

/// A located occurrence of the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Position and size of the occurrence in source coordinates.
    pub rect: Rect,
    /// Quadrant (0..4, row-major) whose worker found it; `None` when the area
    /// was scanned without being split.
    pub quadrant: Option<usize>,
}

/// Search configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FindConfig {
    /// Region of the source to search; `None` searches the whole source.
    pub area: Option<Rect>,
    /// `0` for exact matching, otherwise the allowed lightness difference.
    pub tolerance: f32,
    /// Scan quadrants concurrently (requires the `rayon` feature).
    pub parallel: bool,
    /// When set, all-matches results are passed through
    /// `merge_overlapping` with this IoU threshold.
    pub merge_iou: Option<f32>,
}

impl Default for FindConfig {
    fn default() -> Self {
        Self {
            area: None,
            tolerance: 0.0,
            parallel: true,
            merge_iou: None,
        }
    }
}

/// Searches a source buffer for one target.
pub struct Finder<'t> {
    target: &'t PixelBuffer,
    cfg: FindConfig,
}

impl<'t> Finder<'t> {
    pub fn new(target: &'t PixelBuffer) -> Self {
        Self {
            target,
            cfg: FindConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: FindConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &FindConfig {
        &self.cfg
    }

    fn job<'a>(&'a self, source: &'a PixelBuffer) -> Job<'a> {
        Job {
            source,
            target: self.target,
            cmp: ColorComparator::new(self.cfg.tolerance),
            parallel: self.cfg.parallel,
        }
    }

    fn area(&self, source: &PixelBuffer) -> Rect {
        self.cfg.area.unwrap_or_else(|| source.bounds())
    }

    /// Returns the first occurrence found, or `None`.
    pub fn find(&self, source: &PixelBuffer) -> FindResult<Option<Match>> {
        self.find_with_cancel(source, &CancelToken::new())
    }

    /// Like [`Finder::find`]; a search cancelled before any hit returns
    /// `Ok(None)`.
    pub fn find_with_cancel(
        &self,
        source: &PixelBuffer,
        cancel: &CancelToken,
    ) -> FindResult<Option<Match>> {
        let area = self.area(source);
        scan::validate_area(source, self.target, area)?;
        find_first_in(self.job(source), area, cancel)
    }

    /// Returns every occurrence in the area.
    ///
    /// Occurrences in the overlap between quadrants can appear twice unless
    /// `merge_iou` is configured.
    pub fn find_all(&self, source: &PixelBuffer) -> FindResult<Vec<Match>> {
        self.find_all_with_cancel(source, &CancelToken::new())
    }

    /// Like [`Finder::find_all`]; a cancelled search returns the matches
    /// collected before cancellation was observed.
    pub fn find_all_with_cancel(
        &self,
        source: &PixelBuffer,
        cancel: &CancelToken,
    ) -> FindResult<Vec<Match>> {
        let area = self.area(source);
        scan::validate_area(source, self.target, area)?;
        let matches = find_all_in(self.job(source), area, cancel)?;
        Ok(match self.cfg.merge_iou {
            Some(max_iou) => merge::merge_overlapping(matches, max_iou),
            None => matches,
        })
    }

    /// Lazily scans the configured area without splitting it.
    pub fn scan<'a>(
        &'a self,
        source: &'a PixelBuffer,
        cancel: CancelToken,
    ) -> FindResult<scan::Scan<'a>> {
        let area = self.area(source);
        scan::Scan::new(
            source,
            self.target,
            area,
            ColorComparator::new(self.cfg.tolerance),
            cancel,
        )
    }
}

/// Returns the first occurrence of `target` in `source`.
pub fn find(
    source: &PixelBuffer,
    target: &PixelBuffer,
    area: Option<Rect>,
    tolerance: f32,
) -> FindResult<Option<Rect>> {
    let cfg = FindConfig {
        area,
        tolerance,
        ..FindConfig::default()
    };
    let hit = Finder::new(target).with_config(cfg).find(source)?;
    Ok(hit.map(|m| m.rect))
}

/// Returns every occurrence of `target` in `source`.
pub fn find_all(
    source: &PixelBuffer,
    target: &PixelBuffer,
    area: Option<Rect>,
    tolerance: f32,
) -> FindResult<Vec<Rect>> {
    let cfg = FindConfig {
        area,
        tolerance,
        ..FindConfig::default()
    };
    let matches = Finder::new(target).with_config(cfg).find_all(source)?;
    Ok(matches.into_iter().map(|m| m.rect).collect())
}

pub use cancel::CancelToken;
pub use handle::{spawn_find, spawn_find_all, SearchHandle};
pub use merge::merge_overlapping;
pub use quadrant::plan_quadrants;
pub use scan::{Scan, SAMPLE_STRIDE};
