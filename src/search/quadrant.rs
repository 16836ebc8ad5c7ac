//! Parallel decomposition of a search area into four overlapping quadrants.
//!
//! An area holding fewer than four whole target tiles is scanned directly.
//! Otherwise it is split once into a 2x2 grid; each quadrant is half the
//! area plus half the target on its inner edges, so an occurrence straddling
//! a midline lies wholly inside at least one quadrant. Quadrants are never
//! split again.
//!
//! Occurrences inside the shared margin may be reported by two quadrants;
//! the scheduler does not de-duplicate them (see `merge_overlapping`).

use crate::buffer::{PixelBuffer, Rect};
use crate::compare::ColorComparator;
use crate::search::cancel::CancelToken;
use crate::search::scan::Scan;
use crate::search::Match;
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::math::tiles;
use crate::util::{FindError, FindResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Splits `area` into the regions that workers will scan.
///
/// Returns `[area]` when fewer than four target tiles fit, otherwise four
/// overlapping quadrants in row-major order (top-left, top-right,
/// bottom-left, bottom-right). Right and bottom quadrants extend to the area
/// edge, and no quadrant is smaller than the target.
pub fn plan_quadrants(area: Rect, target_width: u32, target_height: u32) -> FindResult<Vec<Rect>> {
    let slices = tiles(area.width, target_width) * tiles(area.height, target_height);
    if slices == 0 {
        return Err(FindError::AreaTooSmall {
            area_width: area.width,
            area_height: area.height,
            target_width,
            target_height,
        });
    }
    if slices < 4 {
        return Ok(vec![area]);
    }

    let half_w = area.width / 2;
    let half_h = area.height / 2;
    let margin_w = target_width / 2;
    let margin_h = target_height / 2;
    let cols = [
        (area.x, (half_w + margin_w).max(target_width)),
        (area.x + half_w - margin_w, area.width - half_w + margin_w),
    ];
    let rows = [
        (area.y, (half_h + margin_h).max(target_height)),
        (area.y + half_h - margin_h, area.height - half_h + margin_h),
    ];

    let mut out = Vec::with_capacity(4);
    for &(y, height) in rows.iter() {
        for &(x, width) in cols.iter() {
            out.push(Rect::new(x, y, width, height));
        }
    }
    Ok(out)
}

/// Shared inputs for the workers of one search.
#[derive(Clone, Copy)]
pub(crate) struct Job<'a> {
    pub source: &'a PixelBuffer,
    pub target: &'a PixelBuffer,
    pub cmp: ColorComparator,
    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    pub parallel: bool,
}

impl<'a> Job<'a> {
    fn scan(&self, area: Rect, cancel: &CancelToken) -> FindResult<Scan<'a>> {
        Scan::new(self.source, self.target, area, self.cmp, cancel.clone())
    }
}

fn tag(quadrants: &[Rect], idx: usize) -> Option<usize> {
    (quadrants.len() > 1).then_some(idx)
}

/// Enumerates every match in `area`.
///
/// A cancelled search returns whatever the workers had collected.
pub(crate) fn find_all_in(
    job: Job<'_>,
    area: Rect,
    cancel: &CancelToken,
) -> FindResult<Vec<Match>> {
    let quadrants = plan_quadrants(area, job.target.width(), job.target.height())?;
    let _span = trace_span!("find_all", quadrants = quadrants.len()).entered();

    let worker = |idx: usize, region: &Rect| {
        guarded(idx, || {
            let quadrant = tag(&quadrants, idx);
            let found: Vec<Match> = job
                .scan(*region, cancel)?
                .map(|rect| Match { rect, quadrant })
                .collect();
            trace_debug!("quadrant_done", quadrant = idx, matches = found.len());
            Ok(found)
        })
    };

    #[cfg(feature = "rayon")]
    let results: Vec<FindResult<Vec<Match>>> = if job.parallel && quadrants.len() > 1 {
        quadrants
            .par_iter()
            .enumerate()
            .map(|(idx, region)| worker(idx, region))
            .collect()
    } else {
        quadrants
            .iter()
            .enumerate()
            .map(|(idx, region)| worker(idx, region))
            .collect()
    };
    #[cfg(not(feature = "rayon"))]
    let results: Vec<FindResult<Vec<Match>>> = quadrants
        .iter()
        .enumerate()
        .map(|(idx, region)| worker(idx, region))
        .collect();

    let matches = gather_all(results)?;
    if cancel.is_cancelled() {
        trace_event!("search_cancelled", partial = matches.len());
    }
    trace_event!("find_all_done", matches = matches.len());
    Ok(matches)
}

/// Returns the first match any worker finds and stops the others.
///
/// Which occurrence wins when several exist depends on worker timing.
pub(crate) fn find_first_in(
    job: Job<'_>,
    area: Rect,
    cancel: &CancelToken,
) -> FindResult<Option<Match>> {
    let quadrants = plan_quadrants(area, job.target.width(), job.target.height())?;
    let _span = trace_span!("find_first", quadrants = quadrants.len()).entered();
    let stop = cancel.child();

    let worker = |idx: usize, region: &Rect| {
        guarded(idx, || {
            let hit = job.scan(*region, &stop)?.next().map(|rect| Match {
                rect,
                quadrant: tag(&quadrants, idx),
            });
            if hit.is_some() {
                stop.cancel();
            }
            Ok(hit)
        })
    };

    let mut errors = Vec::new();

    #[cfg(feature = "rayon")]
    let found = if job.parallel && quadrants.len() > 1 {
        let failed = std::sync::Mutex::new(Vec::new());
        let found = quadrants
            .par_iter()
            .enumerate()
            .find_map_any(|(idx, region)| match worker(idx, region) {
                Ok(hit) => hit,
                Err(err) => {
                    failed
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .push(err);
                    None
                }
            });
        errors = failed
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        found
    } else {
        first_sequential(&quadrants, &worker, &mut errors)
    };
    #[cfg(not(feature = "rayon"))]
    let found = first_sequential(&quadrants, &worker, &mut errors);

    if let Some(hit) = found {
        trace_event!("first_match", x = hit.rect.x, y = hit.rect.y);
        return Ok(Some(hit));
    }
    match combine_failures(errors) {
        Some(err) => Err(err),
        None => Ok(None),
    }
}

/// Concatenates worker matches, or reports every worker that failed.
fn gather_all(results: Vec<FindResult<Vec<Match>>>) -> FindResult<Vec<Match>> {
    let mut matches = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(found) => matches.extend(found),
            Err(err) => errors.push(err),
        }
    }
    match combine_failures(errors) {
        Some(err) => Err(err),
        None => Ok(matches),
    }
}

/// One failure is returned as is; several are wrapped in `WorkersFailed`.
fn combine_failures(mut errors: Vec<FindError>) -> Option<FindError> {
    match errors.len() {
        0 => None,
        1 => errors.pop(),
        failures => {
            trace_event!("workers_failed", failures = failures);
            Some(FindError::WorkersFailed { errors })
        }
    }
}

fn first_sequential<F>(
    quadrants: &[Rect],
    worker: &F,
    errors: &mut Vec<FindError>,
) -> Option<Match>
where
    F: Fn(usize, &Rect) -> FindResult<Option<Match>>,
{
    for (idx, region) in quadrants.iter().enumerate() {
        match worker(idx, region) {
            Ok(Some(hit)) => return Some(hit),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }
    None
}

/// Runs one worker, converting a panic into `FindError::WorkerFailed`.
fn guarded<T>(quadrant: usize, work: impl FnOnce() -> FindResult<T>) -> FindResult<T> {
    match panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(result) => result,
        Err(payload) => Err(FindError::WorkerFailed {
            quadrant,
            reason: panic_message(payload.as_ref()),
        }),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
