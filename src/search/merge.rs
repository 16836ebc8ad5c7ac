//! Optional de-duplication of matches reported twice at quadrant seams.

use crate::search::Match;

fn match_cmp(a: &Match, b: &Match) -> std::cmp::Ordering {
    a.rect
        .y
        .cmp(&b.rect.y)
        .then_with(|| a.rect.x.cmp(&b.rect.x))
        .then_with(|| a.quadrant.cmp(&b.quadrant))
}

/// Drops every match whose IoU with an already kept match exceeds `max_iou`.
///
/// Matches are visited in row-major order of their origin, so the survivor of
/// a duplicate pair is the one nearest the top-left. `max_iou` of `0.0`
/// keeps only pairwise disjoint rectangles.
pub fn merge_overlapping(mut matches: Vec<Match>, max_iou: f32) -> Vec<Match> {
    matches.sort_by(match_cmp);
    let mut kept: Vec<Match> = Vec::with_capacity(matches.len());

    'outer: for m in matches {
        for k in kept.iter() {
            if m.rect.iou(&k.rect) > max_iou {
                continue 'outer;
            }
        }
        kept.push(m);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::merge_overlapping;
    use crate::buffer::Rect;
    use crate::search::Match;

    fn m(x: u32, y: u32, quadrant: usize) -> Match {
        Match {
            rect: Rect::new(x, y, 10, 10),
            quadrant: Some(quadrant),
        }
    }

    #[test]
    fn exact_duplicates_collapse() {
        let kept = merge_overlapping(vec![m(40, 40, 1), m(40, 40, 0), m(0, 0, 0)], 0.5);
        assert_eq!(kept, vec![m(0, 0, 0), m(40, 40, 0)]);
    }

    #[test]
    fn threshold_controls_partial_overlap() {
        let input = vec![m(0, 0, 0), m(5, 0, 1)];
        assert_eq!(merge_overlapping(input.clone(), 0.5).len(), 2);
        assert_eq!(merge_overlapping(input, 0.0).len(), 1);
    }
}
