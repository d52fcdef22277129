//! Containment hierarchy among closed outlines.
use crate::geometry::Outline;

/// Boundary slack for containment tests. Keeps identical outlines mutually
/// contained so ties fall back to input order.
pub(crate) const CONTAINMENT_EPS: f64 = 1e-6;

/// Immediate parent of every outline, or `None` at top level.
///
/// Outlines are visited by decreasing area (stable, so the earlier input wins
/// a tie) and each one's parent is the smallest already-visited outline that
/// contains it.
pub(crate) fn immediate_parents(outlines: &[&Outline], areas: &[f64]) -> Vec<Option<usize>> {
    let mut order: Vec<usize> = (0..outlines.len()).collect();
    order.sort_by(|&a, &b| areas[b].total_cmp(&areas[a]));
    let mut parents = vec![None; outlines.len()];
    for (k, &i) in order.iter().enumerate() {
        parents[i] = order[..k]
            .iter()
            .rev()
            .copied()
            .find(|&j| outlines[j].contains(outlines[i], CONTAINMENT_EPS));
    }
    parents
}

/// Nesting depth from a parent table.
pub(crate) fn depths(parents: &[Option<usize>]) -> Vec<usize> {
    (0..parents.len())
        .map(|mut i| {
            let mut d = 0;
            while let Some(p) = parents[i] {
                d += 1;
                i = p;
                if d > parents.len() {
                    break;
                }
            }
            d
        })
        .collect()
}

/// Index of the boundary enclosing everything else: among outlines not
/// contained by a larger one, the one with the largest bounding box.
pub(crate) fn outermost(outlines: &[&Outline], areas: &[f64]) -> Option<usize> {
    let n = outlines.len();
    let contained = |i: usize| {
        (0..n).any(|j| {
            j != i
                && (areas[j] > areas[i] || (areas[j] == areas[i] && j < i))
                && outlines[j].contains(outlines[i], CONTAINMENT_EPS)
        })
    };
    let mut best: Option<(usize, f64)> = None;
    for i in (0..n).filter(|&i| !contained(i)) {
        let bbox = outlines[i].bounds().area();
        if best.map_or(true, |(_, b)| bbox > b) {
            best = Some((i, bbox));
        }
    }
    best.map(|(i, _)| i)
}
