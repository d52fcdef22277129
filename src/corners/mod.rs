//! Corner detection: splits an ordered point sequence into sub-runs that are
//! either near-straight or smoothly curved.
//!
//! Overview
//! - Turning at each point is the angle between the averaged unit step
//!   directions of a look-back and a look-ahead window.
//! - Sharp corners are local maxima above the angle threshold, suppressed
//!   within the window radius. Closed sequences wrap, so the start/end join is
//!   evaluated like any other point.
//! - Long straight runs that end away from a sharp corner get a corner at each
//!   end, which separates a straight edge from the arc it blends into.
//! - Corners closer than `min_run_points - 1` steps are thinned, keeping the
//!   stronger one.
//!
//! A sequence without corners yields a single sub-run covering all of it.

mod options;

pub use options::CornerOptions;

use crate::angle::{angle_between, unit_or_zero};
use crate::geometry::{dedup_consecutive, open_ring};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Why a point was marked as a corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerKind {
    Sharp,
    StraightEnd,
}

/// Feature boundary inside a point sequence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corner {
    pub index: usize,
    pub turn_deg: f64,
    pub kind: CornerKind,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CornerDetector {
    options: CornerOptions,
}

impl CornerDetector {
    pub fn new(options: CornerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CornerOptions {
        &self.options
    }

    fn effective_window(&self, n: usize) -> usize {
        self.options.window.max(1).min((n / 8).max(1))
    }

    /// Window-averaged turning angle in degrees at every point.
    ///
    /// `points` is a ring without its closing duplicate when `closed`. End
    /// points of open sequences have no turning.
    pub fn turning_profile(&self, points: &[Point], closed: bool) -> Vec<f64> {
        let n = points.len();
        if n < 3 {
            return vec![0.0; n];
        }
        let w = self.effective_window(n);
        let step = |j: usize| -> Vec2 {
            let a = points[j % n];
            let b = points[(j + 1) % n];
            unit_or_zero(b - a)
        };
        (0..n)
            .map(|i| {
                let (left, right) = if closed {
                    let left = (1..=w)
                        .map(|k| step((i + n * w - k) % n))
                        .fold(Vec2::ZERO, |a, v| a + v);
                    let right = (0..w)
                        .map(|k| step((i + k) % n))
                        .fold(Vec2::ZERO, |a, v| a + v);
                    (left, right)
                } else {
                    let lo = i.saturating_sub(w);
                    let hi = (i + w).min(n - 1);
                    let left = (lo..i).map(step).fold(Vec2::ZERO, |a, v| a + v);
                    let right = (i..hi).map(step).fold(Vec2::ZERO, |a, v| a + v);
                    (left, right)
                };
                if left.hypot() < 1e-12 || right.hypot() < 1e-12 {
                    0.0
                } else {
                    angle_between(left, right).to_degrees()
                }
            })
            .collect()
    }

    /// Detects corners, returned in index order.
    ///
    /// Closed input may repeat its first point at the end; indices then refer
    /// to the ring without the duplicate. Consecutive duplicate points must
    /// already be removed (see [`CornerDetector::segment`]).
    pub fn detect(&self, points: &[Point], closed: bool) -> Vec<Corner> {
        let ring = if closed { open_ring(points) } else { points };
        let n = ring.len();
        if n < 3 {
            return Vec::new();
        }
        let turning = self.turning_profile(ring, closed);
        let w = self.effective_window(n);
        let o = &self.options;

        let dist = |a: usize, b: usize| -> usize {
            let d = a.abs_diff(b);
            if closed {
                d.min(n - d)
            } else {
                d
            }
        };
        let interior = |i: usize| closed || (i > 0 && i + 1 < n);

        let mut candidates: Vec<Corner> = Vec::new();
        for i in (0..n).filter(|&i| interior(i)) {
            let t = turning[i];
            if t <= o.angle_threshold_deg {
                continue;
            }
            let is_peak = (1..=w.min(n - 1)).all(|d| {
                let before = if closed || i >= d { Some((i + n - d) % n) } else { None };
                let after = if closed || i + d < n { Some((i + d) % n) } else { None };
                [before, after].into_iter().flatten().all(|j| turning[j] <= t)
            });
            if is_peak {
                candidates.push(Corner {
                    index: i,
                    turn_deg: t,
                    kind: CornerKind::Sharp,
                });
            }
        }

        for (start, end) in straight_runs(&turning, o.straight_tolerance_deg, closed) {
            let len = if end >= start {
                end - start + 1
            } else {
                end + n - start + 1
            };
            if len < o.min_straight_run || len >= n {
                continue;
            }
            for idx in [start, end] {
                if !interior(idx) {
                    continue;
                }
                let near_sharp = candidates
                    .iter()
                    .any(|c| c.kind == CornerKind::Sharp && dist(c.index, idx) <= 2 * w);
                if !near_sharp && !candidates.iter().any(|c| c.index == idx) {
                    candidates.push(Corner {
                        index: idx,
                        turn_deg: turning[idx],
                        kind: CornerKind::StraightEnd,
                    });
                }
            }
        }

        self.thin(candidates, n, closed)
    }

    /// Enforces the minimum run length by dropping weaker corners that sit
    /// too close to a stronger one (or, for open input, to an end point).
    fn thin(&self, mut candidates: Vec<Corner>, n: usize, closed: bool) -> Vec<Corner> {
        let min_gap = self.options.min_run_points.max(2) - 1;
        candidates.sort_by(|a, b| {
            let rank = |c: &Corner| matches!(c.kind, CornerKind::StraightEnd);
            rank(a)
                .cmp(&rank(b))
                .then(b.turn_deg.total_cmp(&a.turn_deg))
                .then(a.index.cmp(&b.index))
        });
        let mut kept: Vec<Corner> = Vec::new();
        for c in candidates {
            if !closed && (c.index < min_gap || c.index + min_gap > n - 1) {
                continue;
            }
            let clear = kept.iter().all(|k| {
                let d = k.index.abs_diff(c.index);
                let d = if closed { d.min(n - d) } else { d };
                d >= min_gap
            });
            if clear {
                kept.push(c);
            }
        }
        kept.sort_by_key(|c| c.index);
        kept
    }

    /// Removes duplicates, detects corners and splits into sub-runs.
    pub fn segment(&self, points: &[Point], closed: bool) -> Vec<Vec<Point>> {
        let mut clean = dedup_consecutive(points, 1e-9);
        if closed && clean.len() > 1 && clean[0].distance(clean[clean.len() - 1]) <= 1e-9 {
            clean.pop();
        }
        let corners = self.detect(&clean, closed);
        split_runs(&clean, &corners, closed)
    }
}

/// Maximal runs of consecutive indices with turning below `tolerance`, as
/// inclusive `(start, end)` pairs. Closed runs may wrap (`end < start`).
fn straight_runs(turning: &[f64], tolerance: f64, closed: bool) -> Vec<(usize, usize)> {
    let n = turning.len();
    let flat = |i: usize| turning[i] < tolerance;
    let mut runs = Vec::new();
    if n == 0 {
        return runs;
    }
    let origin = if closed {
        match (0..n).find(|&i| !flat(i)) {
            Some(i) => i,
            None => return vec![(0, n - 1)],
        }
    } else {
        0
    };
    let mut current: Option<usize> = None;
    for k in 0..n {
        let i = (origin + k) % n;
        match (flat(i), current) {
            (true, None) => current = Some(i),
            (false, Some(s)) => {
                runs.push((s, (i + n - 1) % n));
                current = None;
            }
            _ => {}
        }
    }
    if let Some(s) = current {
        runs.push((s, (origin + n - 1) % n));
    }
    runs
}

/// Splits `points` at `corners` into sub-runs that share boundary points.
///
/// For closed input (`points` without the closing duplicate) the runs start at
/// the first corner and the last run wraps back to it. Without corners a closed
/// ring becomes one run that starts and ends on its first point.
pub fn split_runs(points: &[Point], corners: &[Corner], closed: bool) -> Vec<Vec<Point>> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }
    let mut cuts: Vec<usize> = corners.iter().map(|c| c.index).filter(|&i| i < n).collect();
    cuts.sort_unstable();
    cuts.dedup();

    if !closed {
        let mut bounds = vec![0];
        bounds.extend(cuts.into_iter().filter(|&i| i > 0 && i + 1 < n));
        bounds.push(n - 1);
        return bounds
            .windows(2)
            .map(|b| points[b[0]..=b[1]].to_vec())
            .collect();
    }

    if cuts.is_empty() {
        let mut run = points.to_vec();
        run.push(points[0]);
        return vec![run];
    }
    let mut runs = Vec::with_capacity(cuts.len());
    for (k, &from) in cuts.iter().enumerate() {
        let to = cuts[(k + 1) % cuts.len()];
        let len = if to > from { to - from } else { to + n - from };
        runs.push((0..=len).map(|j| points[(from + j) % n]).collect());
    }
    runs
}
