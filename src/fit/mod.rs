//! Hybrid line / cubic Bézier fitting of corner-delimited sub-runs.
//!
//! Overview
//! - Each sub-run is first tested against the chord between its end points;
//!   if every sample lies within `line_epsilon` the run becomes a line.
//! - Otherwise a least-squares cubic with pinned end points is fitted (see
//!   `bezier`). It is accepted within `bezier_epsilon`.
//! - A run that fits neither is halved at its worst sample and both halves
//!   are refitted, up to `max_split_depth` levels.
//! - When splitting is exhausted the raw samples are emitted as a polyline and
//!   the run is reported as a fitting failure. This path never errors.
//!
//! Fitted runs keep the exact end points of the sub-runs, so consecutive
//! segments of a curve share their end points exactly.

mod bezier;
mod options;

pub use options::FitOptions;

use crate::corners::CornerDetector;
use crate::error::{ExtractError, Result};
use crate::geometry::{BoundaryCurve, FittedSegment};
use crate::types::{Category, SourceId};
use kurbo::Point;
use log::debug;

/// Segments fitted to one sub-run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunFit {
    pub segments: Vec<FittedSegment>,
    /// Largest deviation of any sample from its fitted segment.
    pub max_deviation: f64,
    /// Deviation of the best smooth fit when a polyline had to be used.
    pub fallback: Option<f64>,
}

/// A fitted source sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedCurve {
    pub curve: BoundaryCurve,
    pub max_deviation: f64,
    pub runs: usize,
    /// `FittingFailure` raised when any run fell back to a polyline.
    pub warning: Option<ExtractError>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CurveFitter {
    corners: CornerDetector,
    options: FitOptions,
}

impl CurveFitter {
    pub fn new(corners: CornerDetector, options: FitOptions) -> Self {
        Self { corners, options }
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Best single segment for a sub-run: a line within `line_epsilon`,
    /// else a cubic within `bezier_epsilon`, else `None`.
    pub fn fit_segment(&self, points: &[Point]) -> Option<(FittedSegment, f64)> {
        let candidate = self.candidate(points)?;
        let limit = if candidate.0.is_line() {
            self.options.line_epsilon
        } else {
            self.options.bezier_epsilon
        };
        (candidate.1 <= limit).then_some(candidate)
    }

    /// Line if it is within tolerance, otherwise the cubic fit (whatever its
    /// deviation), otherwise the chord.
    fn candidate(&self, points: &[Point]) -> Option<(FittedSegment, f64)> {
        if points.len() < 2 {
            return None;
        }
        let (first, last) = (points[0], points[points.len() - 1]);
        let interior = &points[1..points.len() - 1];
        let line = (first != last).then(|| {
            let seg = FittedSegment::line(first, last);
            let dev = seg.max_deviation(interior);
            (seg, dev)
        });
        if let Some(line) = line.filter(|(_, dev)| *dev <= self.options.line_epsilon) {
            return Some(line);
        }
        bezier::fit_cubic(points, self.options.reparam_iterations).or(line)
    }

    /// Fits one sub-run, splitting or falling back as needed.
    ///
    /// A run that returns to its start (a closed loop without corners) is
    /// first cut at the sample farthest from the start; the split budget
    /// applies to each half.
    pub fn fit_run(&self, points: &[Point]) -> RunFit {
        let n = points.len();
        if n >= 5 && points[0] == points[n - 1] {
            let far = farthest_from_start(points);
            let head = self.fit_run_at(&points[..=far], 0);
            let tail = self.fit_run_at(&points[far..], 0);
            return join(head, tail);
        }
        self.fit_run_at(points, 0)
    }

    fn fit_run_at(&self, points: &[Point], depth: usize) -> RunFit {
        let candidate = self.candidate(points);
        if let Some((seg, dev)) = candidate {
            let limit = if seg.is_line() {
                self.options.line_epsilon
            } else {
                self.options.bezier_epsilon
            };
            if dev <= limit {
                return RunFit {
                    segments: vec![seg],
                    max_deviation: dev,
                    fallback: None,
                };
            }
        }

        if depth < self.options.max_split_depth && points.len() >= 5 {
            let split = split_index(points, candidate.map(|c| c.0));
            let head = self.fit_run_at(&points[..=split], depth + 1);
            let tail = self.fit_run_at(&points[split..], depth + 1);
            return join(head, tail);
        }

        let attempted = candidate.map_or(f64::INFINITY, |c| c.1);
        let segments: Vec<FittedSegment> = points
            .windows(2)
            .filter(|w| w[0] != w[1])
            .map(|w| FittedSegment::line(w[0], w[1]))
            .collect();
        RunFit {
            segments,
            max_deviation: 0.0,
            fallback: Some(attempted),
        }
    }

    /// Splits a point sequence at its corners and fits every sub-run into one
    /// contiguous curve.
    ///
    /// Closed sequences must already end on their first point (see
    /// [`crate::closure::ContourCloser`]); the curve then closes exactly.
    pub fn fit_sequence(
        &self,
        id: SourceId,
        category: Category,
        points: &[Point],
        closed: bool,
    ) -> Result<FittedCurve> {
        let runs = self.corners.segment(points, closed);
        let mut segments = Vec::new();
        let mut max_deviation = 0.0f64;
        let mut worst_fallback: Option<f64> = None;
        for run in &runs {
            if run.len() < 2 {
                continue;
            }
            let fit = self.fit_run(run);
            max_deviation = max_deviation.max(fit.max_deviation);
            if let Some(dev) = fit.fallback {
                worst_fallback = Some(worst_fallback.map_or(dev, |w| w.max(dev)));
            }
            segments.extend(fit.segments);
        }
        let curve = BoundaryCurve::new(id, category, segments)?;
        debug!(
            "fit {id}: {} runs -> {} segments ({} lines), max deviation {max_deviation:.3}",
            runs.len(),
            curve.segments().len(),
            curve.line_count()
        );
        let warning = worst_fallback.map(|deviation| ExtractError::FittingFailure {
            id,
            deviation,
            epsilon: self.options.bezier_epsilon,
        });
        Ok(FittedCurve {
            curve,
            max_deviation,
            runs: runs.len(),
            warning,
        })
    }
}

fn join(head: RunFit, tail: RunFit) -> RunFit {
    let fallback = match (head.fallback, tail.fallback) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };
    let mut segments = head.segments;
    segments.extend(tail.segments);
    RunFit {
        segments,
        max_deviation: head.max_deviation.max(tail.max_deviation),
        fallback,
    }
}

/// Interior sample farthest from the first one, at least two samples away
/// from either end.
fn farthest_from_start(points: &[Point]) -> usize {
    let n = points.len();
    let start = points[0];
    (2..=n - 3)
        .map(|i| (i, start.distance(points[i])))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(n / 2, |(i, _)| i)
}

/// Where to halve a run that failed to fit: the sample farthest from `fit`,
/// unless that lies in the outer quarter of the run, in which case the
/// arc-length midpoint. Kept at least two samples away from either end so
/// both halves have three points.
fn split_index(points: &[Point], fit: Option<FittedSegment>) -> usize {
    let n = points.len();
    let (lo, hi) = (2, n - 3);
    let worst = fit.and_then(|seg| {
        (lo..=hi)
            .map(|i| (i, seg.distance_to(points[i])))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    });
    match worst {
        Some(i) if i >= n / 4 && i <= n - 1 - n / 4 => i,
        _ => arc_midpoint(points).clamp(lo, hi),
    }
}

/// First sample at or past half the polyline length.
fn arc_midpoint(points: &[Point]) -> usize {
    let total: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    let mut acc = 0.0;
    for (i, w) in points.windows(2).enumerate() {
        acc += w[0].distance(w[1]);
        if acc >= total * 0.5 {
            return i + 1;
        }
    }
    points.len() / 2
}
