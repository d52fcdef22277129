//! Extractor orchestrating classification, closure, fitting, assembly and
//! filtering.
//!
//! Overview
//! - Classifies each input path by stroke color; background and ambiguous
//!   colors are skipped.
//! - Closes paths whose end lies within the closure tolerance. The rest are
//!   kept as open sequences for chaining.
//! - Drops noise and double-traced raster contours, then turns small compact
//!   contours into point markers.
//! - Fits the remaining contours and the open sequences into boundary curves
//!   (corner split + hybrid line/Bézier fit) and assembles wires. Open curves
//!   that cannot be chained into a loop are reported as unclosable.
//! - Ranks markers and wires of each category together by area and keeps the
//!   configured top K.
//! - Nests the kept wires into physical groups (outer wire plus holes).
//!
//! Per-structure problems are recorded in the [`PipelineTrace`] and never stop
//! the run. An invocation fails when a required category ends up empty, or
//! when an unclosable path leaves a required category without any closed
//! candidate.
//!
//! ```no_run
//! use sketch_topology::{ColorSample, Extractor, ExtractorParams, TracedPath};
//! use kurbo::Point;
//!
//! # fn main() -> Result<(), sketch_topology::ExtractError> {
//! let square = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(50.0, 0.0),
//!     Point::new(50.0, 50.0),
//!     Point::new(0.0, 50.0),
//!     Point::new(0.0, 0.0),
//! ];
//! let paths = vec![TracedPath::new(0, square, ColorSample::rgb(0, 0, 255))];
//! let report = Extractor::new(ExtractorParams::default())?.extract(&paths)?;
//! println!("groups={}", report.result.groups.len());
//! # Ok(())
//! # }
//! ```

mod observer;
pub mod params;
mod ports;

pub use observer::{NoopObserver, PipelineObserver};
pub use params::ExtractorParams;
pub use ports::{ConfigSource, PathSource, RasterContour, TracedRaster};

use crate::closure::{ContourCloser, SAME_POINT_EPS};
use crate::color::ColorClassifier;
use crate::corners::CornerDetector;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    DiscardedStructure, ExtractionReport, InputDescriptor, PipelineTrace, SkipReason,
    SkippedStructure,
};
use crate::error::{ExtractError, Result};
use crate::filter::{DiscardReason, StructureFilter};
use crate::fit::CurveFitter;
use crate::geometry::{dedup_consecutive, signed_area, BoundaryCurve, Wire};
use crate::points::PointDetector;
use crate::types::{Category, Contour, ExtractionResult, PointMarker, SourceId, TracedPath};
use crate::wires::WireGrouper;
use kurbo::Point;
use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;

/// Candidate in the per-category ranking.
enum Candidate {
    Marker(PointMarker),
    Wire(Wire),
}

impl Candidate {
    fn area(&self) -> f64 {
        match self {
            Candidate::Marker(m) => m.area,
            Candidate::Wire(w) => w.area(),
        }
    }

    fn id(&self) -> SourceId {
        match self {
            Candidate::Marker(m) => m.id,
            Candidate::Wire(w) => w.curves()[0].id,
        }
    }

    fn category(&self) -> Category {
        match self {
            Candidate::Marker(m) => m.category,
            Candidate::Wire(w) => w.category,
        }
    }
}

/// An input that did not close on its own.
struct OpenPath {
    id: SourceId,
    category: Category,
    points: Vec<Point>,
}

/// Stateless extraction engine. One instance may serve many inputs, also from
/// several threads at once.
#[derive(Clone, Debug)]
pub struct Extractor {
    params: ExtractorParams,
    classifier: ColorClassifier,
    closer: ContourCloser,
    fitter: CurveFitter,
    grouper: WireGrouper,
    filter: StructureFilter,
    points: PointDetector,
}

impl Extractor {
    /// Validates `params` and builds the stage objects.
    pub fn new(params: ExtractorParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            classifier: ColorClassifier::new(params.color),
            closer: ContourCloser::new(params.closure),
            fitter: CurveFitter::new(CornerDetector::new(params.corners), params.fit),
            grouper: WireGrouper::new(params.closure.tolerance),
            filter: StructureFilter::new(params.filter, params.keep),
            points: PointDetector::new(params.points),
            params,
        })
    }

    /// Loads parameters through a config port.
    pub fn from_config(source: &dyn ConfigSource) -> Result<Self> {
        Self::new(source.load_params()?)
    }

    pub fn params(&self) -> &ExtractorParams {
        &self.params
    }

    /// Runs the pipeline on in-memory paths.
    pub fn extract(&self, paths: &[TracedPath]) -> Result<ExtractionReport> {
        self.extract_observed(paths, &mut NoopObserver)
    }

    /// Pulls paths from `source` and runs the pipeline.
    pub fn run(
        &self,
        source: &dyn PathSource,
        observer: &mut dyn PipelineObserver,
    ) -> Result<ExtractionReport> {
        let paths = source.load_paths()?;
        self.extract_observed(&paths, observer)
    }

    /// Processes independent inputs in parallel. Results keep input order.
    pub fn extract_batch(&self, inputs: &[Vec<TracedPath>]) -> Vec<Result<ExtractionReport>> {
        inputs.par_iter().map(|paths| self.extract(paths)).collect()
    }

    /// Runs the pipeline, reporting intermediate entities to `observer`.
    pub fn extract_observed(
        &self,
        paths: &[TracedPath],
        observer: &mut dyn PipelineObserver,
    ) -> Result<ExtractionReport> {
        let total = Instant::now();
        let mut trace = PipelineTrace::new(InputDescriptor {
            paths: paths.len(),
            raster_paths: paths.iter().filter(|p| p.raster.is_some()).count(),
        });
        trace.counts.input = paths.len();
        debug!(
            "Extractor::extract start paths={} raster={}",
            trace.input.paths, trace.input.raster_paths
        );
        let order: HashMap<SourceId, usize> = paths
            .iter()
            .enumerate()
            .rev()
            .map(|(i, p)| (p.id, i))
            .collect();
        let rank_of = |id: SourceId| order.get(&id).copied().unwrap_or(usize::MAX);

        // Classification.
        let t = Instant::now();
        let mut classified: Vec<(&TracedPath, Category)> = Vec::with_capacity(paths.len());
        for path in paths {
            match self.classifier.try_classify(path.id, path.color) {
                Ok(Category::Ignore) => trace.skipped.push(SkippedStructure::new(
                    path.id,
                    SkipReason::Background,
                    format!("background color {}", path.color),
                )),
                Ok(category) => {
                    observer.on_classified(path.id, category);
                    classified.push((path, category));
                }
                Err(err) => trace.note(&err),
            }
        }
        trace.counts.classified = classified.len();
        trace.timings.record("classify", t);

        // Closure.
        let t = Instant::now();
        let mut contours: Vec<Contour> = Vec::new();
        let mut open: Vec<OpenPath> = Vec::new();
        for (path, category) in classified {
            match self.closer.close(path.id, &path.points) {
                Ok(points) => {
                    let polygon_area = signed_area(&points).abs();
                    let area = path
                        .raster
                        .map(|r| r.pixel_area)
                        .filter(|a| *a > 0.0)
                        .unwrap_or(polygon_area);
                    contours.push(Contour {
                        id: path.id,
                        category,
                        points,
                        area,
                        depth: path.raster.map(|r| r.depth),
                    });
                }
                Err(ExtractError::UnclosableContour { id, gap, .. }) => {
                    debug!("{id} is open (gap {gap:.3}), deferring to chaining");
                    open.push(OpenPath {
                        id,
                        category,
                        points: dedup_consecutive(&path.points, SAME_POINT_EPS),
                    });
                }
                Err(err) => trace.note(&err),
            }
        }
        trace.counts.closed = contours.len();
        trace.counts.open = open.len();
        observer.on_contours(&contours);
        trace.timings.record("close", t);

        // Noise and duplicate removal.
        let t = Instant::now();
        let (contours, noise) = self.filter.remove_noise(contours);
        let (contours, duplicates) = self.filter.remove_nested_duplicates(contours);
        trace.counts.noise = noise.len();
        trace.counts.duplicates = duplicates.len();
        for (c, reason) in noise
            .iter()
            .map(|c| (c, DiscardReason::Noise))
            .chain(duplicates.iter().map(|c| (c, DiscardReason::NestedDuplicate)))
        {
            trace.discarded.push(DiscardedStructure {
                id: c.id,
                category: c.category,
                area: c.area,
                reason,
            });
        }
        trace.timings.record("dedupe", t);

        // Point detection and fitting.
        let t = Instant::now();
        let mut markers: Vec<PointMarker> = Vec::new();
        let mut curves: Vec<BoundaryCurve> = Vec::new();
        for contour in &contours {
            if let Some(marker) = self.points.detect(contour) {
                markers.push(marker);
                continue;
            }
            let fitted = self
                .fitter
                .fit_sequence(contour.id, contour.category, &contour.points, true)
                .and_then(|fitted| {
                    if let Some(w) = &fitted.warning {
                        trace.note(w);
                    }
                    self.closer.verify_curve(&fitted.curve)
                });
            match fitted {
                Ok(curve) => curves.push(curve),
                Err(err) => trace.note(&err),
            }
        }
        for path in &open {
            match self
                .fitter
                .fit_sequence(path.id, path.category, &path.points, false)
            {
                Ok(fitted) => {
                    if let Some(w) = &fitted.warning {
                        trace.note(w);
                    }
                    curves.push(fitted.curve);
                }
                Err(err) => trace.note(&err),
            }
        }
        curves.sort_by_key(|c| rank_of(c.id));
        trace.counts.points = markers.len();
        trace.counts.curves = curves.len();
        observer.on_curves(&curves);
        trace.timings.record("fit", t);

        // Wire assembly.
        let t = Instant::now();
        let assembly = self.grouper.assemble(curves);
        let mut unclosable: Vec<(Category, ExtractError)> = Vec::new();
        for curve in &assembly.unchained {
            let err = ExtractError::UnclosableContour {
                id: curve.id,
                gap: curve.gap(),
                tolerance: self.closer.tolerance(),
            };
            trace.note(&err);
            unclosable.push((curve.category, err));
        }
        let mut wires: Vec<Wire> = Vec::new();
        for wire in assembly.wires {
            if wire.curves().len() > 1 {
                trace.counts.chained_wires += 1;
                if let Some(marker) = self.points.detect_wire(&wire) {
                    markers.push(marker);
                    continue;
                }
            }
            wires.push(wire);
        }
        trace.counts.unclosable = unclosable.len();
        trace.counts.wires = wires.len();
        observer.on_wires(&wires);
        observer.on_markers(&markers);
        trace.timings.record("assemble", t);

        for category in &self.params.required_categories {
            let has_closed = wires.iter().any(|w| w.category == *category)
                || markers.iter().any(|m| m.category == *category);
            if has_closed {
                continue;
            }
            if let Some((_, err)) = unclosable.iter().find(|(c, _)| c == category) {
                if let ExtractError::UnclosableContour { id, gap, tolerance } = *err {
                    return Err(ExtractError::UnclosedRequiredCategory {
                        category: *category,
                        id,
                        gap,
                        tolerance,
                    });
                }
            }
        }

        // Ranking.
        let t = Instant::now();
        let mut candidates: Vec<Candidate> = markers
            .into_iter()
            .map(Candidate::Marker)
            .chain(wires.into_iter().map(Candidate::Wire))
            .collect();
        candidates.sort_by_key(|c| rank_of(c.id()));
        let mut kept_markers: Vec<PointMarker> = Vec::new();
        let mut kept_wires: Vec<Wire> = Vec::new();
        for category in Category::ACTIVE {
            let of_category: Vec<Candidate> = {
                let (mine, rest): (Vec<_>, Vec<_>) = candidates
                    .into_iter()
                    .partition(|c| c.category() == category);
                candidates = rest;
                mine
            };
            let (kept, dropped) = self
                .filter
                .keep_largest(category, of_category, Candidate::area);
            for c in &dropped {
                trace.discarded.push(DiscardedStructure {
                    id: c.id(),
                    category,
                    area: c.area(),
                    reason: DiscardReason::RankedOut,
                });
            }
            trace.counts.ranked_out += dropped.len();
            for c in kept {
                match c {
                    Candidate::Marker(m) => kept_markers.push(m),
                    Candidate::Wire(w) => kept_wires.push(w),
                }
            }
        }
        kept_markers.sort_by_key(|m| rank_of(m.id));
        kept_wires.sort_by_key(|w| rank_of(w.curves()[0].id));
        trace.timings.record("rank", t);

        // Containment.
        let t = Instant::now();
        let groups = self.grouper.resolve_containment(kept_wires, 1);
        observer.on_groups(&groups);
        trace.timings.record("containment", t);

        let result = ExtractionResult {
            groups,
            markers: kept_markers,
        };
        trace.counts.groups = result.groups.len();
        trace.counts.holes = result.groups.iter().map(|g| g.holes.len()).sum();
        trace.counts.markers = result.markers.len();

        for category in &self.params.required_categories {
            if result.surviving(*category) == 0 {
                return Err(ExtractError::EmptyPhysicalGroup {
                    category: *category,
                });
            }
        }

        trace.timings.total_ms = elapsed_ms(total);
        debug!(
            "extracted {} groups ({} holes) and {} markers from {} paths in {:.3} ms",
            trace.counts.groups,
            trace.counts.holes,
            trace.counts.markers,
            trace.counts.input,
            trace.timings.total_ms
        );
        Ok(ExtractionReport { result, trace })
    }
}

#[cfg(test)]
mod tests;
