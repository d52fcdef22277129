#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod svg;
pub mod types;

// Stage modules: public for tools and tests, considered internals.
pub mod angle;
pub mod closure;
pub mod color;
pub mod corners;
pub mod filter;
pub mod fit;
pub mod geometry;
pub mod points;
pub mod wires;

// --- High-level re-exports -------------------------------------------------

// Main entry points: extractor + parameters.
pub use crate::error::{ExtractError, Result};
pub use crate::pipeline::{Extractor, ExtractorParams};

// Input and output entities.
pub use crate::color::ColorSample;
pub use crate::types::{
    Category, ExtractionResult, PhysicalGroup, PhysicalTag, PointMarker, SourceId, TracedPath,
};

// High-level diagnostics returned by the extractor.
pub use crate::diagnostics::{ExtractionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use sketch_topology::prelude::*;
/// use kurbo::Point;
///
/// # fn main() -> Result<(), ExtractError> {
/// let blob: Vec<Point> = (0..6)
///     .map(|i| {
///         let a = i as f64 * std::f64::consts::PI / 3.0;
///         Point::new(3.0 * a.cos(), 3.0 * a.sin())
///     })
///     .collect();
/// let paths = vec![TracedPath::new(0, blob, ColorSample::rgb(255, 0, 0))];
///
/// let report = Extractor::new(ExtractorParams::default())?.extract(&paths)?;
/// println!("markers={}", report.result.markers.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        Category, ColorSample, ExtractError, ExtractionResult, Extractor, ExtractorParams,
        TracedPath,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage objects.
    pub use crate::closure::{ClosureOptions, ContourCloser};
    pub use crate::color::{ColorClassifier, ColorOptions, HueRange};
    pub use crate::corners::{Corner, CornerDetector, CornerKind, CornerOptions};
    pub use crate::filter::{DiscardReason, FilterOptions, KeepCounts, StructureFilter};
    pub use crate::fit::{CurveFitter, FitOptions, FittedCurve};
    pub use crate::points::{PointDetector, PointOptions};
    pub use crate::wires::{Assembly, WireGrouper};

    // Geometry.
    pub use crate::geometry::{BoundaryCurve, FittedSegment, Outline, Wire};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        DiscardedStructure, FitWarning, InputDescriptor, SkipReason, SkippedStructure,
        StageCounts, StageTiming, TimingBreakdown,
    };

    // Observer and input ports.
    pub use crate::pipeline::{
        ConfigSource, NoopObserver, PathSource, PipelineObserver, RasterContour, TracedRaster,
    };
}
