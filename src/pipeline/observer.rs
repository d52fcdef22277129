//! Optional observer invoked with the entities built at each stage.
use crate::geometry::{BoundaryCurve, Wire};
use crate::types::{Category, Contour, PhysicalGroup, PointMarker, SourceId};

/// Debug side channel. Every method defaults to a no-op.
pub trait PipelineObserver {
    fn on_classified(&mut self, _id: SourceId, _category: Category) {}
    fn on_contours(&mut self, _contours: &[Contour]) {}
    fn on_curves(&mut self, _curves: &[BoundaryCurve]) {}
    fn on_wires(&mut self, _wires: &[Wire]) {}
    fn on_markers(&mut self, _markers: &[PointMarker]) {}
    fn on_groups(&mut self, _groups: &[PhysicalGroup]) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
