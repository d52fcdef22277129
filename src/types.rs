//! Entities shared across the extraction stages.
//!
//! Input geometry arrives as [`TracedPath`] values owned by the caller. Every
//! derived entity (contours, curves, wires, groups, markers) is built once per
//! invocation and never mutated afterwards.
use crate::color::ColorSample;
use crate::geometry::Wire;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an input path, carried through every derived entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub u32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path#{}", self.0)
    }
}

/// Semantic category derived from a stroke color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Red,
    Blue,
    Green,
    Ignore,
}

impl Category {
    /// Categories that produce output structures.
    pub const ACTIVE: [Category; 3] = [Category::Red, Category::Blue, Category::Green];

    pub fn is_active(self) -> bool {
        !matches!(self, Category::Ignore)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Red => "red",
            Category::Blue => "blue",
            Category::Green => "green",
            Category::Ignore => "ignore",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra data a raster tracer knows about each contour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RasterInfo {
    /// Nesting depth among the contours of the same frame (0 = top level).
    pub depth: usize,
    /// Enclosed area in pixels as measured by the tracer.
    pub pixel_area: f64,
}

/// One traced or parsed path handed in by the ingestion layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TracedPath {
    pub id: SourceId,
    pub points: Vec<Point>,
    pub color: ColorSample,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raster: Option<RasterInfo>,
}

impl TracedPath {
    pub fn new(id: u32, points: Vec<Point>, color: ColorSample) -> Self {
        Self {
            id: SourceId(id),
            points,
            color,
            raster: None,
        }
    }

    pub fn with_raster(mut self, depth: usize, pixel_area: f64) -> Self {
        self.raster = Some(RasterInfo { depth, pixel_area });
        self
    }
}

/// A closed candidate structure before fitting.
///
/// `points` is closed: the last point equals the first exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub id: SourceId,
    pub category: Category,
    pub points: Vec<Point>,
    /// Raster pixel area when known, polygon area otherwise.
    pub area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
}

impl Contour {
    pub fn is_raster(&self) -> bool {
        self.depth.is_some()
    }

    /// Points without the repeated closing point.
    pub fn ring(&self) -> &[Point] {
        &self.points[..self.points.len().saturating_sub(1)]
    }
}

/// A small closed structure reported as a single location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    pub id: SourceId,
    pub category: Category,
    pub centroid: Point,
    pub area: f64,
}

/// Physical tag handed to the mesher, unique within one result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalTag(pub u32);

/// One region of a category: an outer wire plus its holes.
///
/// The outer wire has positive signed area, holes negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalGroup {
    pub tag: PhysicalTag,
    pub category: Category,
    pub outer: Wire,
    pub holes: Vec<Wire>,
    /// Set on the single group whose outer wire bounds everything else.
    pub outermost: bool,
}

impl PhysicalGroup {
    /// Enclosed area with holes subtracted.
    pub fn net_area(&self) -> f64 {
        self.outer.signed_area() + self.holes.iter().map(Wire::signed_area).sum::<f64>()
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}

/// Final output of one pipeline invocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub groups: Vec<PhysicalGroup>,
    pub markers: Vec<PointMarker>,
}

impl ExtractionResult {
    pub fn groups_of(&self, category: Category) -> impl Iterator<Item = &PhysicalGroup> {
        self.groups.iter().filter(move |g| g.category == category)
    }

    pub fn markers_of(&self, category: Category) -> impl Iterator<Item = &PointMarker> {
        self.markers.iter().filter(move |m| m.category == category)
    }

    /// Number of kept structures (groups and markers) of a category.
    pub fn surviving(&self, category: Category) -> usize {
        self.groups_of(category).count() + self.markers_of(category).count()
    }
}
