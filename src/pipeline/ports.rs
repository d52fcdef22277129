//! Input ports the extractor reads through.
//!
//! Ingestion (SVG parsing, raster tracing, file loading) lives outside the
//! core. Callers hand in an implementation of [`PathSource`] and, optionally,
//! [`ConfigSource`]; nothing here has a hidden default.
use super::ExtractorParams;
use crate::color::sampling::dominant_category;
use crate::color::{ColorClassifier, ColorSample};
use crate::error::Result;
use crate::types::{RasterInfo, SourceId, TracedPath};
use image::RgbImage;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Supplies the traced or parsed paths of one input.
pub trait PathSource {
    fn load_paths(&self) -> Result<Vec<TracedPath>>;
}

/// Supplies extractor parameters.
pub trait ConfigSource {
    fn load_params(&self) -> Result<ExtractorParams>;
}

impl PathSource for Vec<TracedPath> {
    fn load_paths(&self) -> Result<Vec<TracedPath>> {
        Ok(self.clone())
    }
}

impl ConfigSource for ExtractorParams {
    fn load_params(&self) -> Result<ExtractorParams> {
        Ok(self.clone())
    }
}

/// One contour as emitted by a raster tracer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RasterContour {
    pub points: Vec<Point>,
    pub info: RasterInfo,
}

/// Contours traced from an RGB raster. Each contour's color is the dominant
/// stroke category sampled from the image along it.
pub struct TracedRaster<'a> {
    image: &'a RgbImage,
    contours: Vec<RasterContour>,
    classifier: ColorClassifier,
    stroke_radius: f64,
}

impl<'a> TracedRaster<'a> {
    pub fn new(
        image: &'a RgbImage,
        contours: Vec<RasterContour>,
        classifier: ColorClassifier,
        stroke_radius: f64,
    ) -> Self {
        Self {
            image,
            contours,
            classifier,
            stroke_radius,
        }
    }
}

impl PathSource for TracedRaster<'_> {
    fn load_paths(&self) -> Result<Vec<TracedPath>> {
        Ok(self
            .contours
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let category =
                    dominant_category(self.image, &c.points, &self.classifier, self.stroke_radius);
                TracedPath {
                    id: SourceId(i as u32),
                    points: c.points.clone(),
                    color: ColorSample::for_category(category),
                    raster: Some(c.info),
                }
            })
            .collect())
    }
}
