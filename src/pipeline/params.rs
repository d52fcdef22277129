//! Parameter types configuring the extraction stages.
//!
//! Every stage has its own options struct with documented defaults; the
//! defaults suit traced rasters at roughly screen resolution. Distances are in
//! input units.
use crate::closure::ClosureOptions;
use crate::color::{ColorOptions, HueRange};
use crate::corners::CornerOptions;
use crate::error::{ExtractError, Result};
use crate::filter::{FilterOptions, KeepCounts};
use crate::fit::FitOptions;
use crate::points::PointOptions;
use crate::types::Category;
use serde::{Deserialize, Serialize};

/// Extractor-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractorParams {
    pub color: ColorOptions,
    pub corners: CornerOptions,
    pub fit: FitOptions,
    pub closure: ClosureOptions,
    pub points: PointOptions,
    pub filter: FilterOptions,
    /// Per-category keep counts (`red_dots`, `blue_paths`, `green_paths`).
    pub keep: KeepCounts,
    /// Categories that must end up with at least one group or marker.
    pub required_categories: Vec<Category>,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            color: ColorOptions::default(),
            corners: CornerOptions::default(),
            fit: FitOptions::default(),
            closure: ClosureOptions::default(),
            points: PointOptions::default(),
            filter: FilterOptions::default(),
            keep: KeepCounts::default(),
            required_categories: Vec::new(),
        }
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ExtractError::Config(format!("{name} must be positive, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ExtractError::Config(format!("{name} must be non-negative, got {v}")))
    }
}

fn hue(name: &str, r: &HueRange) -> Result<()> {
    let ok = |d: f64| (0.0..=360.0).contains(&d);
    if ok(r.from_deg) && ok(r.to_deg) {
        Ok(())
    } else {
        Err(ExtractError::Config(format!(
            "{name} must lie in [0, 360] degrees, got [{}, {}]",
            r.from_deg, r.to_deg
        )))
    }
}

impl ExtractorParams {
    /// Rejects values no stage can work with.
    pub fn validate(&self) -> Result<()> {
        hue("color.blue_hue", &self.color.blue_hue)?;
        hue("color.red_hue", &self.color.red_hue)?;
        hue("color.green_hue", &self.color.green_hue)?;

        let c = &self.corners;
        if !(c.angle_threshold_deg > 0.0 && c.angle_threshold_deg <= 180.0) {
            return Err(ExtractError::Config(format!(
                "corners.angle_threshold_deg must be in (0, 180], got {}",
                c.angle_threshold_deg
            )));
        }
        if c.window == 0 {
            return Err(ExtractError::Config("corners.window must be at least 1".into()));
        }
        if c.min_run_points < 2 {
            return Err(ExtractError::Config(
                "corners.min_run_points must be at least 2".into(),
            ));
        }
        non_negative("corners.straight_tolerance_deg", c.straight_tolerance_deg)?;

        positive("fit.line_epsilon", self.fit.line_epsilon)?;
        positive("fit.bezier_epsilon", self.fit.bezier_epsilon)?;
        if self.fit.bezier_epsilon < self.fit.line_epsilon {
            return Err(ExtractError::Config(format!(
                "fit.bezier_epsilon ({}) must not be below fit.line_epsilon ({})",
                self.fit.bezier_epsilon, self.fit.line_epsilon
            )));
        }

        positive("closure.tolerance", self.closure.tolerance)?;
        non_negative("points.max_area", self.points.max_area)?;
        non_negative("points.max_diameter", self.points.max_diameter)?;
        non_negative("filter.noise_area", self.filter.noise_area)?;
        let ratio = self.filter.duplicate_area_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ExtractError::Config(format!(
                "filter.duplicate_area_ratio must be in (0, 1], got {ratio}"
            )));
        }
        if self.required_categories.contains(&Category::Ignore) {
            return Err(ExtractError::Config(
                "required_categories cannot contain \"ignore\"".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ExtractorParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_epsilons() {
        let mut params = ExtractorParams::default();
        params.fit.bezier_epsilon = 0.1;
        assert!(matches!(params.validate(), Err(ExtractError::Config(_))));
    }

    #[test]
    fn rejects_bad_tolerances() {
        let mut params = ExtractorParams::default();
        params.closure.tolerance = 0.0;
        assert!(params.validate().is_err());

        let mut params = ExtractorParams::default();
        params.color.red_hue = HueRange::new(350.0, 400.0);
        assert!(params.validate().is_err());

        let mut params = ExtractorParams::default();
        params.required_categories = vec![Category::Ignore];
        assert!(params.validate().is_err());
    }
}
