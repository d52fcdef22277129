//! Color classification.
//!
//! Overview
//! - [`ColorSample`] is an 8-bit RGBA value as sampled from a raster or read
//!   from a path's stroke attribute.
//! - [`ColorClassifier`] maps a sample onto [`Category`] using HSV thresholds
//!   plus an RGB channel-dominance test. White, black and transparent samples
//!   are background and map to `Ignore`.
//! - [`sampling`] finds the dominant stroke category along a traced contour.
//!
//! Checks run in a fixed order (background, blue, red, green) so a sample
//! that satisfies several criteria always lands in the same category.

mod options;
pub mod sampling;

pub use options::{ColorOptions, HueRange};

use crate::error::{ExtractError, Result};
use crate::types::{Category, SourceId};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

fn opaque() -> u8 {
    255
}

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

impl ColorSample {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pure stroke color standing for a category; white for `Ignore`.
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Red => Self::rgb(255, 0, 0),
            Category::Blue => Self::rgb(0, 0, 255),
            Category::Green => Self::rgb(0, 255, 0),
            Category::Ignore => Self::rgb(255, 255, 255),
        }
    }

    /// Hue in degrees, saturation and value on the 0–255 scale.
    pub fn hsv(&self) -> (f64, f64, f64) {
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let sat = if max > 0.0 { delta / max * 255.0 } else { 0.0 };
        let hue = if delta <= 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta) + 120.0
        } else {
            60.0 * ((r - g) / delta) + 240.0
        };
        (hue.rem_euclid(360.0), sat, max)
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<image::Rgb<u8>> for ColorSample {
    fn from(px: image::Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self::rgb(r, g, b)
    }
}

impl From<image::Rgba<u8>> for ColorSample {
    fn from(px: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self::rgba(r, g, b, a)
    }
}

/// Outcome of classifying one sample before ambiguity is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verdict {
    Background,
    Matched(Category),
    Unmatched,
}

/// Maps sampled colors onto categories.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorClassifier {
    options: ColorOptions,
}

impl ColorClassifier {
    pub fn new(options: ColorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ColorOptions {
        &self.options
    }

    fn verdict(&self, color: ColorSample) -> Verdict {
        let o = &self.options;
        if color.a <= o.transparent_alpha {
            return Verdict::Background;
        }
        let (hue, sat, val) = color.hsv();
        if val > o.white_min_value as f64 && sat < o.white_max_saturation as f64 {
            return Verdict::Background;
        }
        if val < o.black_max_value as f64 {
            return Verdict::Background;
        }
        let chromatic = sat >= o.min_saturation as f64;
        let d = o.channel_dominance as i16;
        let (r, g, b) = (color.r as i16, color.g as i16, color.b as i16);
        if (chromatic && o.blue_hue.contains(hue)) || (b > g + d && b > r + d) {
            Verdict::Matched(Category::Blue)
        } else if (chromatic && o.red_hue.contains(hue)) || (r > g + d && r > b + d) {
            Verdict::Matched(Category::Red)
        } else if (chromatic && o.green_hue.contains(hue)) || (g > r + d && g > b + d) {
            Verdict::Matched(Category::Green)
        } else {
            Verdict::Unmatched
        }
    }

    /// Classifies a sample, surfacing non-background colors that match no
    /// category as [`ExtractError::AmbiguousColor`].
    pub fn try_classify(&self, id: SourceId, color: ColorSample) -> Result<Category> {
        match self.verdict(color) {
            Verdict::Background => Ok(Category::Ignore),
            Verdict::Matched(category) => Ok(category),
            Verdict::Unmatched => Err(ExtractError::AmbiguousColor { id, color }),
        }
    }

    /// Classifies a sample; ambiguous colors resolve to `Ignore`.
    pub fn classify(&self, color: ColorSample) -> Category {
        match self.verdict(color) {
            Verdict::Matched(category) => category,
            Verdict::Background => Category::Ignore,
            Verdict::Unmatched => {
                warn!("color {color} matches no category, ignoring");
                Category::Ignore
            }
        }
    }

    /// Same as [`ColorClassifier::classify`] without logging; used for bulk
    /// pixel sampling.
    pub(crate) fn classify_quiet(&self, color: ColorSample) -> Category {
        match self.verdict(color) {
            Verdict::Matched(category) => category,
            Verdict::Background | Verdict::Unmatched => Category::Ignore,
        }
    }
}
