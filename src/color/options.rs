use serde::{Deserialize, Serialize};

/// Inclusive hue interval in degrees. `from_deg > to_deg` wraps through 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HueRange {
    pub from_deg: f64,
    pub to_deg: f64,
}

impl HueRange {
    pub const fn new(from_deg: f64, to_deg: f64) -> Self {
        Self { from_deg, to_deg }
    }

    pub fn contains(&self, hue_deg: f64) -> bool {
        if self.from_deg <= self.to_deg {
            hue_deg >= self.from_deg && hue_deg <= self.to_deg
        } else {
            hue_deg >= self.from_deg || hue_deg <= self.to_deg
        }
    }
}

/// Thresholds for mapping a sampled color onto a category.
///
/// Value and saturation are on the 0–255 scale, hue in degrees [0, 360).
/// A sample is chromatic when its saturation reaches `min_saturation`; only
/// chromatic samples are tested against the hue ranges. The channel
/// dominance test (one channel exceeding both others by
/// `channel_dominance`) applies to every non-background sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorOptions {
    pub white_min_value: u8,
    pub white_max_saturation: u8,
    pub black_max_value: u8,
    pub min_saturation: u8,
    pub blue_hue: HueRange,
    pub red_hue: HueRange,
    pub green_hue: HueRange,
    pub channel_dominance: u8,
    /// Samples with alpha at or below this value are treated as background.
    pub transparent_alpha: u8,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            white_min_value: 200,
            white_max_saturation: 50,
            black_max_value: 50,
            min_saturation: 50,
            blue_hue: HueRange::new(200.0, 280.0),
            red_hue: HueRange::new(340.0, 20.0),
            green_hue: HueRange::new(70.0, 170.0),
            channel_dominance: 20,
            transparent_alpha: 0,
        }
    }
}
