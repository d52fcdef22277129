//! Per-category pruning of candidate structures.
//!
//! Two passes:
//! - duplicate removal for raster contours, where a thick stroke is traced
//!   twice (outer and inner edge of the ink) and shows up as a contour nested
//!   exactly one level below a near-identical one;
//! - top-K ranking by enclosed area over the unified list of point markers
//!   and wires of one category.
use crate::geometry::Outline;
use crate::types::{Category, Contour};
use log::debug;
use serde::{Deserialize, Serialize};

/// Maximum number of kept structures per category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeepCounts {
    pub red_dots: usize,
    pub blue_paths: usize,
    pub green_paths: usize,
}

impl KeepCounts {
    pub fn for_category(&self, category: Category) -> usize {
        match category {
            Category::Red => self.red_dots,
            Category::Blue => self.blue_paths,
            Category::Green => self.green_paths,
            Category::Ignore => 0,
        }
    }
}

impl Default for KeepCounts {
    fn default() -> Self {
        Self {
            red_dots: 10,
            blue_paths: 10,
            green_paths: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterOptions {
    /// A nested raster contour whose area is at least this fraction of its
    /// parent's is a double-traced duplicate.
    pub duplicate_area_ratio: f64,
    /// Closed contours below this area are noise.
    pub noise_area: f64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            duplicate_area_ratio: 0.5,
            noise_area: 1.0,
        }
    }
}

/// Why a structure was filtered out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscardReason {
    Noise,
    NestedDuplicate,
    RankedOut,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StructureFilter {
    options: FilterOptions,
    keep: KeepCounts,
}

impl StructureFilter {
    pub fn new(options: FilterOptions, keep: KeepCounts) -> Self {
        Self { options, keep }
    }

    pub fn keep_counts(&self) -> &KeepCounts {
        &self.keep
    }

    /// Splits contours into `(kept, noise)` by the noise area floor.
    pub fn remove_noise(&self, contours: Vec<Contour>) -> (Vec<Contour>, Vec<Contour>) {
        contours
            .into_iter()
            .partition(|c| c.area >= self.options.noise_area)
    }

    /// Drops raster contours that duplicate their parent stroke. Returns
    /// `(kept, duplicates)`, both in input order. Contours without raster
    /// nesting data pass through untouched.
    pub fn remove_nested_duplicates(&self, contours: Vec<Contour>) -> (Vec<Contour>, Vec<Contour>) {
        let outlines: Vec<Option<Outline>> = contours
            .iter()
            .map(|c| c.is_raster().then(|| Outline::from_polygon(&c.points)))
            .collect();
        let mut order: Vec<usize> = (0..contours.len()).collect();
        order.sort_by(|&a, &b| contours[b].area.total_cmp(&contours[a].area));

        let mut duplicate = vec![false; contours.len()];
        for (k, &i) in order.iter().enumerate() {
            let (Some(depth), Some(outline)) = (contours[i].depth, &outlines[i]) else {
                continue;
            };
            let is_dup = order[..k].iter().any(|&j| {
                let parent = &contours[j];
                !duplicate[j]
                    && parent.category == contours[i].category
                    && parent.depth.map(|d| d + 1) == Some(depth)
                    && parent.area > 0.0
                    && contours[i].area / parent.area >= self.options.duplicate_area_ratio
                    && outlines[j]
                        .as_ref()
                        .is_some_and(|o| o.contains(outline, 1.0))
            });
            duplicate[i] = is_dup;
        }

        let (dups, kept): (Vec<_>, Vec<_>) = contours
            .into_iter()
            .zip(duplicate)
            .partition(|(_, d)| *d);
        if !dups.is_empty() {
            debug!("removed {} nested duplicate contours", dups.len());
        }
        (
            kept.into_iter().map(|(c, _)| c).collect(),
            dups.into_iter().map(|(c, _)| c).collect(),
        )
    }

    /// Keeps the `K` largest items of `category` (stable on equal areas).
    /// Returns `(kept, discarded)`, kept ones largest first.
    pub fn keep_largest<T>(
        &self,
        category: Category,
        items: Vec<T>,
        area: impl Fn(&T) -> f64,
    ) -> (Vec<T>, Vec<T>) {
        let k = self.keep.for_category(category);
        let mut ranked: Vec<(f64, T)> = items.into_iter().map(|t| (area(&t), t)).collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        let discarded = ranked.split_off(k.min(ranked.len()));
        if !discarded.is_empty() {
            debug!(
                "{category}: keeping {} largest, discarding {}",
                ranked.len(),
                discarded.len()
            );
        }
        (
            ranked.into_iter().map(|(_, t)| t).collect(),
            discarded.into_iter().map(|(_, t)| t).collect(),
        )
    }
}
