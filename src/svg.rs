//! SVG rendering of extraction results.
//!
//! Each physical group becomes one `<path>` (outer wire plus holes, even-odd
//! fill) stroked in its category color; point markers become circles.
use crate::color::ColorSample;
use crate::geometry::Wire;
use crate::types::{ExtractionResult, PhysicalGroup};
use kurbo::{Rect, Shape};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SvgStyle {
    pub point_radius: f64,
    pub stroke_width: f64,
    /// Margin added around the content bounds.
    pub padding: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            point_radius: 4.0,
            stroke_width: 2.0,
            padding: 10.0,
        }
    }
}

/// Path data (`M`/`L`/`C`/`Z`) of a single wire.
pub fn wire_path_data(wire: &Wire) -> String {
    wire.to_bez_path().to_svg()
}

/// Path data of a group: the outer wire followed by its holes.
pub fn group_path_data(group: &PhysicalGroup) -> String {
    group
        .wires()
        .map(wire_path_data)
        .collect::<Vec<_>>()
        .join(" ")
}

fn content_bounds(result: &ExtractionResult, style: &SvgStyle) -> Rect {
    let group_bounds = result.groups.iter().map(|g| g.outer.bounds());
    let marker_bounds = result.markers.iter().map(|m| {
        Rect::from_center_size(
            m.centroid,
            (2.0 * style.point_radius, 2.0 * style.point_radius),
        )
    });
    group_bounds
        .chain(marker_bounds)
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO)
        .inflate(style.padding, style.padding)
}

/// Standalone SVG document for `result`.
pub fn render_document(result: &ExtractionResult, style: &SvgStyle) -> String {
    let view = content_bounds(result, style);
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{:.3} {:.3} {:.3} {:.3}\" width=\"{:.0}\" height=\"{:.0}\">\n",
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width().ceil(),
        view.height().ceil()
    );
    for group in &result.groups {
        let color = ColorSample::for_category(group.category);
        out.push_str(&format!(
            "  <path id=\"group-{}\" d=\"{}\" fill=\"none\" fill-rule=\"evenodd\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            group.tag.0,
            group_path_data(group),
            color,
            style.stroke_width
        ));
    }
    for marker in &result.markers {
        let color = ColorSample::for_category(marker.category);
        out.push_str(&format!(
            "  <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{}\" fill=\"{}\"/>\n",
            marker.centroid.x, marker.centroid.y, style.point_radius, color
        ));
    }
    out.push_str("</svg>\n");
    out
}
