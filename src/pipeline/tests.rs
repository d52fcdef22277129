use super::*;
use crate::color::ColorSample;
use crate::diagnostics::SkipReason;
use crate::filter::{DiscardReason, KeepCounts};
use kurbo::Point;

const BLUE: ColorSample = ColorSample::rgb(0, 0, 255);
const RED: ColorSample = ColorSample::rgb(255, 0, 0);

fn square(x: f64, y: f64, s: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + s, y),
        Point::new(x + s, y + s),
        Point::new(x, y + s),
        Point::new(x, y),
    ]
}

fn hexagon(cx: f64, cy: f64, r: f64) -> Vec<Point> {
    let mut pts: Vec<Point> = (0..6)
        .map(|i| {
            let a = i as f64 * std::f64::consts::PI / 3.0;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect();
    pts.push(pts[0]);
    pts
}

fn extractor() -> Extractor {
    Extractor::new(ExtractorParams::default()).expect("default params are valid")
}

#[test]
fn open_halves_are_chained_into_one_group() {
    let a = vec![Point::new(0.0, 0.0), Point::new(40.0, 0.0), Point::new(40.0, 40.0)];
    let b = vec![Point::new(40.0, 40.0), Point::new(0.0, 40.0), Point::new(0.0, 0.0)];
    let paths = vec![TracedPath::new(0, a, BLUE), TracedPath::new(1, b, BLUE)];
    let report = extractor().extract(&paths).expect("extract");

    assert_eq!(report.trace.counts.open, 2);
    assert_eq!(report.trace.counts.chained_wires, 1);
    assert_eq!(report.result.groups.len(), 1);
    let group = &report.result.groups[0];
    assert_eq!(group.outer.segment_count(), 4);
    assert!((group.outer.signed_area() - 1600.0).abs() < 1e-6);
    assert!(report.trace.skipped.is_empty());
}

#[test]
fn dangling_path_is_skipped_as_unclosable() {
    let dangling = vec![Point::new(0.0, 0.0), Point::new(40.0, 0.0), Point::new(40.0, 40.0)];
    let paths = vec![
        TracedPath::new(0, square(100.0, 100.0, 30.0), BLUE),
        TracedPath::new(1, dangling, BLUE),
    ];
    let report = extractor().extract(&paths).expect("extract");
    assert_eq!(report.result.groups.len(), 1);
    assert_eq!(report.trace.counts.unclosable, 1);
    assert_eq!(report.trace.skipped.len(), 1);
    assert_eq!(report.trace.skipped[0].id, SourceId(1));
    assert_eq!(report.trace.skipped[0].reason, SkipReason::Unclosable);
}

#[test]
fn unclosable_required_category_is_fatal() {
    let params = ExtractorParams {
        required_categories: vec![Category::Blue],
        ..ExtractorParams::default()
    };
    let dangling = vec![Point::new(0.0, 0.0), Point::new(40.0, 0.0), Point::new(40.0, 40.0)];
    let paths = vec![TracedPath::new(7, dangling, BLUE)];
    let err = Extractor::new(params)
        .expect("params")
        .extract(&paths)
        .expect_err("blue has no closed candidate");
    assert!(matches!(
        err,
        ExtractError::UnclosedRequiredCategory {
            category: Category::Blue,
            id: SourceId(7),
            ..
        }
    ));
    assert!(err.is_fatal());
}

#[test]
fn empty_required_category_is_fatal() {
    let params = ExtractorParams {
        required_categories: vec![Category::Red],
        ..ExtractorParams::default()
    };
    let paths = vec![TracedPath::new(0, square(0.0, 0.0, 30.0), BLUE)];
    let err = Extractor::new(params)
        .expect("params")
        .extract(&paths)
        .expect_err("no red structures");
    assert_eq!(
        err,
        ExtractError::EmptyPhysicalGroup {
            category: Category::Red
        }
    );
    assert!(err.is_fatal());
}

#[test]
fn background_ambiguous_and_malformed_paths_are_skipped() {
    let mut broken = square(0.0, 0.0, 10.0);
    broken[2] = Point::new(f64::NAN, 3.0);
    let paths = vec![
        TracedPath::new(0, square(0.0, 0.0, 30.0), ColorSample::rgb(255, 255, 255)),
        TracedPath::new(1, square(0.0, 0.0, 30.0), ColorSample::rgb(128, 128, 128)),
        TracedPath::new(2, broken, BLUE),
        TracedPath::new(3, square(50.0, 50.0, 30.0), BLUE),
    ];
    let report = extractor().extract(&paths).expect("extract");

    let reasons: Vec<(SourceId, SkipReason)> = report
        .trace
        .skipped
        .iter()
        .map(|s| (s.id, s.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (SourceId(0), SkipReason::Background),
            (SourceId(1), SkipReason::AmbiguousColor),
            (SourceId(2), SkipReason::Malformed),
        ]
    );
    assert_eq!(report.result.groups.len(), 1);
    assert_eq!(report.result.groups[0].outer.curves()[0].id, SourceId(3));
}

#[test]
fn small_red_shapes_become_ranked_markers() {
    let params = ExtractorParams {
        keep: KeepCounts {
            red_dots: 1,
            ..KeepCounts::default()
        },
        ..ExtractorParams::default()
    };
    let paths = vec![
        TracedPath::new(0, hexagon(10.0, 10.0, 3.0), RED),
        TracedPath::new(1, hexagon(40.0, 10.0, 4.5), RED),
    ];
    let report = Extractor::new(params)
        .expect("params")
        .extract(&paths)
        .expect("extract");

    assert_eq!(report.result.markers.len(), 1);
    let marker = &report.result.markers[0];
    assert_eq!(marker.id, SourceId(1));
    assert!(marker.centroid.distance(Point::new(40.0, 10.0)) < 1e-6);
    assert_eq!(report.trace.discarded.len(), 1);
    assert_eq!(report.trace.discarded[0].id, SourceId(0));
    assert_eq!(report.trace.discarded[0].reason, DiscardReason::RankedOut);
    assert!(report.result.groups.is_empty());
}

#[test]
fn invalid_params_are_rejected() {
    let mut params = ExtractorParams::default();
    params.closure.tolerance = 0.0;
    assert!(matches!(
        Extractor::new(params),
        Err(ExtractError::Config(_))
    ));
}

#[test]
fn timings_cover_every_stage() {
    let paths = vec![TracedPath::new(0, square(0.0, 0.0, 30.0), BLUE)];
    let report = extractor().extract(&paths).expect("extract");
    for label in ["classify", "close", "dedupe", "fit", "assemble", "rank", "containment"] {
        assert!(report.trace.timings.stage(label).is_some(), "missing {label}");
    }
    assert!(report.trace.timings.total_ms >= 0.0);
}
