mod common;

use common::synthetic_paths::{
    approx_eq, blob, init_logging, path, polygon, square, BLUE, GREEN, RED,
};
use image::{Rgb, RgbImage};
use kurbo::Point;
use sketch_topology::diagnostics::SkipReason;
use sketch_topology::filter::{DiscardReason, KeepCounts};
use sketch_topology::geometry::{BoundaryCurve, Wire};
use sketch_topology::pipeline::{PipelineObserver, RasterContour, TracedRaster};
use sketch_topology::types::{Contour, PhysicalGroup, PointMarker, RasterInfo};
use sketch_topology::{
    Category, ColorSample, ExtractError, Extractor, ExtractorParams, SourceId, TracedPath,
};
use sketch_topology::color::ColorClassifier;

fn params_with_keep(red_dots: usize, blue_paths: usize, green_paths: usize) -> ExtractorParams {
    ExtractorParams {
        keep: KeepCounts {
            red_dots,
            blue_paths,
            green_paths,
        },
        ..ExtractorParams::default()
    }
}

fn scenario_paths() -> Vec<TracedPath> {
    vec![
        path(0, square(0.0, 0.0, 100.0), BLUE),
        path(1, polygon(200.0, 50.0, 20.0, 16), GREEN),
        path(2, blob(300.0, 50.0, 3.0), RED),
    ]
}

#[test]
fn square_circle_and_dot_become_groups_and_marker() {
    init_logging();
    let paths = scenario_paths();
    let extractor = Extractor::new(params_with_keep(5, 5, 5)).expect("params");
    let report = extractor.extract(&paths).expect("extract");
    let result = &report.result;

    let blue: Vec<&PhysicalGroup> = result.groups_of(Category::Blue).collect();
    assert_eq!(blue.len(), 1);
    assert!(blue[0].holes.is_empty());
    let blue_segments: Vec<_> = blue[0].outer.segments().collect();
    assert_eq!(blue_segments.len(), 4);
    assert!(blue_segments.iter().all(|s| s.is_line()));
    assert!(approx_eq(blue[0].outer.signed_area(), 10_000.0, 1e-6));

    let green: Vec<&PhysicalGroup> = result.groups_of(Category::Green).collect();
    assert_eq!(green.len(), 1);
    assert!(green[0].holes.is_empty());
    assert!(green[0].outer.segments().all(|s| !s.is_line()));
    let ring = &paths[1].points;
    for p in ring {
        let d = green[0]
            .outer
            .segments()
            .map(|s| s.distance_to(*p))
            .fold(f64::INFINITY, f64::min);
        assert!(d <= 1.0, "vertex {p:?} is {d:.3} from the fitted circle");
    }
    let polygon_area = sketch_topology::geometry::signed_area(ring).abs();
    assert!(approx_eq(green[0].outer.area(), polygon_area, 0.05 * polygon_area));

    let red: Vec<&PointMarker> = result.markers_of(Category::Red).collect();
    assert_eq!(red.len(), 1);
    assert_eq!(red[0].id, SourceId(2));
    assert!(red[0].centroid.distance(Point::new(300.0, 50.0)) < 1e-6);
    assert_eq!(result.groups_of(Category::Red).count(), 0);

    let tags: Vec<u32> = result.groups.iter().map(|g| g.tag.0).collect();
    assert_eq!(tags, vec![1, 2]);
    assert!(blue[0].outermost);
    assert!(!green[0].outermost);

    assert!(report.trace.skipped.is_empty());
    assert!(report.trace.discarded.is_empty());
    assert!(report.trace.fit_warnings.is_empty());
}

#[test]
fn required_category_without_structures_fails() {
    init_logging();
    let params = ExtractorParams {
        required_categories: vec![Category::Blue, Category::Green],
        ..ExtractorParams::default()
    };
    let paths = vec![path(0, square(0.0, 0.0, 50.0), BLUE)];
    let err = Extractor::new(params)
        .expect("params")
        .extract(&paths)
        .unwrap_err();
    assert_eq!(
        err,
        ExtractError::EmptyPhysicalGroup {
            category: Category::Green
        }
    );
}

#[test]
fn keeps_only_the_largest_per_category() {
    init_logging();
    let paths = vec![
        path(0, square(0.0, 0.0, 10.0), BLUE),
        path(1, square(100.0, 0.0, 40.0), BLUE),
        path(2, square(200.0, 0.0, 20.0), BLUE),
        path(3, square(300.0, 0.0, 30.0), BLUE),
    ];
    let report = Extractor::new(params_with_keep(5, 2, 5))
        .expect("params")
        .extract(&paths)
        .expect("extract");

    let kept: Vec<SourceId> = report
        .result
        .groups
        .iter()
        .map(|g| g.outer.curves()[0].id)
        .collect();
    assert_eq!(kept, vec![SourceId(1), SourceId(3)]);

    let mut ranked_out: Vec<SourceId> = report
        .trace
        .discarded
        .iter()
        .filter(|d| d.reason == DiscardReason::RankedOut)
        .map(|d| d.id)
        .collect();
    ranked_out.sort();
    assert_eq!(ranked_out, vec![SourceId(0), SourceId(2)]);
    assert_eq!(report.trace.counts.ranked_out, 2);
}

#[test]
fn zero_keep_count_drops_the_category() {
    let paths = scenario_paths();
    let report = Extractor::new(params_with_keep(0, 5, 5))
        .expect("params")
        .extract(&paths)
        .expect("extract");
    assert_eq!(report.result.markers.len(), 0);
    assert_eq!(report.result.groups.len(), 2);
}

#[test]
fn inner_square_becomes_a_hole() {
    init_logging();
    let paths = vec![
        path(0, square(0.0, 0.0, 100.0), BLUE),
        path(1, square(30.0, 30.0, 40.0), BLUE),
        path(2, square(45.0, 45.0, 10.0), BLUE),
    ];
    let report = Extractor::new(ExtractorParams::default())
        .expect("params")
        .extract(&paths)
        .expect("extract");
    let groups = &report.result.groups;
    assert_eq!(groups.len(), 2);

    let outer = &groups[0];
    assert_eq!(outer.holes.len(), 1);
    assert!(outer.outer.signed_area() > 0.0);
    assert!(outer.holes[0].signed_area() < 0.0);
    assert!(approx_eq(outer.net_area(), 10_000.0 - 1_600.0, 1e-6));
    assert!(outer.outermost);

    let island = &groups[1];
    assert!(island.holes.is_empty());
    assert!(approx_eq(island.outer.signed_area(), 100.0, 1e-6));
    assert_eq!(report.trace.counts.holes, 1);
}

#[test]
fn double_traced_raster_outline_is_removed() {
    init_logging();
    let outer = path(0, square(0.0, 0.0, 100.0), BLUE).with_raster(0, 10_000.0);
    let inner = path(1, square(2.0, 2.0, 96.0), BLUE).with_raster(1, 9_216.0);
    let report = Extractor::new(ExtractorParams::default())
        .expect("params")
        .extract(&[outer, inner])
        .expect("extract");

    assert_eq!(report.result.groups.len(), 1);
    assert!(report.result.groups[0].holes.is_empty());
    assert_eq!(report.trace.discarded.len(), 1);
    assert_eq!(report.trace.discarded[0].id, SourceId(1));
    assert_eq!(
        report.trace.discarded[0].reason,
        DiscardReason::NestedDuplicate
    );
}

#[test]
fn paths_of_one_category_never_chain_with_another() {
    let a = vec![Point::new(0.0, 0.0), Point::new(40.0, 0.0), Point::new(40.0, 40.0)];
    let b = vec![Point::new(40.0, 40.0), Point::new(0.0, 40.0), Point::new(0.0, 0.0)];
    let report = Extractor::new(ExtractorParams::default())
        .expect("params")
        .extract(&[path(0, a, BLUE), path(1, b, GREEN)])
        .expect("extract");
    assert!(report.result.groups.is_empty());
    let reasons: Vec<SkipReason> = report.trace.skipped.iter().map(|s| s.reason).collect();
    assert_eq!(reasons, vec![SkipReason::Unclosable, SkipReason::Unclosable]);
}

#[derive(Default)]
struct Recorder {
    classified: Vec<(SourceId, Category)>,
    contours: usize,
    curves: usize,
    wires: usize,
    markers: usize,
    groups: usize,
}

impl PipelineObserver for Recorder {
    fn on_classified(&mut self, id: SourceId, category: Category) {
        self.classified.push((id, category));
    }
    fn on_contours(&mut self, contours: &[Contour]) {
        self.contours = contours.len();
    }
    fn on_curves(&mut self, curves: &[BoundaryCurve]) {
        self.curves = curves.len();
    }
    fn on_wires(&mut self, wires: &[Wire]) {
        self.wires = wires.len();
    }
    fn on_markers(&mut self, markers: &[PointMarker]) {
        self.markers = markers.len();
    }
    fn on_groups(&mut self, groups: &[PhysicalGroup]) {
        self.groups = groups.len();
    }
}

#[test]
fn observer_sees_every_stage() {
    let paths = scenario_paths();
    let mut recorder = Recorder::default();
    Extractor::new(ExtractorParams::default())
        .expect("params")
        .extract_observed(&paths, &mut recorder)
        .expect("extract");
    assert_eq!(
        recorder.classified,
        vec![
            (SourceId(0), Category::Blue),
            (SourceId(1), Category::Green),
            (SourceId(2), Category::Red),
        ]
    );
    assert_eq!(recorder.contours, 3);
    assert_eq!(recorder.curves, 2);
    assert_eq!(recorder.wires, 2);
    assert_eq!(recorder.markers, 1);
    assert_eq!(recorder.groups, 2);
}

#[test]
fn batch_results_keep_input_order() {
    let params = ExtractorParams {
        required_categories: vec![Category::Blue],
        ..ExtractorParams::default()
    };
    let extractor = Extractor::new(params).expect("params");
    let inputs = vec![
        scenario_paths(),
        vec![path(0, blob(10.0, 10.0, 3.0), RED)],
        vec![path(0, square(0.0, 0.0, 20.0), BLUE)],
    ];
    let results = extractor.extract_batch(&inputs);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().map(|r| r.result.groups.len()), Ok(2));
    assert!(matches!(
        results[1],
        Err(ExtractError::EmptyPhysicalGroup {
            category: Category::Blue
        })
    ));
    assert_eq!(results[2].as_ref().map(|r| r.result.groups.len()), Ok(1));
}

#[test]
fn results_are_deterministic() {
    let paths = scenario_paths();
    let extractor = Extractor::new(ExtractorParams::default()).expect("params");
    let a = extractor.extract(&paths).expect("first");
    let b = extractor.extract(&paths).expect("second");
    assert_eq!(a.result, b.result);
}

fn draw_square_outline(image: &mut RgbImage, lo: u32, hi: u32, half_width: u32, color: Rgb<u8>) {
    for y in lo - half_width..=hi + half_width {
        for x in lo - half_width..=hi + half_width {
            let near_x = x.abs_diff(lo) <= half_width || x.abs_diff(hi) <= half_width;
            let near_y = y.abs_diff(lo) <= half_width || y.abs_diff(hi) <= half_width;
            if near_x || near_y {
                image.put_pixel(x, y, color);
            }
        }
    }
}

#[test]
fn raster_contours_take_their_stroke_color() {
    init_logging();
    let mut image = RgbImage::from_pixel(80, 80, Rgb([255, 255, 255]));
    draw_square_outline(&mut image, 10, 50, 2, Rgb([20, 40, 230]));
    let contour = RasterContour {
        points: square(10.0, 10.0, 40.0),
        info: RasterInfo {
            depth: 0,
            pixel_area: 1_600.0,
        },
    };
    let params = ExtractorParams::default();
    let source = TracedRaster::new(&image, vec![contour], ColorClassifier::new(params.color), 1.5);
    let report = Extractor::new(params)
        .expect("params")
        .run(&source, &mut sketch_topology::pipeline::NoopObserver)
        .expect("extract");

    assert_eq!(report.trace.input.raster_paths, 1);
    let groups: Vec<&PhysicalGroup> = report.result.groups_of(Category::Blue).collect();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].outer.segment_count(), 4);
}

#[test]
fn white_paths_are_background() {
    let paths = vec![path(0, square(0.0, 0.0, 30.0), ColorSample::rgb(250, 250, 250))];
    let report = Extractor::new(ExtractorParams::default())
        .expect("params")
        .extract(&paths)
        .expect("extract");
    assert!(report.result.groups.is_empty());
    assert_eq!(report.trace.skipped[0].reason, SkipReason::Background);
}
