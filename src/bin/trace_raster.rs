use serde::Deserialize;
use sketch_topology::color::ColorClassifier;
use sketch_topology::io::{read_json, write_json_file, write_text_file};
use sketch_topology::pipeline::{ExtractorParams, NoopObserver, RasterContour, TracedRaster};
use sketch_topology::svg::{render_document, SvgStyle};
use sketch_topology::{ExtractError, Extractor};
use std::env;
use std::path::{Path, PathBuf};

/// Contours traced from a raster, colored by sampling the raster itself.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RasterToolConfig {
    pub image: PathBuf,
    /// JSON array of `{ points, info: { depth, pixel_area } }`.
    pub contours: PathBuf,
    pub stroke_radius: f64,
    pub params: ExtractorParams,
    pub output: RasterOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RasterOutputConfig {
    pub report_json: PathBuf,
    #[serde(default)]
    pub svg: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ExtractError> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: RasterToolConfig = read_json(Path::new(&config_path))?;

    let image = image::open(&config.image)
        .map_err(|e| ExtractError::Io(format!("Failed to open {}: {e}", config.image.display())))?
        .into_rgb8();
    let contours: Vec<RasterContour> = read_json(&config.contours)?;

    let extractor = Extractor::new(config.params.clone())?;
    let source = TracedRaster::new(
        &image,
        contours,
        ColorClassifier::new(config.params.color),
        config.stroke_radius,
    );
    let report = extractor.run(&source, &mut NoopObserver)?;

    println!(
        "Extracted {} groups and {} markers from {} contours ({} duplicates, {} noise)",
        report.result.groups.len(),
        report.result.markers.len(),
        report.trace.counts.input,
        report.trace.counts.duplicates,
        report.trace.counts.noise
    );

    write_json_file(&config.output.report_json, &report)?;
    println!("Report written to {}", config.output.report_json.display());
    if let Some(svg_path) = &config.output.svg {
        write_text_file(svg_path, &render_document(&report.result, &SvgStyle::default()))?;
        println!("SVG written to {}", svg_path.display());
    }
    Ok(())
}

fn usage() -> ExtractError {
    ExtractError::Config("Usage: trace_raster <config.json>".to_string())
}
