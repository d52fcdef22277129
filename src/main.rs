use sketch_topology::config::{load_tool_config, JsonPathFile};
use sketch_topology::diagnostics::ExtractionReport;
use sketch_topology::io::{write_json_file, write_text_file};
use sketch_topology::pipeline::NoopObserver;
use sketch_topology::svg::{render_document, SvgStyle};
use sketch_topology::types::Category;
use sketch_topology::{ExtractError, Extractor};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ExtractError> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_tool_config(Path::new(&config_path))?;

    let extractor = Extractor::new(config.params.clone())?;
    let report = extractor.run(&JsonPathFile::new(&config.input), &mut NoopObserver)?;

    print_summary(&report);

    write_json_file(&config.output.report_json, &report)?;
    println!("Report written to {}", config.output.report_json.display());

    if let Some(svg_path) = &config.output.svg {
        write_text_file(svg_path, &render_document(&report.result, &SvgStyle::default()))?;
        println!("SVG written to {}", svg_path.display());
    }

    Ok(())
}

fn print_summary(report: &ExtractionReport) {
    let counts = &report.trace.counts;
    println!("Extraction summary");
    println!("  input paths: {}", counts.input);
    for category in Category::ACTIVE {
        let groups = report.result.groups_of(category).count();
        let markers = report.result.markers_of(category).count();
        println!("  {category}: {groups} groups, {markers} markers");
    }
    println!("  holes: {}", counts.holes);
    println!("  skipped: {}", report.trace.skipped.len());
    println!("  discarded: {}", report.trace.discarded.len());
    println!("  fit warnings: {}", report.trace.fit_warnings.len());
    println!("  total_ms: {:.3}", report.trace.timings.total_ms);
    for stage in &report.trace.timings.stages {
        println!("    {}: {:.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn usage() -> ExtractError {
    ExtractError::Config("Usage: sketch-topology <config.json>".to_string())
}
