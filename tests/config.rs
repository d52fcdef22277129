mod common;

use common::synthetic_paths::{blob, init_logging, path, polygon, square, BLUE, GREEN, RED};
use serde_json::{json, Value};
use sketch_topology::config::{load_params, load_tool_config, JsonConfigFile, JsonPathFile};
use sketch_topology::io::{write_json_file, write_text_file};
use sketch_topology::pipeline::{NoopObserver, PathSource};
use sketch_topology::{ExtractError, Extractor, ExtractorParams};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "sketch-topology-config-{name}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn default_params_json() -> Value {
    serde_json::to_value(ExtractorParams::default()).expect("serialize")
}

#[test]
fn params_file_roundtrip() {
    let dir = scratch_dir("roundtrip");
    let file = dir.join("params.json");
    write_json_file(&file, &ExtractorParams::default()).expect("write");
    assert_eq!(load_params(&file).expect("load"), ExtractorParams::default());
    let extractor = Extractor::from_config(&JsonConfigFile::new(&file)).expect("extractor");
    assert_eq!(extractor.params(), &ExtractorParams::default());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn params_file_missing_key_fails_fast() {
    let dir = scratch_dir("missing");
    let file = dir.join("params.json");
    let mut params = default_params_json();
    params["keep"]
        .as_object_mut()
        .expect("keep")
        .remove("red_dots");
    write_json_file(&file, &params).expect("write");
    match load_params(&file) {
        Err(ExtractError::Config(msg)) => assert!(msg.contains("red_dots"), "{msg}"),
        other => panic!("expected config error, got {other:?}"),
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn params_file_absent_is_io_error() {
    let file = scratch_dir("absent").join("params.json");
    assert!(matches!(load_params(&file), Err(ExtractError::Io(_))));
}

#[test]
fn tool_config_runs_end_to_end() {
    init_logging();
    let dir = scratch_dir("tool");
    let paths = vec![
        path(0, square(0.0, 0.0, 100.0), BLUE),
        path(1, polygon(200.0, 50.0, 20.0, 16), GREEN),
        path(2, blob(300.0, 50.0, 3.0), RED),
    ];
    write_json_file(&dir.join("paths.json"), &paths).expect("write paths");
    let tool = json!({
        "input": "paths.json",
        "params": default_params_json(),
        "output": { "report_json": "out/report.json", "svg": "out/result.svg" }
    });
    write_text_file(&dir.join("tool.json"), &tool.to_string()).expect("write tool");

    let config = load_tool_config(&dir.join("tool.json")).expect("tool config");
    assert_eq!(config.input, dir.join("paths.json"));
    assert_eq!(config.output.svg, Some(dir.join("out").join("result.svg")));

    let source = JsonPathFile::new(&config.input);
    assert_eq!(source.load_paths().expect("load"), paths);

    let report = Extractor::new(config.params)
        .expect("params")
        .run(&source, &mut NoopObserver)
        .expect("extract");
    assert_eq!(report.result.groups.len(), 2);
    assert_eq!(report.result.markers.len(), 1);

    write_json_file(&config.output.report_json, &report).expect("report");
    let written: Value =
        serde_json::from_str(&fs::read_to_string(&config.output.report_json).expect("read"))
            .expect("json");
    assert_eq!(written["trace"]["counts"]["groups"], json!(2));
    let _ = fs::remove_dir_all(&dir);
}
