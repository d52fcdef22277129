//! Configuration of the command-line tool.
use crate::error::Result;
use crate::io::read_json;
use crate::pipeline::{ExtractorParams, PathSource};
use crate::types::TracedPath;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub report_json: PathBuf,
    #[serde(default)]
    pub svg: Option<PathBuf>,
}

/// `{ "input": ..., "params": {...}, "output": {...} }`
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// JSON file holding a list of traced paths.
    pub input: PathBuf,
    pub params: ExtractorParams,
    pub output: OutputConfig,
}

/// Load a tool configuration. Relative paths inside it are resolved against
/// the directory of the configuration file.
pub fn load_tool_config(path: &Path) -> Result<ToolConfig> {
    let mut config: ToolConfig = read_json(path)?;
    config.params.validate()?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let resolve = |p: &Path| {
        if p.is_relative() {
            base.join(p)
        } else {
            p.to_path_buf()
        }
    };
    config.input = resolve(&config.input);
    config.output.report_json = resolve(&config.output.report_json);
    config.output.svg = config.output.svg.as_deref().map(resolve);
    Ok(config)
}

/// [`PathSource`] reading a JSON array of [`TracedPath`] values.
#[derive(Clone, Debug)]
pub struct JsonPathFile {
    path: PathBuf,
}

impl JsonPathFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PathSource for JsonPathFile {
    fn load_paths(&self) -> Result<Vec<TracedPath>> {
        read_json(&self.path)
    }
}
