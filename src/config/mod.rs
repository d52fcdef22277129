//! JSON configuration loading.
//!
//! Parameter files are strict: every option of every stage must be spelled
//! out, unknown keys are rejected, and the result is validated before use. A
//! missing or misspelled key fails with [`ExtractError::Config`].
pub mod tool;

use crate::error::{ExtractError, Result};
use crate::io::read_json;
use crate::pipeline::{ConfigSource, ExtractorParams};
use std::path::{Path, PathBuf};

pub use tool::{load_tool_config, JsonPathFile, OutputConfig, ToolConfig};

/// Parse and validate parameters from a JSON string.
pub fn parse_params(json: &str) -> Result<ExtractorParams> {
    let params: ExtractorParams = serde_json::from_str(json)
        .map_err(|e| ExtractError::Config(format!("Failed to parse parameters: {e}")))?;
    params.validate()?;
    Ok(params)
}

/// Load and validate parameters from a JSON file.
pub fn load_params(path: &Path) -> Result<ExtractorParams> {
    let params: ExtractorParams = read_json(path)?;
    params.validate()?;
    Ok(params)
}

/// [`ConfigSource`] reading a parameter file on every call.
#[derive(Clone, Debug)]
pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for JsonConfigFile {
    fn load_params(&self) -> Result<ExtractorParams> {
        load_params(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn default_json() -> Value {
        serde_json::to_value(ExtractorParams::default()).expect("serialize defaults")
    }

    #[test]
    fn default_params_roundtrip() {
        let json = default_json().to_string();
        assert_eq!(parse_params(&json).expect("parse"), ExtractorParams::default());
    }

    #[test]
    fn missing_key_fails() {
        let mut json = default_json();
        json["closure"]
            .as_object_mut()
            .expect("closure object")
            .remove("tolerance");
        let err = parse_params(&json.to_string()).unwrap_err();
        match err {
            ExtractError::Config(msg) => assert!(msg.contains("tolerance"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_section_fails() {
        let mut json = default_json();
        json.as_object_mut().expect("root object").remove("keep");
        assert!(matches!(
            parse_params(&json.to_string()),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn unknown_key_fails() {
        let mut json = default_json();
        json["fit"]["bezier_eps"] = Value::from(1.0);
        assert!(matches!(
            parse_params(&json.to_string()),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let mut json = default_json();
        json["fit"]["bezier_epsilon"] = Value::from(0.1);
        assert!(matches!(
            parse_params(&json.to_string()),
            Err(ExtractError::Config(_))
        ));
    }
}
