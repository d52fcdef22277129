//! File helpers for JSON and text output.
//!
//! - `read_json`: parse a JSON file into any deserializable value.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `write_text_file`: write a string (e.g. an SVG document) to disk.
//!
//! Parent directories are created on write.
use crate::error::{ExtractError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read and parse a JSON file. Read errors map to [`ExtractError::Io`], parse
/// errors to [`ExtractError::Config`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ExtractError::Io(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&contents)
        .map_err(|e| ExtractError::Config(format!("Failed to parse {}: {e}", path.display())))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        ExtractError::Io(format!("Failed to serialize JSON for {}: {e}", path.display()))
    })?;
    write_text_file(path, &json)
}

pub fn write_text_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents)
        .map_err(|e| ExtractError::Io(format!("Failed to write {}: {e}", path.display())))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                ExtractError::Io(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}
