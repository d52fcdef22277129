use crate::error::ExtractError;
use crate::filter::DiscardReason;
use crate::types::{Category, SourceId};
use serde::{Deserialize, Serialize};

/// Why an input path produced no structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    Background,
    AmbiguousColor,
    Malformed,
    Unclosable,
}

/// An input path dropped before ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedStructure {
    pub id: SourceId,
    pub reason: SkipReason,
    pub message: String,
}

impl SkippedStructure {
    pub fn new(id: SourceId, reason: SkipReason, message: impl Into<String>) -> Self {
        Self {
            id,
            reason,
            message: message.into(),
        }
    }

    /// Errors that drop a structure map onto a skip record; fit warnings and
    /// fatal errors do not.
    pub fn from_error(err: &ExtractError) -> Option<Self> {
        let (id, reason) = match err {
            ExtractError::MalformedInput { id, .. } => (*id, SkipReason::Malformed),
            ExtractError::UnclosableContour { id, .. } => (*id, SkipReason::Unclosable),
            ExtractError::AmbiguousColor { id, .. } => (*id, SkipReason::AmbiguousColor),
            ExtractError::FittingFailure { .. }
            | ExtractError::EmptyWire { .. }
            | ExtractError::UnclosedRequiredCategory { .. }
            | ExtractError::EmptyPhysicalGroup { .. }
            | ExtractError::Config(_)
            | ExtractError::Io(_) => return None,
        };
        Some(Self::new(id, reason, err.to_string()))
    }
}

/// A valid structure removed by the filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardedStructure {
    pub id: SourceId,
    pub category: Category,
    pub area: f64,
    pub reason: DiscardReason,
}

/// A run that was emitted as a polyline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitWarning {
    pub id: SourceId,
    pub deviation: f64,
    pub epsilon: f64,
}

impl FitWarning {
    pub fn from_error(err: &ExtractError) -> Option<Self> {
        match *err {
            ExtractError::FittingFailure {
                id,
                deviation,
                epsilon,
            } => Some(Self {
                id,
                deviation,
                epsilon,
            }),
            _ => None,
        }
    }
}

/// Number of structures at each stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCounts {
    pub input: usize,
    pub classified: usize,
    pub closed: usize,
    pub open: usize,
    pub noise: usize,
    pub duplicates: usize,
    pub points: usize,
    pub curves: usize,
    pub chained_wires: usize,
    pub unclosable: usize,
    pub wires: usize,
    pub ranked_out: usize,
    pub groups: usize,
    pub holes: usize,
    pub markers: usize,
}
