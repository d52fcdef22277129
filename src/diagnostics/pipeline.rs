use super::{DiscardedStructure, FitWarning, SkippedStructure, StageCounts, TimingBreakdown};
use crate::error::ExtractError;
use crate::types::ExtractionResult;
use log::warn;
use serde::{Deserialize, Serialize};

/// Result produced by [`Extractor::extract`](crate::Extractor::extract).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub result: ExtractionResult,
    pub trace: PipelineTrace,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub paths: usize,
    /// Paths carrying raster nesting data.
    pub raster_paths: usize,
}

/// Everything the pipeline did with its input, beyond the result itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub counts: StageCounts,
    pub skipped: Vec<SkippedStructure>,
    pub discarded: Vec<DiscardedStructure>,
    pub fit_warnings: Vec<FitWarning>,
}

impl PipelineTrace {
    pub fn new(input: InputDescriptor) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    /// Logs a per-structure error and records it as skipped or as a fit
    /// warning.
    pub fn note(&mut self, err: &ExtractError) {
        warn!("{err}");
        if let Some(w) = FitWarning::from_error(err) {
            self.fit_warnings.push(w);
        } else if let Some(s) = SkippedStructure::from_error(err) {
            self.skipped.push(s);
        }
    }
}
