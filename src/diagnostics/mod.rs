//! Diagnostics returned next to the extraction result.
//!
//! `ExtractionReport` is the main entry point returned by the extractor,
//! bundling the `ExtractionResult` with a `PipelineTrace` of what every stage
//! kept, skipped and discarded, plus per-stage timings.

pub mod pipeline;
pub mod structures;
pub mod timing;

pub use pipeline::{ExtractionReport, InputDescriptor, PipelineTrace};
pub use structures::{DiscardedStructure, FitWarning, SkipReason, SkippedStructure, StageCounts};
pub use timing::{StageTiming, TimingBreakdown};
