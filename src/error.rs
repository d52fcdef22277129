use crate::color::ColorSample;
use crate::types::{Category, SourceId};

/// Errors raised by the extraction stages.
///
/// `MalformedInput`, `UnclosableContour`, `AmbiguousColor` and
/// `FittingFailure` are per-structure: the pipeline records them in the trace
/// and keeps going. `UnclosedRequiredCategory`, `EmptyPhysicalGroup`,
/// `Config` and `Io` abort the run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    #[error("malformed input {id}: {reason}")]
    MalformedInput { id: SourceId, reason: String },

    #[error("contour {id} is open: endpoint gap {gap:.3} exceeds closure tolerance {tolerance:.3}")]
    UnclosableContour {
        id: SourceId,
        gap: f64,
        tolerance: f64,
    },

    #[error("fit of {id} deviates by {deviation:.3} (limit {epsilon:.3}); using polyline")]
    FittingFailure {
        id: SourceId,
        deviation: f64,
        epsilon: f64,
    },

    #[error("color {color} of {id} matches no category")]
    AmbiguousColor { id: SourceId, color: ColorSample },

    #[error(
        "required category {category} has no closed structure: {id} is open (gap {gap:.3}, tolerance {tolerance:.3})"
    )]
    UnclosedRequiredCategory {
        category: Category,
        id: SourceId,
        gap: f64,
        tolerance: f64,
    },

    #[error("wire of category {category} has no curves")]
    EmptyWire { category: Category },

    #[error("required category {category} has no surviving structures")]
    EmptyPhysicalGroup { category: Category },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(String),
}

impl ExtractError {
    pub(crate) fn malformed(id: SourceId, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            id,
            reason: reason.into(),
        }
    }

    /// True for errors that must abort the whole invocation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnclosedRequiredCategory { .. }
                | Self::EmptyPhysicalGroup { .. }
                | Self::Config(_)
                | Self::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_structure_errors_are_not_fatal() {
        let id = SourceId(3);
        assert!(!ExtractError::malformed(id, "too short").is_fatal());
        assert!(!ExtractError::UnclosableContour {
            id,
            gap: 9.0,
            tolerance: 5.0
        }
        .is_fatal());
        assert!(!ExtractError::FittingFailure {
            id,
            deviation: 2.0,
            epsilon: 1.0
        }
        .is_fatal());
    }

    #[test]
    fn run_aborting_errors_are_fatal() {
        assert!(ExtractError::UnclosedRequiredCategory {
            category: Category::Blue,
            id: SourceId(1),
            gap: 9.0,
            tolerance: 5.0
        }
        .is_fatal());
        assert!(ExtractError::EmptyPhysicalGroup {
            category: Category::Green
        }
        .is_fatal());
        assert!(ExtractError::Config("missing key".into()).is_fatal());
    }
}
