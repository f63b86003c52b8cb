use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Failures of the cycle-averaging core. Any of these aborts the recording
/// being processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Fewer than two boundary markers, so no cycle can be formed.
    #[error("not enough diastolic peaks to calculate intervals (found {found}, need at least 2)")]
    InsufficientPeaks { found: usize },

    /// Every cycle had fewer than two samples.
    #[error("no valid intervals found for averaging")]
    NoValidIntervals,

    /// A required input column is absent.
    #[error("missing required column '{0}'")]
    MissingColumn(String),
}
