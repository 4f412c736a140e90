use crate::ConstraintKind;

/// Outcome of a covering attempt that did not produce a full covering.
///
/// Only [`ImpossibleToFinish`](Self::ImpossibleToFinish) and
/// [`AttemptsExhausted`](Self::AttemptsExhausted) say anything about
/// feasibility; the cancellation variants merely mean the search was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum CoverError {
    /// The search ran out of blocks to try.
    #[display("impossible to finish the covering")]
    ImpossibleToFinish,
    /// The search was stopped through its cancellation token.
    #[display("covering was stopped")]
    Stopped,
    /// The search exceeded its deadline.
    #[display("covering timed out")]
    Timeout,
    /// Every attempt of the retry loop failed.
    #[display("no covering found in {attempts} attempts")]
    AttemptsExhausted {
        /// Number of attempts made.
        attempts: usize,
    },
}

impl CoverError {
    /// Returns `true` if the error stems from cancellation rather than from the search itself.
    #[must_use]
    pub fn is_cancellation(self) -> bool {
        matches!(self, CoverError::Stopped | CoverError::Timeout)
    }
}

/// Invalid model configuration, detected before any search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// Block sizes must be positive.
    #[display("block sizes must be positive")]
    ZeroBlockSize,
    /// The upper block size bound is below the lower one.
    #[display("maximal block size {max} is smaller than minimal block size {min}")]
    InvalidBlockSizeRange {
        /// Requested lower bound.
        min: usize,
        /// Requested upper bound.
        max: usize,
    },
    /// The constraint cannot be evaluated on a topology of this dimension.
    #[display("the {constraint} constraint is not supported in {dimensions} dimensions")]
    UnsupportedConstraint {
        /// The rejected constraint.
        constraint: ConstraintKind,
        /// Dimensions of the topology.
        dimensions: usize,
    },
}
