use thiserror::Error;

/// Top-level error type for the capsule-chain builder.
#[derive(Debug, Error)]
pub enum RoundchainError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// Errors caused by a missing or degenerate control-point ring.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("at least 3 control points required, got {count}")]
    TooFewControlPoints { count: usize },

    #[error("curve has zero total arc length")]
    ZeroLength,

    #[error("non-finite input: {0}")]
    NonFinite(String),
}

/// Errors caused by out-of-range configuration.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid parameters: {0}")]
    Invalid(String),
}

/// Clustering stage that failed to find a structurally required merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStage {
    SimilarSize,
    Singles,
    SmallSteps,
    SmallDiff,
    Budget,
}

impl std::fmt::Display for MergeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SimilarSize => "similar-size",
            Self::Singles => "singles",
            Self::SmallSteps => "small-steps",
            Self::SmallDiff => "small-diff",
            Self::Budget => "budget",
        };
        f.write_str(name)
    }
}

/// Internal-consistency failures: a broken assumption inside the pipeline.
#[derive(Debug, Error)]
pub enum ConsistencyError {
    #[error("no possible merge found in {stage} stage")]
    NoMerge { stage: MergeStage },

    #[error("expected {expected} segments, produced {actual}")]
    SegmentCountMismatch { expected: usize, actual: usize },

    #[error("non-finite representative in merge: {absorbing} absorbing {absorbed}")]
    RepresentativeInvariant { absorbing: f64, absorbed: f64 },
}

/// Convenience type alias for results using [`RoundchainError`].
pub type Result<T> = std::result::Result<T, RoundchainError>;
