//! Errors raised while summarizing bootstrap replicates.

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// No replicate values to summarize.
    EmptySample,
    NonFiniteSample { index: usize, value: f64 },
    /// Significance level outside the open interval `(0, 1)`.
    InvalidAlpha { alpha: f64 },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::EmptySample => write!(f, "no bootstrap replicates to summarize"),
            InferenceError::NonFiniteSample { index, value } => {
                write!(f, "bootstrap replicate {index} is {value}")
            }
            InferenceError::InvalidAlpha { alpha } => {
                write!(f, "alpha = {alpha}; must lie strictly between 0 and 1")
            }
        }
    }
}
