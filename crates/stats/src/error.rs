use thiserror::Error;

/// Result type for statistics
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors raised by correlation analysis
#[derive(Error, Debug)]
pub enum StatsError {
    /// The two sequences differ in length
    #[error("Sequences differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Not enough observations for a correlation
    #[error("At least 2 observations are required, got {0}")]
    TooFewSamples(usize),

    /// A sample lacks metrics or a label
    #[error(transparent)]
    Dataset(#[from] fim_dataset::DatasetError),
}
