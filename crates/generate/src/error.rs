use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors that can occur while producing completions
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generation server answered with a non-success status
    #[error("Generation endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Loading or running the tokenizer failed
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Any backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// Dataset record problem
    #[error(transparent)]
    Dataset(#[from] fim_dataset::DatasetError),

    /// Scoring failed after generation
    #[error(transparent)]
    Metrics(#[from] fim_metrics::MetricsError),
}

impl GenerateError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a tokenizer error
    pub fn tokenizer(msg: impl Into<String>) -> Self {
        Self::Tokenizer(msg.into())
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
