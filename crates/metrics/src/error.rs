use thiserror::Error;

/// Result type for metric computation
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors that can occur while scoring a completion
#[derive(Error, Debug)]
pub enum MetricsError {
    /// The sample has not been through generation yet
    #[error("Sample has no generation_result")]
    MissingGeneration,

    /// The sample span does not fit the file text
    #[error("Invalid span: start={start}, end={end}, text has {len} chars")]
    InvalidSpan { start: usize, end: usize, len: usize },

    /// No grammar is available for the file
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Tree-sitter could not be set up or produced no tree
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// Dataset record problem
    #[error(transparent)]
    Dataset(#[from] fim_dataset::DatasetError),
}

impl MetricsError {
    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }
}
