use std::path::PathBuf;
use thiserror::Error;

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors raised while reading, writing or validating a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading or writing the dataset file failed
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON or does not match the record shape
    #[error("Dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A sample span lies outside its file text
    #[error("{filename} sample #{index}: span {start}..{end} is outside the text ({len} chars)")]
    InvalidSpan {
        filename: String,
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A sample's `middle` is not the text its span covers
    #[error("{filename} sample #{index}: middle does not match text[{start}..{end}]")]
    MiddleMismatch {
        filename: String,
        index: usize,
        start: usize,
        end: usize,
    },

    /// A stage needs a field that an earlier stage should have written
    #[error("{filename} sample #{index}: missing `{field}`")]
    MissingField {
        filename: String,
        index: usize,
        field: &'static str,
    },
}

impl DatasetError {
    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing-field error
    pub fn missing(filename: impl Into<String>, index: usize, field: &'static str) -> Self {
        Self::MissingField {
            filename: filename.into(),
            index,
            field,
        }
    }
}
