use crate::error::{Result, SamplerError};
use std::path::Path;

/// Translate `\r\n` and lone `\r` line breaks to `\n`
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split text into lines that keep their trailing `\n`
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Read a UTF-8 source file as newline-terminated lines
pub fn read_source_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SamplerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(split_lines(&normalize_newlines(&raw)))
}
