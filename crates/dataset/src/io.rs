use crate::error::{DatasetError, Result};
use crate::types::SourceFile;
use std::fs;
use std::path::Path;

/// Parse and validate a dataset from raw JSON bytes
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<SourceFile>> {
    let files: Vec<SourceFile> = serde_json::from_slice(bytes)?;
    for file in &files {
        file.validate()?;
    }
    Ok(files)
}

/// Read a dataset file; malformed records fail the whole load
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<SourceFile>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| DatasetError::io(path, err))?;
    let files = parse_dataset(&bytes)?;
    log::debug!(
        "Loaded {} files / {} samples from {}",
        files.len(),
        files.iter().map(|f| f.samples.len()).sum::<usize>(),
        path.display()
    );
    Ok(files)
}

/// Serialize a dataset to compact JSON
pub fn serialize_dataset(files: &[SourceFile]) -> Result<String> {
    serde_json::to_string(files).map_err(Into::into)
}

/// Write the whole dataset, creating parent directories as needed
pub fn save_dataset(path: impl AsRef<Path>, files: &[SourceFile]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| DatasetError::io(parent, err))?;
    }
    let raw = serialize_dataset(files)?;
    fs::write(path, raw).map_err(|err| DatasetError::io(path, err))?;
    log::info!("Wrote {} files to {}", files.len(), path.display());
    Ok(())
}
