//! JSON export of scan results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::ScanError;

/// Serialize a value as pretty JSON (two-space indent, non-ASCII kept literal).
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Write a value as pretty JSON to `path`, replacing any existing file.
///
/// Returns the number of bytes written. The file is flushed and closed before returning.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<u64, ScanError> {
    let json = to_json_string(value).map_err(|source| ScanError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let file = File::create(path).map_err(|e| ScanError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| ScanError::io(path, e))?;

    Ok(json.len() as u64)
}
