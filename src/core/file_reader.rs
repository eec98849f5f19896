//! Document reading
//!
//! Markdown files are read whole. Invalid UTF-8 is converted lossily and
//! flagged so the loader can surface a warning; any I/O failure is fatal.

use std::fs;
use std::path::Path;

use crate::core::error::CheckError;

/// Result of reading a file
#[derive(Debug, Clone)]
pub struct FileReadResult {
    pub content: String,

    /// Whether invalid UTF-8 sequences were replaced
    pub lossy_conversion: bool,
}

/// Read a file as text, replacing invalid UTF-8 sequences
pub fn read_text_lossy(path: &Path) -> Result<FileReadResult, CheckError> {
    let bytes = fs::read(path).map_err(|e| CheckError::io(path, e))?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(FileReadResult {
            content,
            lossy_conversion: false,
        }),
        Err(e) => Ok(FileReadResult {
            content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            lossy_conversion: true,
        }),
    }
}
