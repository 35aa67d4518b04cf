//! Utility functions for error handling
//!
//! File access helpers that turn bare IO failures into errors that say which
//! file was involved and what it was needed for.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{FertilityError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    check_is_file(path, purpose)?;

    fs::File::open(path).map_err(|e| describe_io_error(e, path, purpose))
}

/// Read a whole file into memory with the same error reporting as [`safe_open_file`]
pub fn safe_read_file(path: &Path, purpose: &str) -> Result<Vec<u8>> {
    check_is_file(path, purpose)?;

    fs::read(path).map_err(|e| describe_io_error(e, path, purpose))
}

fn check_is_file(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(FertilityError::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {} (needed for {purpose})", path.display()),
        )));
    }

    if !path.is_file() {
        return Err(FertilityError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Path is not a file: {} (expected a file for {purpose})", path.display()),
        )));
    }

    Ok(())
}

fn describe_io_error(error: io::Error, path: &Path, purpose: &str) -> FertilityError {
    let context = match error.kind() {
        io::ErrorKind::PermissionDenied => "Permission denied - check file permissions".to_string(),
        io::ErrorKind::NotFound => {
            "File not found - it may have been deleted during operation".to_string()
        }
        _ => format!("Failed to read file for {purpose}"),
    };

    FertilityError::IoError(io::Error::new(
        error.kind(),
        format!("{context}: {} ({error})", path.display()),
    ))
}
