//! Scoped ownership of a job's output file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Output path that is removed from disk when the guard goes out of scope.
///
/// Held for the whole dispatch → deliver sequence so the file disappears on
/// success, dispatcher failure, delivery failure and early returns alike.
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OutputFile {
    fn drop(&mut self) {
        match fs_err::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed output file {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove output file: {}", e),
        }
    }
}
