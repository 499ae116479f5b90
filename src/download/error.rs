use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::core::process::ProcessFailure;

/// Failure while looking up title/duration for a URL.
///
/// Carries enough detail for logs; never shown to users verbatim.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// yt-dlp could not be started
    #[error("failed to start yt-dlp: {0}")]
    Spawn(#[source] std::io::Error),

    /// yt-dlp exited with a non-zero status
    #[error("yt-dlp exited with {code:?}: {stderr}")]
    Exit { code: Option<i32>, stderr: String },

    /// stdout was not the expected JSON object
    #[error("malformed yt-dlp output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The media has no usable duration (live streams, premieres)
    #[error("media has no known duration")]
    MissingDuration,

    /// The lookup exceeded its time budget
    #[error("metadata lookup timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl From<ProcessFailure> for MetadataError {
    fn from(failure: ProcessFailure) -> Self {
        match failure {
            ProcessFailure::Spawn(e) => MetadataError::Spawn(e),
            ProcessFailure::TimedOut(after) => MetadataError::Timeout(after),
        }
    }
}

/// Failure while producing the output file for a download job.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// yt-dlp could not be started
    #[error("failed to start yt-dlp: {0}")]
    Spawn(#[source] std::io::Error),

    /// yt-dlp exited with a non-zero status
    #[error("yt-dlp exited with {code:?}: {stderr}")]
    Exit { code: Option<i32>, stderr: String },

    /// The download exceeded its time budget
    #[error("download timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// yt-dlp reported success but wrote nothing at the expected path
    #[error("expected output file not found: {}", .0.display())]
    MissingOutput(PathBuf),
}

impl From<ProcessFailure> for DownloadError {
    fn from(failure: ProcessFailure) -> Self {
        match failure {
            ProcessFailure::Spawn(e) => DownloadError::Spawn(e),
            ProcessFailure::TimedOut(after) => DownloadError::Timeout(after),
        }
    }
}

impl DownloadError {
    /// Returns subcategory for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            DownloadError::Spawn(_) => "spawn",
            DownloadError::Exit { .. } => "exit",
            DownloadError::Timeout(_) => "timeout",
            DownloadError::MissingOutput(_) => "missing_output",
        }
    }
}
