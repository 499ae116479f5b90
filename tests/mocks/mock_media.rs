//! Metadata resolver and job dispatcher stand-ins

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use url::Url;

use tubegate::download::{DownloadError, JobDispatcher, MediaKind, MediaMetadata, MetadataError, MetadataResolver};

/// Returns a fixed duration (or fails) and counts calls.
pub struct MockResolver {
    duration_secs: Option<u64>,
    calls: AtomicUsize,
}

impl MockResolver {
    pub fn with_duration(duration_secs: u64) -> Self {
        Self {
            duration_secs: Some(duration_secs),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails like a yt-dlp that cannot reach the video.
    pub fn failing() -> Self {
        Self {
            duration_secs: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataResolver for MockResolver {
    async fn resolve(&self, _url: &Url) -> Result<MediaMetadata, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.duration_secs {
            Some(duration_secs) => Ok(MediaMetadata {
                title: "Test Video".to_string(),
                duration_secs,
            }),
            None => Err(MetadataError::Exit {
                code: Some(1),
                stderr: "ERROR: [youtube] dQw4w9WgXcQ: Video unavailable".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Writes the output file and succeeds
    Succeed,
    /// Writes a partial file, then fails
    FailAfterPartialWrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchCall {
    pub url: Url,
    pub kind: MediaKind,
    pub format_code: String,
    pub output_path: PathBuf,
}

pub struct MockDispatcher {
    mode: DispatchMode,
    calls: Mutex<Vec<DispatchCall>>,
}

impl MockDispatcher {
    pub fn new(mode: DispatchMode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<DispatchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobDispatcher for MockDispatcher {
    async fn run(&self, source_url: &Url, kind: MediaKind, format_code: &str, output_path: &Path) -> Result<(), DownloadError> {
        self.calls.lock().unwrap().push(DispatchCall {
            url: source_url.clone(),
            kind,
            format_code: format_code.to_string(),
            output_path: output_path.to_path_buf(),
        });

        match self.mode {
            DispatchMode::Succeed => {
                tokio::fs::write(output_path, b"media bytes").await.unwrap();
                Ok(())
            }
            DispatchMode::FailAfterPartialWrite => {
                tokio::fs::write(output_path, b"partial").await.unwrap();
                Err(DownloadError::Exit {
                    code: Some(1),
                    stderr: "ERROR: unable to download video data: HTTP Error 403".to_string(),
                })
            }
        }
    }
}
