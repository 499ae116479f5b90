//! Media metadata lookup (title + duration) through yt-dlp.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::core::config;
use crate::core::process::{run_with_timeout, stderr_tail};
use crate::download::error::MetadataError;
use crate::download::ytdlp::YtDlpCommand;

/// Title and length of a media item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    pub title: String,
    pub duration_secs: u64,
}

/// Looks up metadata for a URL. No retries: callers decide what to do on failure.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, url: &Url) -> Result<MediaMetadata, MetadataError>;
}

/// Subset of `yt-dlp --dump-json` we rely on.
#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    title: String,
    duration: Option<f64>,
}

/// Parses one `--dump-json` object.
///
/// Fractional durations round up so that a 1800.4s video is gated as 1801s.
pub fn parse_metadata(stdout: &[u8]) -> Result<MediaMetadata, MetadataError> {
    let info: YtDlpInfo = serde_json::from_slice(stdout)?;

    let duration = info.duration.ok_or(MetadataError::MissingDuration)?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(MetadataError::MissingDuration);
    }

    let title = info.title.trim();
    Ok(MediaMetadata {
        title: if title.is_empty() { "untitled".to_string() } else { title.to_string() },
        duration_secs: duration.ceil() as u64,
    })
}

/// [`MetadataResolver`] backed by `yt-dlp --dump-json`.
#[derive(Debug, Clone)]
pub struct YtDlpMetadataResolver {
    ytdlp: YtDlpCommand,
    timeout: Duration,
}

impl YtDlpMetadataResolver {
    pub fn new(ytdlp: YtDlpCommand, timeout: Duration) -> Self {
        Self { ytdlp, timeout }
    }

    pub fn from_env() -> Self {
        Self::new(YtDlpCommand::from_env(), config::download::metadata_timeout())
    }
}

#[async_trait]
impl MetadataResolver for YtDlpMetadataResolver {
    async fn resolve(&self, url: &Url) -> Result<MediaMetadata, MetadataError> {
        let mut cmd = self.ytdlp.command();
        cmd.args(["--dump-json", "--no-playlist", "--no-warnings", "--", url.as_str()]);

        log::debug!("Resolving metadata for {}", url);
        let output = run_with_timeout(&mut cmd, self.timeout).await?;

        if !output.status.success() {
            return Err(MetadataError::Exit {
                code: output.status.code(),
                stderr: stderr_tail(&output),
            });
        }

        let metadata = parse_metadata(&output.stdout)?;
        log::info!(
            "Resolved metadata for {}: '{}' ({}s)",
            url,
            metadata.title,
            metadata.duration_secs
        );
        Ok(metadata)
    }
}
