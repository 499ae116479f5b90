//! Download job execution through yt-dlp.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::core::config;
use crate::core::process::{run_with_timeout, stderr_tail};
use crate::download::error::DownloadError;
use crate::download::gate::MediaKind;
use crate::download::ytdlp::YtDlpCommand;

/// Maps user-facing format codes to yt-dlp `-f` selectors.
///
/// Kept as a table so each tier can be pointed at its own selector without
/// touching the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTable {
    video: HashMap<String, String>,
    audio: String,
    fallback: String,
}

impl FormatTable {
    pub fn new(video: HashMap<String, String>, audio: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            video,
            audio: audio.into(),
            fallback: fallback.into(),
        }
    }

    /// Every tier mapped to the same selector.
    pub fn uniform(tiers: &[String], video_id: &str, audio_id: &str, fallback_id: &str) -> Self {
        let video = tiers.iter().map(|tier| (tier.clone(), video_id.to_string())).collect();
        Self::new(video, audio_id, fallback_id)
    }

    pub fn from_env() -> Self {
        Self::uniform(
            &config::formats::VIDEO_QUALITY_TIERS,
            &config::formats::VIDEO_FORMAT_ID,
            &config::formats::AUDIO_FORMAT_ID,
            &config::formats::FALLBACK_FORMAT_ID,
        )
    }

    /// Audio always maps to the audio selector; unknown video codes fall back.
    pub fn select(&self, kind: MediaKind, format_code: &str) -> &str {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => self.video.get(format_code).map(String::as_str).unwrap_or(&self.fallback),
        }
    }

    /// Overrides the selector for a single tier.
    pub fn with_tier(mut self, tier: &str, selector: &str) -> Self {
        self.video.insert(tier.to_string(), selector.to_string());
        self
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        let tiers: Vec<String> = ["144p", "360p", "720p"].iter().map(|s| s.to_string()).collect();
        Self::uniform(&tiers, "18", "bestaudio[ext=m4a]", "best")
    }
}

/// Runs one download into `output_path`. Never deletes anything.
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    async fn run(
        &self,
        source_url: &Url,
        kind: MediaKind,
        format_code: &str,
        output_path: &Path,
    ) -> Result<(), DownloadError>;
}

/// [`JobDispatcher`] backed by yt-dlp.
#[derive(Debug, Clone)]
pub struct YtDlpDispatcher {
    ytdlp: YtDlpCommand,
    formats: FormatTable,
    timeout: Duration,
}

impl YtDlpDispatcher {
    pub fn new(ytdlp: YtDlpCommand, formats: FormatTable, timeout: Duration) -> Self {
        Self { ytdlp, formats, timeout }
    }

    pub fn from_env() -> Self {
        Self::new(
            YtDlpCommand::from_env(),
            FormatTable::from_env(),
            config::download::download_timeout(),
        )
    }
}

#[async_trait]
impl JobDispatcher for YtDlpDispatcher {
    async fn run(
        &self,
        source_url: &Url,
        kind: MediaKind,
        format_code: &str,
        output_path: &Path,
    ) -> Result<(), DownloadError> {
        let selector = self.formats.select(kind, format_code);

        let mut cmd = self.ytdlp.command();
        cmd.args(["-f", selector, "--no-playlist", "--no-warnings", "--no-part", "--force-overwrites", "-o"])
            .arg(output_path)
            .args(["--", source_url.as_str()]);

        log::info!(
            "Starting {} download ({} -> -f {}) for {} into {}",
            kind,
            format_code,
            selector,
            source_url,
            output_path.display()
        );

        let output = run_with_timeout(&mut cmd, self.timeout).await?;

        if !output.status.success() {
            return Err(DownloadError::Exit {
                code: output.status.code(),
                stderr: stderr_tail(&output),
            });
        }

        if fs_err::tokio::metadata(output_path).await.is_err() {
            return Err(DownloadError::MissingOutput(output_path.to_path_buf()));
        }

        Ok(())
    }
}
