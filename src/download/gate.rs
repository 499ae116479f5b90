//! Duration-based gating of the options offered for a media item.

use strum::{AsRefStr, Display, EnumString};

use crate::core::config;

/// What the user receives: a video file or an audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// Extension of the file written for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            MediaKind::Video => "mp4",
            MediaKind::Audio => "m4a",
        }
    }
}

/// Result of gating a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSet {
    /// Every video tier plus audio
    Full,
    /// Audio only
    AudioOnly,
    /// Too long; nothing is offered
    Rejected,
}

/// Format code used for the audio option.
pub const AUDIO_FORMAT_CODE: &str = "audio";

/// One selectable button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOption {
    pub kind: MediaKind,
    pub format_code: String,
    pub label: String,
}

impl DownloadOption {
    fn video(tier: &str) -> Self {
        Self {
            kind: MediaKind::Video,
            format_code: tier.to_string(),
            label: format!("🎬 {}", tier),
        }
    }

    fn audio() -> Self {
        Self {
            kind: MediaKind::Audio,
            format_code: AUDIO_FORMAT_CODE.to_string(),
            label: "🎵 Audio".to_string(),
        }
    }
}

/// Maps a media duration to the options a user may pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationPolicy {
    /// Longest duration (inclusive) that gets the full option set
    pub full_max_secs: u64,
    /// Longest duration (inclusive) that is still offered as audio
    pub audio_max_secs: u64,
    /// Video quality tiers offered under [`OptionSet::Full`]
    pub video_tiers: Vec<String>,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            full_max_secs: 30 * 60,
            audio_max_secs: 60 * 60,
            video_tiers: vec!["144p".to_string(), "360p".to_string(), "720p".to_string()],
        }
    }
}

impl DurationPolicy {
    pub fn from_env() -> Self {
        Self {
            full_max_secs: *config::duration::FULL_MAX_SECS,
            audio_max_secs: *config::duration::AUDIO_MAX_SECS,
            video_tiers: config::formats::VIDEO_QUALITY_TIERS.clone(),
        }
    }

    /// Total over every duration: `≤ full_max` is Full, `≤ audio_max` is AudioOnly, the rest is Rejected.
    pub fn gate(&self, duration_secs: u64) -> OptionSet {
        if duration_secs <= self.full_max_secs {
            OptionSet::Full
        } else if duration_secs <= self.audio_max_secs {
            OptionSet::AudioOnly
        } else {
            OptionSet::Rejected
        }
    }

    /// Buttons for an option set, videos first.
    pub fn options(&self, set: OptionSet) -> Vec<DownloadOption> {
        match set {
            OptionSet::Full => self
                .video_tiers
                .iter()
                .map(|tier| DownloadOption::video(tier))
                .chain(std::iter::once(DownloadOption::audio()))
                .collect(),
            OptionSet::AudioOnly => vec![DownloadOption::audio()],
            OptionSet::Rejected => Vec::new(),
        }
    }

    /// Whether `(kind, format_code)` is one of the buttons offered for `set`.
    pub fn permits(&self, set: OptionSet, kind: MediaKind, format_code: &str) -> bool {
        self.options(set)
            .iter()
            .any(|option| option.kind == kind && option.format_code == format_code)
    }
}
