use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::time::Duration;

/// Configuration constants for the bot
/// yt-dlp invocation, read once from the YTDL_BIN environment variable.
/// May carry leading arguments, e.g. `python3 -m yt_dlp`.
/// Default: "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Download folder path
/// Read from DOWNLOAD_FOLDER environment variable
/// Supports tilde (~) expansion for home directory
/// Default: downloads (relative to the working directory)
pub static DOWNLOAD_FOLDER: Lazy<String> = Lazy::new(|| {
    let raw = env::var("DOWNLOAD_FOLDER").unwrap_or_else(|_| "downloads".to_string());
    shellexpand::tilde(&raw).into_owned()
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<Option<SecretString>> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .ok()
        .filter(|token| !token.trim().is_empty())
        .map(SecretString::from)
});

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    let parsed: Vec<String> = env::var(key)
        .ok()
        .map(|raw| {
            raw.split([',', ' '])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if parsed.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}

/// Daily quota configuration
pub mod quota {
    use super::{env_parse, Lazy};

    /// Maximum downloads per user inside one quota window
    /// Read from MAX_DAILY_DOWNLOADS environment variable, never below 1
    /// Default: 5
    pub static MAX_DAILY_DOWNLOADS: Lazy<u32> = Lazy::new(|| env_parse("MAX_DAILY_DOWNLOADS", 5u32).max(1));

    /// Length of the rolling quota window
    pub const WINDOW_HOURS: i64 = 24;
}

/// Duration gate thresholds
pub mod duration {
    use super::{env_parse, Lazy};

    /// Longest media (seconds) that still gets every video tier
    /// Read from FULL_MAX_DURATION_SECS environment variable
    /// Default: 1800 (30 minutes)
    pub static FULL_MAX_SECS: Lazy<u64> = Lazy::new(|| env_parse("FULL_MAX_DURATION_SECS", 1800u64));

    /// Longest media (seconds) that is still offered as audio
    /// Read from AUDIO_MAX_DURATION_SECS environment variable
    /// Default: 3600 (60 minutes)
    pub static AUDIO_MAX_SECS: Lazy<u64> =
        Lazy::new(|| env_parse("AUDIO_MAX_DURATION_SECS", 3600u64).max(*FULL_MAX_SECS));
}

/// yt-dlp format selection
pub mod formats {
    use super::{env_list, Lazy};
    use std::env;

    /// Video quality tiers offered to users (button labels and callback codes)
    /// Read from VIDEO_QUALITY_TIERS environment variable (comma-separated)
    /// Default: 144p,360p,720p
    pub static VIDEO_QUALITY_TIERS: Lazy<Vec<String>> =
        Lazy::new(|| env_list("VIDEO_QUALITY_TIERS", &["144p", "360p", "720p"]));

    /// yt-dlp format id every video tier maps to
    /// Read from VIDEO_FORMAT_ID environment variable
    /// Default: 18 (progressive mp4, no ffmpeg merge needed)
    pub static VIDEO_FORMAT_ID: Lazy<String> =
        Lazy::new(|| env::var("VIDEO_FORMAT_ID").unwrap_or_else(|_| "18".to_string()));

    /// yt-dlp format id for audio-only downloads
    /// Read from AUDIO_FORMAT_ID environment variable
    /// Default: bestaudio[ext=m4a] (must keep producing m4a, the saved extension)
    pub static AUDIO_FORMAT_ID: Lazy<String> =
        Lazy::new(|| env::var("AUDIO_FORMAT_ID").unwrap_or_else(|_| "bestaudio[ext=m4a]".to_string()));

    /// yt-dlp format id used for codes missing from the table
    /// Read from FALLBACK_FORMAT_ID environment variable
    pub static FALLBACK_FORMAT_ID: Lazy<String> =
        Lazy::new(|| env::var("FALLBACK_FORMAT_ID").unwrap_or_else(|_| "best".to_string()));
}

/// Download configuration
pub mod download {
    use super::{env_parse, Duration, Lazy};

    /// Timeout for yt-dlp metadata lookups (in seconds)
    /// Read from METADATA_TIMEOUT_SECS environment variable
    pub static METADATA_TIMEOUT_SECS: Lazy<u64> = Lazy::new(|| env_parse("METADATA_TIMEOUT_SECS", 60u64));

    /// Timeout for a single yt-dlp download (in seconds)
    /// Read from DOWNLOAD_TIMEOUT_SECS environment variable
    pub static DOWNLOAD_TIMEOUT_SECS: Lazy<u64> = Lazy::new(|| env_parse("DOWNLOAD_TIMEOUT_SECS", 600u64));

    /// How long an offered option keyboard stays usable (in seconds)
    /// Read from REQUEST_TOKEN_TTL_SECS environment variable
    pub static REQUEST_TOKEN_TTL_SECS: Lazy<u64> = Lazy::new(|| env_parse("REQUEST_TOKEN_TTL_SECS", 3600u64));

    /// Upper bound on simultaneously pending option keyboards
    pub const MAX_PENDING_REQUESTS: u64 = 10_000;

    /// Timeout for `yt-dlp --version`
    pub const VERSION_CHECK_TIMEOUT_SECS: u64 = 10;

    pub fn metadata_timeout() -> Duration {
        Duration::from_secs(*METADATA_TIMEOUT_SECS)
    }

    pub fn download_timeout() -> Duration {
        Duration::from_secs(*DOWNLOAD_TIMEOUT_SECS)
    }

    pub fn token_ttl() -> Duration {
        Duration::from_secs(*REQUEST_TOKEN_TTL_SECS)
    }

    pub fn version_check_timeout() -> Duration {
        Duration::from_secs(VERSION_CHECK_TIMEOUT_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Large uploads through a local Bot API server can take several minutes
    pub const REQUEST_TIMEOUT_SECS: u64 = 900;

    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Bot API server configuration utilities
pub mod bot_api {
    /// Returns the BOT_API_URL environment variable if set.
    pub fn get_url() -> Option<String> {
        std::env::var("BOT_API_URL").ok().filter(|url| !url.trim().is_empty())
    }

    /// Returns the local Bot API URL if using local server, None otherwise.
    pub fn local_url() -> Option<String> {
        get_url().filter(|url| is_local_url(url))
    }

    /// Checks if the given URL string points to a local Bot API server.
    pub fn is_local_url(url: &str) -> bool {
        !url.contains("api.telegram.org")
    }
}
