use thiserror::Error;

/// Application-level errors raised outside of a single user request
/// (startup, CLI subcommands, bot wiring).
///
/// Per-request failures use [`crate::request::RequestError`] instead; those are
/// always turned into a chat message and never abort the process.
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// yt-dlp is missing or unusable
    #[error("yt-dlp error: {0}")]
    YtDlp(String),

    /// Metadata lookup failed (CLI paths)
    #[error(transparent)]
    Metadata(#[from] crate::download::MetadataError),

    /// Download failed (CLI paths)
    #[error(transparent)]
    Download(#[from] crate::download::DownloadError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
