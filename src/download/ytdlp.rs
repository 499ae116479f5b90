use tokio::process::Command;

use crate::core::config;
use crate::core::error::AppError;
use crate::core::process::{run_with_timeout, stderr_tail};

/// How yt-dlp is launched: a program plus any leading arguments.
///
/// Built from `YTDL_BIN`, which may be a plain path (`/usr/local/bin/yt-dlp`)
/// or a launcher with arguments (`python3 -m yt_dlp`). URLs and output paths
/// are only ever appended as separate arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtDlpCommand {
    program: String,
    leading_args: Vec<String>,
}

impl YtDlpCommand {
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    /// Splits a `YTDL_BIN`-style string on whitespace; empty input falls back to `yt-dlp`.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split_whitespace().map(str::to_string);
        match parts.next() {
            Some(program) => Self::new(program, parts.collect()),
            None => Self::new("yt-dlp", Vec::new()),
        }
    }

    pub fn from_env() -> Self {
        Self::parse(&config::YTDL_BIN)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// A fresh `Command` with the leading arguments already applied.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args);
        cmd
    }
}

/// Returns the installed yt-dlp version.
///
/// Used at startup: the bot refuses to run without a working yt-dlp.
pub async fn ytdlp_version(ytdlp: &YtDlpCommand) -> Result<String, AppError> {
    let mut cmd = ytdlp.command();
    cmd.arg("--version");

    let output = run_with_timeout(&mut cmd, config::download::version_check_timeout())
        .await
        .map_err(|e| AppError::YtDlp(format!("{} is not available: {}", ytdlp.program(), e)))?;

    if !output.status.success() {
        return Err(AppError::YtDlp(format!(
            "{} --version failed: {}",
            ytdlp.program(),
            stderr_tail(&output)
        )));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(AppError::YtDlp(format!(
            "{} --version produced no output",
            ytdlp.program()
        )));
    }

    Ok(version)
}

/// Logs the yt-dlp version, failing if yt-dlp cannot be executed
pub async fn check_ytdlp_available(ytdlp: &YtDlpCommand) -> Result<(), AppError> {
    log::info!("Checking yt-dlp version...");
    let version = ytdlp_version(ytdlp).await?;
    log::info!("Current yt-dlp version: {}", version);
    Ok(())
}
