//! Process execution utilities with timeout support
//!
//! External tools (yt-dlp) are always started from an argument vector, never
//! through a shell, and are killed when their timeout expires.

use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Why an external process produced no output.
#[derive(Debug, Error)]
pub enum ProcessFailure {
    /// The binary could not be started or its pipes failed
    #[error("failed to run process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The process was still running when the timeout expired
    #[error("process timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Run an async Command with a timeout.
///
/// stdin is closed and the child is killed if the timeout drops it.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, ProcessFailure> {
    cmd.stdin(Stdio::null()).kill_on_drop(true);

    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(ProcessFailure::Spawn(e)),
        Err(_) => Err(ProcessFailure::TimedOut(timeout)),
    }
}

/// Last non-empty stderr line, trimmed to a loggable size.
pub fn stderr_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    line.chars().take(300).collect()
}
