//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A startup summary of the effective broker configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger was already installed
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the quota, gating and timeout settings the bot is running with
pub fn log_broker_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Broker configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!(
        "Daily quota: {} downloads per {}h",
        *config::quota::MAX_DAILY_DOWNLOADS,
        config::quota::WINDOW_HOURS
    );
    log::info!(
        "Duration gate: full ≤ {}s, audio-only ≤ {}s",
        *config::duration::FULL_MAX_SECS,
        *config::duration::AUDIO_MAX_SECS
    );
    log::info!(
        "Video tiers: {} -> format {}",
        config::formats::VIDEO_QUALITY_TIERS.join(", "),
        *config::formats::VIDEO_FORMAT_ID
    );
    log::info!(
        "Timeouts: metadata {}s, download {}s, option keyboard {}s",
        *config::download::METADATA_TIMEOUT_SECS,
        *config::download::DOWNLOAD_TIMEOUT_SECS,
        *config::download::REQUEST_TOKEN_TTL_SECS
    );
    log::info!("Download folder: {}", *config::DOWNLOAD_FOLDER);
    if let Some(url) = config::bot_api::local_url() {
        log::info!("Local Bot API server: {}", url);
    }
}
