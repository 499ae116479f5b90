use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;
use url::Url;

use tubegate::cli::{Cli, Commands};
use tubegate::core::utils::{format_duration, unique_file_name};
use tubegate::core::{config, init_logger, log_broker_configuration, QuotaTracker};
use tubegate::download::ytdlp::{check_ytdlp_available, ytdlp_version};
use tubegate::download::{
    DurationPolicy, JobDispatcher, MediaKind, MetadataResolver, YtDlpCommand, YtDlpDispatcher, YtDlpMetadataResolver,
};
use tubegate::request::{parse_media_link, BrokerConfig, RequestBroker, RequestTokens};
use tubegate::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Parses CLI arguments and dispatches to the subcommand; runs the bot when none is given.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from handler tasks instead of losing them
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Info { url }) => run_cli_info(&url).await,
        Some(Commands::Download {
            url,
            kind,
            format,
            output,
        }) => run_cli_download(&url, kind, &format, output).await,
        Some(Commands::CheckYtdlp) => {
            let version = ytdlp_version(&YtDlpCommand::from_env()).await?;
            println!("yt-dlp {}", version);
            Ok(())
        }
    }
}

fn parse_link(raw: &str) -> Result<Url> {
    parse_media_link(raw).ok_or_else(|| anyhow::anyhow!("Not a YouTube URL: {}", raw))
}

/// Resolves a link and prints what the bot would offer for it
async fn run_cli_info(raw_url: &str) -> Result<()> {
    let url = parse_link(raw_url)?;
    let metadata = YtDlpMetadataResolver::from_env().resolve(&url).await?;
    let policy = DurationPolicy::from_env();
    let options = policy.gate(metadata.duration_secs);

    println!("Title:    {}", metadata.title);
    println!("Duration: {}", format_duration(metadata.duration_secs));
    println!("Options:  {:?}", options);
    for option in policy.options(options) {
        println!("  - {} ({}:{})", option.label, option.kind, option.format_code);
    }

    Ok(())
}

/// Runs one download job outside Telegram; the file is kept
async fn run_cli_download(raw_url: &str, kind: MediaKind, format: &str, output: Option<PathBuf>) -> Result<()> {
    let url = parse_link(raw_url)?;

    let output = match output {
        Some(path) => path,
        None => {
            fs_err::tokio::create_dir_all(config::DOWNLOAD_FOLDER.as_str()).await?;
            PathBuf::from(config::DOWNLOAD_FOLDER.as_str()).join(unique_file_name(0, "cli", kind.extension()))
        }
    };

    let format_code = match kind {
        MediaKind::Audio => tubegate::download::gate::AUDIO_FORMAT_CODE,
        MediaKind::Video => format,
    };

    YtDlpDispatcher::from_env().run(&url, kind, format_code, &output).await?;
    println!("Saved to {}", output.display());
    Ok(())
}

async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    let token = config::BOT_TOKEN
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN (or TELOXIDE_TOKEN) is not set"))?;

    let ytdlp = YtDlpCommand::from_env();
    check_ytdlp_available(&ytdlp).await?;

    let broker_config = BrokerConfig::from_env();
    broker_config.validate()?;

    fs_err::tokio::create_dir_all(config::DOWNLOAD_FOLDER.as_str()).await?;
    log_broker_configuration();

    let broker = RequestBroker::new(
        Arc::new(QuotaTracker::from_env()),
        Arc::new(YtDlpMetadataResolver::from_env()),
        Arc::new(YtDlpDispatcher::from_env()),
        RequestTokens::from_env(),
        broker_config,
    );
    let deps = HandlerDeps::new(Arc::new(broker));

    let bot = create_bot(token)?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    log::info!("Bot is running (long polling)");
    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
