//! Checks the yt-dlp adapters against a real yt-dlp installation
//!
//! Needs yt-dlp on PATH (or YTDL_BIN) and network access, so every test is ignored by default.
//!
//! Run with: cargo test --test ytdlp_integration_test -- --ignored --nocapture --test-threads=1

use std::time::Duration;

use tempfile::TempDir;
use url::Url;

use tubegate::download::ytdlp::ytdlp_version;
use tubegate::download::{
    DurationPolicy, FormatTable, JobDispatcher, MediaKind, MetadataResolver, OptionSet, YtDlpCommand,
    YtDlpDispatcher, YtDlpMetadataResolver,
};

/// "Me at the zoo": 19 seconds, small and stable
const SHORT_VIDEO: &str = "https://www.youtube.com/watch?v=jNQXAC9IVRw";

fn short_video() -> Url {
    Url::parse(SHORT_VIDEO).unwrap()
}

#[tokio::test]
#[ignore]
async fn test_ytdlp_installed() {
    let version = ytdlp_version(&YtDlpCommand::from_env()).await.unwrap();
    println!("yt-dlp {}", version);
    assert!(!version.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_resolve_short_video() {
    let resolver = YtDlpMetadataResolver::new(YtDlpCommand::from_env(), Duration::from_secs(60));
    let metadata = resolver.resolve(&short_video()).await.unwrap();

    println!("{:?}", metadata);
    assert!(metadata.duration_secs > 0 && metadata.duration_secs < 60);
    assert_eq!(DurationPolicy::default().gate(metadata.duration_secs), OptionSet::Full);
}

#[tokio::test]
#[ignore]
async fn test_download_short_video_as_audio() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("zoo.m4a");
    let dispatcher = YtDlpDispatcher::new(YtDlpCommand::from_env(), FormatTable::default(), Duration::from_secs(300));

    dispatcher
        .run(&short_video(), MediaKind::Audio, "audio", &output)
        .await
        .unwrap();

    let size = std::fs::metadata(&output).unwrap().len();
    println!("downloaded {} bytes", size);
    assert!(size > 0);
}
