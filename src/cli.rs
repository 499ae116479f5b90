use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::download::MediaKind;

#[derive(Parser, Debug)]
#[command(name = "tubegate")]
#[command(author, version, about = "Telegram bot that downloads YouTube videos within a daily quota", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Resolve a link and show the options the bot would offer
    Info {
        /// YouTube URL
        url: String,
    },

    /// Download one file without Telegram
    Download {
        /// YouTube URL
        url: String,

        /// video or audio
        #[arg(short, long, default_value = "video")]
        kind: MediaKind,

        /// Quality tier for video (e.g. 720p); ignored for audio
        #[arg(short, long, default_value = "720p")]
        format: String,

        /// Output file (defaults to a unique name in the download folder)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the installed yt-dlp version
    CheckYtdlp,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_download() {
        let cli = Cli::try_parse_from([
            "tubegate",
            "download",
            "https://youtu.be/dQw4w9WgXcQ",
            "--kind",
            "audio",
            "-o",
            "/tmp/song.m4a",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Download { url, kind, format, output }) => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(kind, MediaKind::Audio);
                assert_eq!(format, "720p");
                assert_eq!(output, Some(PathBuf::from("/tmp/song.m4a")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_command_and_bad_kind() {
        assert!(Cli::try_parse_from(["tubegate"]).unwrap().command.is_none());
        assert!(Cli::try_parse_from(["tubegate", "download", "x", "--kind", "gif"]).is_err());
    }
}
