//! Download adapters: duration gating, metadata lookup, job dispatch and cleanup

pub mod cleanup;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod metadata;
pub mod ytdlp;

// Re-exports for convenience
pub use cleanup::OutputFile;
pub use dispatcher::{FormatTable, JobDispatcher, YtDlpDispatcher};
pub use error::{DownloadError, MetadataError};
pub use gate::{DownloadOption, DurationPolicy, MediaKind, OptionSet};
pub use metadata::{MediaMetadata, MetadataResolver, YtDlpMetadataResolver};
pub use ytdlp::YtDlpCommand;
