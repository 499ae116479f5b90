use std::path::Path;
use url::Url;

use crate::core::utils::unique_file_name;
use crate::download::{MediaKind, OutputFile};

/// One dispatched download. Owns its output file, which is removed when the
/// job is dropped.
#[derive(Debug)]
pub struct DownloadJob {
    pub user_id: u64,
    pub source_url: Url,
    pub kind: MediaKind,
    pub format_code: String,
    output: OutputFile,
}

impl DownloadJob {
    /// Creates a job writing to a fresh unique file inside `download_dir`.
    pub fn new(user_id: u64, source_url: Url, kind: MediaKind, format_code: &str, title: &str, download_dir: &Path) -> Self {
        let file_name = unique_file_name(user_id, title, kind.extension());
        Self {
            user_id,
            source_url,
            kind,
            format_code: format_code.to_string(),
            output: OutputFile::new(download_dir.join(file_name)),
        }
    }

    pub fn output_path(&self) -> &Path {
        self.output.path()
    }
}
