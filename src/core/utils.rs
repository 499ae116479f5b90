use std::sync::atomic::{AtomicU64, Ordering};

/// Maximum length of the base name produced by [`sanitize_filename`].
pub const MAX_BASE_NAME_LEN: usize = 50;

static FILE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Produces a filesystem-safe, bounded-length file name.
///
/// The extension is everything from the last `.` onward and is kept verbatim.
/// Every character of the base name outside `[A-Za-z0-9]` becomes `_`, and the
/// base is cut to [`MAX_BASE_NAME_LEN`] characters. Total for any input.
///
/// # Example
///
/// ```
/// use tubegate::core::utils::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Rick Astley - Never.mp4"), "Rick_Astley___Never.mp4");
/// assert_eq!(sanitize_filename("no extension"), "no_extension");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let (base, extension) = match name.rfind('.') {
        Some(dot) => name.split_at(dot),
        None => (name, ""),
    };

    let mut result: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_BASE_NAME_LEN)
        .collect();
    result.push_str(extension);
    result
}

/// Builds a per-job unique file name for a download.
///
/// The user id, a millisecond timestamp and a process-wide sequence number come
/// first so that truncation in [`sanitize_filename`] only ever cuts the title.
/// `extension` must be a trusted, dot-free value such as `"mp4"`.
pub fn unique_file_name(user_id: u64, title: &str, extension: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let sequence = FILE_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    sanitize_filename(&format!(
        "{}_{}_{}_{}.{}",
        user_id, timestamp, sequence, title, extension
    ))
}

/// Formats a duration in seconds as `m:ss` or `h:mm:ss`.
///
/// # Example
///
/// ```
/// use tubegate::core::utils::format_duration;
///
/// assert_eq!(format_duration(65), "1:05");
/// assert_eq!(format_duration(3725), "1:02:05");
/// ```
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_duration, sanitize_filename, unique_file_name, MAX_BASE_NAME_LEN};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_filename_replaces_non_alphanumerics() {
        assert_eq!(sanitize_filename("song name.mp3"), "song_name.mp3");
        assert_eq!(sanitize_filename("a/b\\c:d*e.mp4"), "a_b_c_d_e.mp4");
        assert_eq!(sanitize_filename("Mr. Bean live.mp4"), "Mr__Bean_live.mp4");
        assert_eq!(sanitize_filename("Дорадура.mp3"), "________.mp3");
    }

    #[test]
    fn test_sanitize_filename_without_extension() {
        assert_eq!(sanitize_filename("plain title"), "plain_title");
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("!!!"), "___");
    }

    #[test]
    fn test_sanitize_filename_keeps_extension_with_empty_base() {
        assert_eq!(sanitize_filename(".mp4"), ".mp4");
        assert_eq!(sanitize_filename("."), ".");
        assert_eq!(sanitize_filename("name."), "name.");
    }

    #[test]
    fn test_sanitize_filename_truncates_base() {
        let long = format!("{}.m4a", "x".repeat(120));
        let sanitized = sanitize_filename(&long);
        assert_eq!(sanitized, format!("{}.m4a", "x".repeat(MAX_BASE_NAME_LEN)));

        let multibyte = "é".repeat(80);
        assert_eq!(sanitize_filename(&multibyte).len(), MAX_BASE_NAME_LEN);
    }

    #[test]
    fn test_sanitize_filename_is_idempotent() {
        for input in [
            "Song (live) [2024].mp3",
            "weird..name...mp4",
            "no ext at all",
            "",
            "emoji 🎵 title.webm",
            &"long title ".repeat(20),
        ] {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_unique_file_name_is_unique_and_safe() {
        let first = unique_file_name(42, "My Video / Part 1", "mp4");
        let second = unique_file_name(42, "My Video / Part 1", "mp4");

        assert_ne!(first, second);
        assert!(first.starts_with("42_"));
        assert!(first.ends_with(".mp4"));
        assert!(!first.contains('/'));
        assert!(!first.contains(' '));
    }

    #[test]
    fn test_unique_file_name_keeps_prefix_for_long_titles() {
        let name = unique_file_name(7, &"t".repeat(200), "m4a");
        let base = name.trim_end_matches(".m4a");
        assert!(base.len() <= MAX_BASE_NAME_LEN);
        assert!(base.starts_with("7_"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_duration(3600), "1:00:00");
    }
}
