//! Recognition of YouTube-style links in free text.

use lazy_regex::regex;
use url::Url;

/// Extracts a YouTube link from a chat message.
///
/// The whole (trimmed) message must be the link. Scheme-less links get
/// `https://`. Only http(s) URLs on youtube.com / youtu.be /
/// youtube-nocookie.com hosts are accepted.
///
/// # Examples
/// ```
/// use tubegate::request::link::parse_media_link;
///
/// assert!(parse_media_link("https://youtu.be/dQw4w9WgXcQ").is_some());
/// assert!(parse_media_link("youtube.com/watch?v=dQw4w9WgXcQ").is_some());
/// assert!(parse_media_link("hello there").is_none());
/// ```
pub fn parse_media_link(text: &str) -> Option<Url> {
    let candidate = text.trim();
    let pattern = regex!(
        r"^(?i:https?://)?(?i:(?:www|m|music)\.)?(?i:youtube\.com/(?:watch\?(?:\S*&)?v=|shorts/|embed/|live/)|youtu\.be/|youtube-nocookie\.com/embed/)[A-Za-z0-9_-]{11}(?:[?&#/]\S*)?$"
    );
    if !pattern.is_match(candidate) {
        return None;
    }

    let with_scheme = if candidate.contains("://") {
        candidate.to_string()
    } else {
        format!("https://{}", candidate)
    };

    let url = Url::parse(&with_scheme).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    let host = url.host_str()?.to_ascii_lowercase();
    let is_youtube = host == "youtube.com"
        || host.ends_with(".youtube.com")
        || host == "youtu.be"
        || host == "youtube-nocookie.com"
        || host.ends_with(".youtube-nocookie.com");

    is_youtube.then_some(url)
}
