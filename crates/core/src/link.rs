//! YouTube link detection by string matching, for post intake.

use std::sync::LazyLock;

use regex::Regex;

static YOUTUBE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(https?://)?(www\.)?(youtube|youtu|youtube-nocookie)\.(com|be)/(watch\?v=|embed/|v/|.+\?v=)?([^&=%\?\s]{11})",
    )
    .expect("youtube link pattern is valid")
});

/// Find the first YouTube link in free text and normalize it to a canonical
/// watch URL.
pub fn find_youtube_link(text: &str) -> Option<String> {
    YOUTUBE_LINK
        .captures(text)
        .and_then(|caps| caps.get(6))
        .map(|id| format!("https://www.youtube.com/watch?v={}", id.as_str()))
}

/// Extract the 11-character video ID from a YouTube URL.
pub fn extract_video_id(link: &str) -> Option<String> {
    YOUTUBE_LINK
        .captures(link)
        .and_then(|caps| caps.get(6))
        .map(|id| id.as_str().to_string())
}
