/// Embeddable player URLs for video items
///
/// Watch pages and short links of known providers are rewritten to the
/// provider's player URL. Anything else is passed through unchanged; it may
/// not be embeddable, which is acceptable.

use regex::Regex;
use std::sync::OnceLock;

fn youtube() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_\-]+)")
            .expect("static YouTube pattern is valid")
    })
}

fn vimeo() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"vimeo\.com/(\d+)").expect("static Vimeo pattern is valid"))
}

/// Derive the player URL for a video page
pub fn embed_url(url: &str) -> String {
    if let Some(caps) = youtube().captures(url) {
        return format!("https://www.youtube.com/embed/{}", &caps[2]);
    }

    if let Some(caps) = vimeo().captures(url) {
        return format!("https://player.vimeo.com/video/{}", &caps[1]);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_short_link() {
        assert_eq!(
            embed_url("https://youtu.be/ABC123"),
            "https://www.youtube.com/embed/ABC123"
        );
    }

    #[test]
    fn test_youtube_watch_page() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            embed_url("https://youtube.com/watch?v=a_b-C"),
            "https://www.youtube.com/embed/a_b-C"
        );
    }

    #[test]
    fn test_vimeo() {
        assert_eq!(
            embed_url("https://vimeo.com/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(embed_url("https://example.com/clip.mp4"), "https://example.com/clip.mp4");
        assert_eq!(embed_url(""), "");
    }
}
