//! Recognizing YouTube video and channel links.
//!
//! Supported shapes:
//! - `https://youtu.be/VIDEO_ID`
//! - `https://www.youtube.com/watch?v=VIDEO_ID`
//! - `https://www.youtube.com/shorts/VIDEO_ID`
//! - `https://www.youtube.com/@handle`
//! - `https://www.youtube.com/channel/CHANNEL_ID`
//! - `https://www.youtube.com/c/NAME` and `/user/NAME`
//!
//! Scheme-less input such as `youtube.com/watch?v=...` is accepted.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::{
    error::{Result, ShortsError},
    types::ChannelIdKind,
};

const MIN_BARE_ID_LEN: usize = 10;

static LOOSE_VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})(?:[?&].*)?$").expect("loose video id pattern")
});
static HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtube\.com/@([^/?#]+)").expect("handle pattern"));
static CHANNEL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtube\.com/channel/([^/?#]+)").expect("channel pattern"));
static LEGACY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)youtube\.com/(?:c|user)/([^/?#]+)").expect("legacy channel pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Video {
        video_id: String,
    },
    Channel {
        channel_id: String,
        kind: ChannelIdKind,
    },
}

/// Classify a user-pasted link as a video or a channel.
pub fn parse_link(raw: &str) -> Result<LinkTarget> {
    if let Some(video_id) = extract_video_id(raw) {
        return Ok(LinkTarget::Video { video_id });
    }

    if let Some((channel_id, kind)) = extract_channel(raw) {
        return Ok(LinkTarget::Channel { channel_id, kind });
    }

    Err(ShortsError::UnrecognizedLink {
        url: raw.trim().to_string(),
    })
}

fn parse_url(raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(_) if !raw.contains("://") => Url::parse(&format!("https://{raw}")).ok(),
        Err(_) => None,
    }
}

fn is_id_chars(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_channel_path(first_segment: &str) -> bool {
    first_segment.starts_with('@') || matches!(first_segment, "channel" | "c" | "user")
}

pub fn extract_video_id(raw: &str) -> Option<String> {
    let raw = raw.trim();

    let Some(parsed) = parse_url(raw) else {
        return LOOSE_VIDEO_ID
            .captures(raw)
            .map(|caps| caps[1].to_string());
    };

    let host = parsed.host_str()?.to_ascii_lowercase();
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if host.contains("youtu.be") {
        return segments
            .first()
            .filter(|id| is_id_chars(id))
            .map(|id| id.to_string());
    }

    if !host.contains("youtube.com") {
        return None;
    }

    if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "v") {
        return is_id_chars(&id).then(|| id.into_owned());
    }

    match segments.as_slice() {
        ["shorts", id, ..] if is_id_chars(id) => Some(id.to_string()),
        [first, ..] if is_channel_path(first) => None,
        [.., last] if last.len() >= MIN_BARE_ID_LEN && is_id_chars(last) => Some(last.to_string()),
        _ => None,
    }
}

pub fn extract_channel(raw: &str) -> Option<(String, ChannelIdKind)> {
    let raw = raw.trim();

    let patterns: [(&Regex, ChannelIdKind); 3] = [
        (&HANDLE, ChannelIdKind::Handle),
        (&CHANNEL_ID, ChannelIdKind::ChannelId),
        (&LEGACY_NAME, ChannelIdKind::Legacy),
    ];

    patterns.into_iter().find_map(|(pattern, kind)| {
        pattern
            .captures(raw)
            .map(|caps| (caps[1].to_string(), kind))
    })
}
