//! Collaborators backed by the `yt-dlp` command line tool.

use std::{
    cmp::Reverse,
    path::{Path, PathBuf},
    process::Output,
};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::{fs, process::Command};
use tracing::{debug, info};

use crate::{
    cache::{
        find_subtitle_in_cache, get_cache_dir, get_metadata_path, get_root_cache_dir,
        get_transcript_path, load_json, save_json,
    },
    error::{Result, ShortsError},
    source::{ChannelSource, MetadataSource, TranscriptSource},
    types::{ChannelIdKind, ChannelListing, ChannelVideo, TimedFragment, VideoDetails},
};

const DEFAULT_VIDEO_TITLE: &str = "YouTube Video";
const DEFAULT_CHANNEL_NAME: &str = "Creator";

#[derive(Debug, Clone)]
pub struct YtDlpConfig {
    pub binary: String,
    pub sub_langs: String,
    pub cache_root: PathBuf,
    /// Ignore cached metadata and transcripts
    pub force: bool,
    /// How many channel uploads to inspect before picking the most viewed
    pub channel_scan_limit: usize,
}

impl YtDlpConfig {
    pub const BINARY_ENV_VAR: &'static str = "SHORTSMITH_YT_DLP";

    pub fn from_env() -> Self {
        Self {
            binary: std::env::var(Self::BINARY_ENV_VAR).unwrap_or_else(|_| "yt-dlp".to_string()),
            ..Self::default()
        }
    }
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            binary: "yt-dlp".to_string(),
            sub_langs: "en".to_string(),
            cache_root: get_root_cache_dir(),
            force: false,
            channel_scan_limit: 30,
        }
    }
}

pub struct YtDlp {
    config: YtDlpConfig,
}

#[derive(Deserialize)]
struct YtDlpVideo {
    title: Option<String>,
    channel: Option<String>,
    uploader: Option<String>,
    description: Option<String>,
    duration: Option<f64>,
}

#[derive(Deserialize)]
struct YtDlpPlaylist {
    channel: Option<String>,
    uploader: Option<String>,
    #[serde(default)]
    entries: Vec<YtDlpEntry>,
}

#[derive(Deserialize)]
struct YtDlpEntry {
    id: String,
    title: Option<String>,
    channel: Option<String>,
    uploader: Option<String>,
    view_count: Option<u64>,
}

#[derive(Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    t_start_ms: Option<u64>,
    d_duration_ms: Option<u64>,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Decode a YouTube json3 caption track into ordered fragments.
///
/// Auto-generated tracks overlap (each line stays on screen while the next
/// one rolls in), so durations are clipped at the next fragment's start.
pub fn parse_json3(content: &str) -> Result<Vec<TimedFragment>> {
    let track: Json3 = serde_json::from_str(content)?;

    let mut fragments: Vec<TimedFragment> = track
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|seg| seg.utf8.as_str()).collect();
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            Some(TimedFragment::new(
                text,
                event.t_start_ms? as f64 / 1000.0,
                event.d_duration_ms.unwrap_or(0) as f64 / 1000.0,
            ))
        })
        .collect();

    fragments.sort_by(|a, b| a.offset_seconds.total_cmp(&b.offset_seconds));

    for i in 1..fragments.len() {
        let next_start = fragments[i].offset_seconds;
        let current = &mut fragments[i - 1];
        if current.end_seconds() > next_start {
            current.duration_seconds = (next_start - current.offset_seconds).max(0.0);
        }
    }

    Ok(fragments)
}

fn alert_from_stderr(stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    stderr
        .lines()
        .rev()
        .find(|line| line.starts_with("ERROR:"))
        .map(|line| line.trim_start_matches("ERROR:").trim().to_string())
        .unwrap_or_else(|| stderr.trim().to_string())
}

async fn remove_stale_subtitles(cache_dir: &Path) -> Result<()> {
    let mut entries = fs::read_dir(cache_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json3") {
            fs::remove_file(&path).await?;
        }
    }
    Ok(())
}

impl YtDlp {
    pub fn new(config: YtDlpConfig) -> Self {
        Self { config }
    }

    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }

    pub fn channel_videos_url(channel_id: &str, kind: ChannelIdKind) -> String {
        match kind {
            ChannelIdKind::Handle => format!("https://www.youtube.com/@{channel_id}/videos"),
            ChannelIdKind::ChannelId => {
                format!("https://www.youtube.com/channel/{channel_id}/videos")
            }
            ChannelIdKind::Legacy => format!("https://www.youtube.com/c/{channel_id}/videos"),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(binary = %self.config.binary, ?args, "running yt-dlp");
        let output = Command::new(&self.config.binary)
            .args(args)
            .arg("--no-warnings")
            .output()
            .await?;
        Ok(output)
    }

    fn tool_failed(&self, output: &Output) -> ShortsError {
        ShortsError::ToolFailed {
            tool: self.config.binary.clone(),
            reason: alert_from_stderr(&output.stderr),
        }
    }

    async fn download_transcript(
        &self,
        video_id: &str,
        cache_dir: &Path,
    ) -> Result<Vec<TimedFragment>> {
        fs::create_dir_all(cache_dir).await?;
        remove_stale_subtitles(cache_dir).await?;
        let output_template = cache_dir.join("subs.%(ext)s");
        let output_template = output_template.to_string_lossy();
        let url = Self::watch_url(video_id);

        let output = self
            .run(&[
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-langs",
                self.config.sub_langs.as_str(),
                "--sub-format",
                "json3",
                "-o",
                &*output_template,
                url.as_str(),
            ])
            .await?;

        if !output.status.success() {
            return Err(self.tool_failed(&output));
        }

        let subtitle = find_subtitle_in_cache(cache_dir, &self.config.sub_langs);
        let Some(subtitle_path) = subtitle else {
            info!(video_id, langs = %self.config.sub_langs, "no captions published for video");
            return Ok(Vec::new());
        };

        let content = fs::read_to_string(&subtitle_path).await?;
        parse_json3(&content)
    }
}

#[async_trait]
impl MetadataSource for YtDlp {
    async fn fetch_details(&self, video_id: &str) -> Result<VideoDetails> {
        let cache_dir = get_cache_dir(&self.config.cache_root, video_id);
        let metadata_path = get_metadata_path(&cache_dir);
        if !self.config.force && metadata_path.exists() {
            debug!(video_id, path = %metadata_path.display(), "metadata cache hit");
            return load_json(&metadata_path).await;
        }

        let url = Self::watch_url(video_id);
        let output = self
            .run(&["--dump-single-json", "--skip-download", url.as_str()])
            .await?;

        if !output.status.success() {
            return Err(ShortsError::MetadataFailed {
                video_id: video_id.to_string(),
                reason: alert_from_stderr(&output.stderr),
            });
        }

        let video: YtDlpVideo = serde_json::from_slice(&output.stdout)?;
        let details = VideoDetails {
            title: video
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VIDEO_TITLE.to_string()),
            channel_name: Some(
                video
                    .channel
                    .or(video.uploader)
                    .unwrap_or_else(|| DEFAULT_CHANNEL_NAME.to_string()),
            ),
            description: video.description.unwrap_or_default(),
            length_seconds: video.duration.unwrap_or(0.0).max(0.0) as u64,
        };

        save_json(&details, &metadata_path).await?;
        Ok(details)
    }
}

#[async_trait]
impl TranscriptSource for YtDlp {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TimedFragment>> {
        let cache_dir = get_cache_dir(&self.config.cache_root, video_id);
        let transcript_path = get_transcript_path(&cache_dir, &self.config.sub_langs);
        if !self.config.force && transcript_path.exists() {
            debug!(video_id, path = %transcript_path.display(), "transcript cache hit");
            return load_json(&transcript_path).await;
        }

        let fragments = self
            .download_transcript(video_id, &cache_dir)
            .await
            .map_err(|e| ShortsError::TranscriptFailed {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            })?;

        info!(video_id, fragments = fragments.len(), "transcript downloaded");
        save_json(&fragments, &transcript_path).await?;
        Ok(fragments)
    }
}

#[async_trait]
impl ChannelSource for YtDlp {
    async fn list_videos(&self, channel_id: &str, kind: ChannelIdKind) -> Result<ChannelListing> {
        let url = Self::channel_videos_url(channel_id, kind);
        let scan_limit = self.config.channel_scan_limit.to_string();
        let output = self
            .run(&[
                "--flat-playlist",
                "--dump-single-json",
                "--playlist-end",
                scan_limit.as_str(),
                url.as_str(),
            ])
            .await?;

        if !output.status.success() {
            return Ok(ChannelListing {
                alert_message: Some(alert_from_stderr(&output.stderr)),
                ..ChannelListing::default()
            });
        }

        let playlist: YtDlpPlaylist = serde_json::from_slice(&output.stdout)?;
        let mut videos: Vec<ChannelVideo> = playlist
            .entries
            .into_iter()
            .map(|entry| ChannelVideo {
                title: entry.title.unwrap_or_else(|| DEFAULT_VIDEO_TITLE.to_string()),
                author: entry.channel.or(entry.uploader),
                view_count: entry.view_count,
                video_id: entry.id,
            })
            .collect();

        // most viewed first; stable so unknown counts keep upload order
        videos.sort_by_key(|video| Reverse(video.view_count.unwrap_or(0)));

        info!(channel_id, videos = videos.len(), "channel listing fetched");
        Ok(ChannelListing {
            channel_name: playlist.channel.or(playlist.uploader),
            alert_message: None,
            videos,
        })
    }
}
