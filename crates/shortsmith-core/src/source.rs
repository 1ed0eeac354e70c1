//! Seams to the outside world: video metadata, transcripts and channel
//! listings. The engine only sees these traits.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::{
    error::{Result, ShortsError},
    types::{ChannelIdKind, ChannelListing, TimedFragment, Transcript, VideoDetails},
};

#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_details(&self, video_id: &str) -> Result<VideoDetails>;
}

/// An empty list and an error mean the same thing to the engine: no transcript.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TimedFragment>>;
}

#[async_trait]
pub trait ChannelSource: Send + Sync {
    async fn list_videos(&self, channel_id: &str, kind: ChannelIdKind) -> Result<ChannelListing>;
}

/// Load a Whisper JSON transcript from disk
pub async fn load_transcript(path: &Path) -> Result<Transcript> {
    let json_content = fs::read_to_string(path).await?;
    let transcript: Transcript = serde_json::from_str(&json_content)?;
    Ok(transcript)
}

/// Serves one local Whisper transcript regardless of the requested video.
pub struct FileTranscriptSource {
    path: PathBuf,
}

impl FileTranscriptSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TranscriptSource for FileTranscriptSource {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TimedFragment>> {
        let transcript =
            load_transcript(&self.path)
                .await
                .map_err(|e| ShortsError::TranscriptFailed {
                    video_id: video_id.to_string(),
                    reason: format!("{}: {e}", self.path.display()),
                })?;
        Ok(transcript.into_fragments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_reads_whisper_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.json");
        std::fs::write(
            &path,
            r#"{"text":"a b","language":"en","segments":[{"start":1.0,"end":3.0,"text":"a b"}]}"#,
        )
        .unwrap();

        let fragments = FileTranscriptSource::new(&path)
            .fetch_transcript("ignored")
            .await
            .unwrap();
        assert_eq!(fragments, vec![TimedFragment::new("a b", 1.0, 2.0)]);
    }

    #[tokio::test]
    async fn missing_file_is_a_transcript_failure() {
        let err = FileTranscriptSource::new("/definitely/not/here.json")
            .fetch_transcript("vid")
            .await
            .unwrap_err();
        assert!(matches!(err, ShortsError::TranscriptFailed { .. }));
    }
}
