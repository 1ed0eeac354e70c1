use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    error::{Result, ShortsError},
    ideas::{build_fallback_ideas, segment_to_idea},
    segments::{build_segments, rank_segments},
    source::{ChannelSource, MetadataSource, TranscriptSource},
    types::{ChannelIdKind, ChannelIdeas, GenerationContext, Idea, TimedFragment, VideoIdeas},
    ytdlp::YtDlp,
};

const MAX_IDEAS_PER_VIDEO: usize = 3;
const MAX_CHANNEL_VIDEOS: usize = 3;
const MAX_CHANNEL_IDEAS: usize = 3;
const DEFAULT_CREATOR: &str = "Creator";
const DEFAULT_CHANNEL: &str = "Channel";

/// Ideas for one video given whatever transcript came back.
///
/// An empty transcript goes straight to the description fallback; a
/// transcript with no clip-sized window falls back on its own text.
pub fn generate_ideas(
    context: &GenerationContext,
    description: &str,
    transcript: &[TimedFragment],
) -> Vec<Idea> {
    if transcript.is_empty() {
        info!(video_id = %context.video_id, "no transcript, using description fallback");
        return build_fallback_ideas(context, description);
    }

    let candidates = build_segments(transcript);
    let candidate_count = candidates.len();
    let ranked = rank_segments(candidates);
    debug!(
        video_id = %context.video_id,
        candidates = candidate_count,
        ranked = ranked.len(),
        "transcript windows scored"
    );

    if ranked.is_empty() {
        info!(video_id = %context.video_id, "no clip-sized window, using transcript fallback");
        let text = transcript
            .iter()
            .map(|fragment| fragment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        return build_fallback_ideas(context, &text);
    }

    ranked
        .iter()
        .take(MAX_IDEAS_PER_VIDEO)
        .map(|segment| segment_to_idea(segment, context))
        .collect()
}

/// Runs the engine against the external collaborators.
pub struct IdeaGenerator {
    metadata: Arc<dyn MetadataSource>,
    transcripts: Arc<dyn TranscriptSource>,
    channels: Arc<dyn ChannelSource>,
}

impl IdeaGenerator {
    pub fn new(
        metadata: Arc<dyn MetadataSource>,
        transcripts: Arc<dyn TranscriptSource>,
        channels: Arc<dyn ChannelSource>,
    ) -> Self {
        Self {
            metadata,
            transcripts,
            channels,
        }
    }

    pub fn from_yt_dlp(yt_dlp: YtDlp) -> Self {
        let yt_dlp = Arc::new(yt_dlp);
        Self::new(yt_dlp.clone(), yt_dlp.clone(), yt_dlp)
    }

    /// Swap the transcript collaborator, e.g. for a local transcript file.
    pub fn with_transcripts(mut self, transcripts: Arc<dyn TranscriptSource>) -> Self {
        self.transcripts = transcripts;
        self
    }

    pub async fn generate_ideas_for_video(&self, video_id: &str) -> Result<VideoIdeas> {
        let details = self.metadata.fetch_details(video_id).await?;

        let transcript = match self.transcripts.fetch_transcript(video_id).await {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!(video_id, error = %e, "transcript unavailable");
                Vec::new()
            }
        };

        let channel_name = details
            .channel_name
            .clone()
            .unwrap_or_else(|| DEFAULT_CREATOR.to_string());
        let context = GenerationContext {
            video_id: video_id.to_string(),
            video_title: details.title.clone(),
            channel_name: Some(channel_name),
        };

        let ideas = generate_ideas(&context, &details.description, &transcript);

        Ok(VideoIdeas {
            video_id: context.video_id,
            video_title: context.video_title,
            channel_name: context.channel_name,
            ideas,
        })
    }

    /// Best idea from each of the channel's top videos.
    ///
    /// Videos that fail or produce nothing are skipped; the call fails only
    /// when the listing reports an alert or no video produced an idea.
    pub async fn generate_ideas_for_channel(
        &self,
        channel_id: &str,
        kind: ChannelIdKind,
    ) -> Result<ChannelIdeas> {
        let listing = self.channels.list_videos(channel_id, kind).await?;

        if let Some(message) = listing.alert_message.filter(|m| !m.trim().is_empty()) {
            return Err(ShortsError::ChannelAlert {
                channel_id: channel_id.to_string(),
                message,
            });
        }

        let channel_name = listing
            .channel_name
            .or_else(|| listing.videos.first().and_then(|v| v.author.clone()))
            .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());

        let mut videos = Vec::new();
        for video in listing.videos.iter().take(MAX_CHANNEL_VIDEOS) {
            match self.generate_ideas_for_video(&video.video_id).await {
                Ok(result) if !result.ideas.is_empty() => videos.push(result),
                Ok(_) => info!(video_id = %video.video_id, "video produced no ideas, skipping"),
                Err(e) => warn!(video_id = %video.video_id, error = %e, "video failed, skipping"),
            }
        }

        if videos.is_empty() {
            return Err(ShortsError::NoChannelIdeas {
                channel_id: channel_id.to_string(),
            });
        }

        let ideas = videos
            .iter()
            .filter_map(|video| video.ideas.first().cloned())
            .take(MAX_CHANNEL_IDEAS)
            .collect();

        Ok(ChannelIdeas {
            channel_name,
            ideas,
            videos,
        })
    }
}
