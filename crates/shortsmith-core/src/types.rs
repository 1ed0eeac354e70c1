use serde::{Deserialize, Serialize};

/// One timed unit of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedFragment {
    pub text: String,
    pub offset_seconds: f64,
    pub duration_seconds: f64,
}

impl TimedFragment {
    pub fn new(text: impl Into<String>, offset_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text: text.into(),
            offset_seconds,
            duration_seconds,
        }
    }

    pub fn end_seconds(&self) -> f64 {
        self.offset_seconds + self.duration_seconds
    }
}

/// A contiguous run of fragments considered as one clip.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSegment {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
    pub keywords: Vec<String>,
    pub score: f64,
}

impl CandidateSegment {
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub video_id: String,
    pub video_title: String,
    pub channel_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub clip_time: String,
    pub title: String,
    pub description: String,
    pub hashtags: Vec<String>,
    pub captions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoIdeas {
    pub video_id: String,
    pub video_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    pub ideas: Vec<Idea>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelIdeas {
    pub channel_name: String,
    pub ideas: Vec<Idea>,
    pub videos: Vec<VideoIdeas>,
}

/// Video metadata as reported by the metadata collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub channel_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub length_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelIdKind {
    /// Canonical `UC...` channel id
    ChannelId,
    /// Legacy `/c/` or `/user/` name
    Legacy,
    /// `@handle`
    Handle,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelVideo {
    pub video_id: String,
    pub title: String,
    pub author: Option<String>,
    pub view_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelListing {
    pub channel_name: Option<String>,
    pub alert_message: Option<String>,
    pub videos: Vec<ChannelVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub video_id: String,
    pub video_title: String,
}

/// Response body for a single generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerateResponse {
    #[serde(rename_all = "camelCase")]
    Video {
        video_id: String,
        video_title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel_name: Option<String>,
        ideas: Vec<Idea>,
    },
    #[serde(rename_all = "camelCase")]
    Channel {
        channel_name: String,
        ideas: Vec<Idea>,
        videos: Vec<VideoSummary>,
    },
}

impl From<VideoIdeas> for GenerateResponse {
    fn from(result: VideoIdeas) -> Self {
        GenerateResponse::Video {
            video_id: result.video_id,
            video_title: result.video_title,
            channel_name: result.channel_name,
            ideas: result.ideas,
        }
    }
}

impl From<ChannelIdeas> for GenerateResponse {
    fn from(result: ChannelIdeas) -> Self {
        GenerateResponse::Channel {
            channel_name: result.channel_name,
            ideas: result.ideas,
            videos: result
                .videos
                .into_iter()
                .map(|video| VideoSummary {
                    video_id: video.video_id,
                    video_title: video.video_title,
                })
                .collect(),
        }
    }
}

/// Whisper-style transcript file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<Segment>,
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Transcript {
    pub fn into_fragments(self) -> Vec<TimedFragment> {
        self.segments
            .into_iter()
            .map(|seg| TimedFragment {
                duration_seconds: (seg.end - seg.start).max(0.0),
                offset_seconds: seg.start,
                text: seg.text,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whisper_segments_become_fragments() {
        let transcript: Transcript = serde_json::from_str(
            r#"{"text":"hi there","language":"en","segments":[
                {"start":0.0,"end":2.5,"text":" hi"},
                {"start":2.5,"end":4.0,"text":" there"}]}"#,
        )
        .unwrap();

        let fragments = transcript.into_fragments();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[1].offset_seconds, 2.5);
        assert_eq!(fragments[1].duration_seconds, 1.5);
        assert_eq!(fragments[1].end_seconds(), 4.0);
    }

    #[test]
    fn channel_response_lists_video_summaries() {
        let response: GenerateResponse = ChannelIdeas {
            channel_name: "Chan".into(),
            ideas: vec![],
            videos: vec![VideoIdeas {
                video_id: "abc".into(),
                video_title: "Title".into(),
                channel_name: Some("Chan".into()),
                ideas: vec![],
            }],
        }
        .into();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "channel");
        assert_eq!(json["channelName"], "Chan");
        assert_eq!(json["videos"][0]["videoId"], "abc");
        assert_eq!(json["videos"][0]["videoTitle"], "Title");
    }
}
