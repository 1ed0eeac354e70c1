use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShortsError {
    #[error("Unable to recognize {url} as a YouTube video or channel link")]
    UnrecognizedLink { url: String },

    #[error("Metadata lookup failed for {video_id}: {reason}")]
    MetadataFailed { video_id: String, reason: String },

    #[error("Transcript fetch failed for {video_id}: {reason}")]
    TranscriptFailed { video_id: String, reason: String },

    #[error("Channel {channel_id} is unavailable: {message}")]
    ChannelAlert { channel_id: String, message: String },

    #[error("Unable to generate ideas for channel {channel_id}")]
    NoChannelIdeas { channel_id: String },

    #[error("{tool} failed: {reason}")]
    ToolFailed { tool: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShortsError>;
