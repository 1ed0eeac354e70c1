//! Shortsmith Core Library
//!
//! Finds highlight-worthy windows in a video transcript, scores them with a
//! deterministic heuristic and turns the best ones into short-form clip ideas.

pub mod cache;
pub mod error;
pub mod format;
pub mod ideas;
pub mod links;
pub mod pipeline;
pub mod segments;
pub mod source;
pub mod text;
pub mod types;
pub mod ytdlp;

// Re-export commonly used items at crate root
pub use error::{Result, ShortsError};
pub use format::{format_channel_readable, format_ideas_readable, format_timestamp};
pub use links::{LinkTarget, parse_link};
pub use pipeline::{IdeaGenerator, generate_ideas};
pub use source::{ChannelSource, FileTranscriptSource, MetadataSource, TranscriptSource};
pub use types::{
    CandidateSegment, ChannelIdKind, ChannelIdeas, ChannelListing, ChannelVideo,
    GenerateResponse, GenerationContext, Idea, TimedFragment, Transcript, VideoDetails,
    VideoIdeas,
};
pub use ytdlp::{YtDlp, YtDlpConfig};
