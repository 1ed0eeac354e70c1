use crate::types::{ChannelIdeas, Idea, VideoIdeas};

/// Format seconds as MM:SS timestamp. Minutes are not wrapped into hours.
pub fn format_timestamp(seconds: f64) -> String {
    let whole = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

pub fn format_clip_time(start: f64, end: f64) -> String {
    format!("{}-{}", format_timestamp(start), format_timestamp(end))
}

fn push_idea(output: &mut String, index: usize, idea: &Idea) {
    output.push_str(&format!("### {}. [{}] {}\n\n", index + 1, idea.clip_time, idea.title));
    output.push_str(&format!("{}\n\n", idea.description));
    output.push_str(&format!("{}\n\n", idea.hashtags.join(" ")));
    output.push_str("```\n");
    output.push_str(&idea.captions);
    output.push_str("\n```\n\n");
}

/// Format a video's ideas as human-readable markdown
pub fn format_ideas_readable(result: &VideoIdeas) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", result.video_title));

    if let Some(channel) = &result.channel_name {
        output.push_str(&format!(
            "**Channel:** {} | **Video:** {}\n\n",
            channel, result.video_id
        ));
    }

    output.push_str("## Clip ideas\n\n");
    for (i, idea) in result.ideas.iter().enumerate() {
        push_idea(&mut output, i, idea);
    }

    output
}

pub fn format_channel_readable(result: &ChannelIdeas) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", result.channel_name));

    output.push_str("## Videos\n\n");
    for video in &result.videos {
        output.push_str(&format!("• {} ({})\n", video.video_title, video.video_id));
    }
    output.push('\n');

    output.push_str("## Best clip ideas\n\n");
    for (i, idea) in result.ideas.iter().enumerate() {
        push_idea(&mut output, i, idea);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_zero_padded() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(45.9), "00:45");
        assert_eq!(format_timestamp(90.0), "01:30");
        assert_eq!(format_timestamp(-3.0), "00:00");
    }

    #[test]
    fn long_videos_overflow_minutes() {
        assert_eq!(format_timestamp(100.0 * 60.0 + 7.0), "100:07");
        assert_eq!(format_clip_time(61.2, 118.7), "01:01-01:58");
    }

    #[test]
    fn readable_output_lists_every_idea() {
        let idea = Idea {
            clip_time: "00:00-00:45".into(),
            title: "Must-See Rust You Need To Try".into(),
            description: "Highlighting rust from Talk.".into(),
            hashtags: vec!["#shorts".into(), "#rust".into()],
            captions: "⚡ one".into(),
        };
        let result = VideoIdeas {
            video_id: "dQw4w9WgXcQ".into(),
            video_title: "Talk".into(),
            channel_name: Some("Creator".into()),
            ideas: vec![idea.clone(), idea],
        };

        let readable = format_ideas_readable(&result);
        assert!(readable.starts_with("# Talk"));
        assert!(readable.contains("### 2. [00:00-00:45] Must-See Rust You Need To Try"));
        assert!(readable.contains("#shorts #rust"));
    }
}
