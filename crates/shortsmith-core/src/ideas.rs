//! Turning scored segments into presentable clip ideas.

use crate::{
    format::format_clip_time,
    text::{
        build_caption, extract_keywords, extract_sentences, format_hashtags, sanitize_text,
        title_case,
    },
    types::{CandidateSegment, GenerationContext, Idea},
};

const HOOK_SUFFIXES: [&str; 7] = [
    "you need to try",
    "that changes everything",
    "to remember today",
    "to post right now",
    "to skyrocket engagement",
    "you can't miss",
    "that blew my mind",
];

const FALLBACK_TIMESTAMPS: [(&str, &str); 3] =
    [("00:00", "00:45"), ("00:45", "01:30"), ("01:30", "02:15")];

const INSANE_SCORE: f64 = 90.0;
const TITLE_KEYWORDS: usize = 4;
const FALLBACK_SENTENCES: usize = 6;
const FALLBACK_KEYWORDS: usize = 5;
const CAPTION_LINES: usize = 3;

fn hook_suffix(score: f64) -> &'static str {
    let index = (score.floor() as i64).rem_euclid(HOOK_SUFFIXES.len() as i64);
    HOOK_SUFFIXES[index as usize]
}

pub fn build_title(segment: &CandidateSegment, context: &GenerationContext) -> String {
    let extracted;
    let keywords = if segment.keywords.is_empty() {
        extracted = extract_keywords(&segment.text, TITLE_KEYWORDS);
        &extracted
    } else {
        &segment.keywords
    };

    let prime_keyword = keywords
        .first()
        .map(String::as_str)
        .or_else(|| context.video_title.split_whitespace().next())
        .unwrap_or("Clip");

    let lead_word = if segment.score > INSANE_SCORE {
        "Insane"
    } else {
        "Must-See"
    };
    let base = title_case(&format!("{} {}", prime_keyword, hook_suffix(segment.score)));

    format!("{lead_word} {base}")
}

pub fn build_description(segment: &CandidateSegment, context: &GenerationContext) -> String {
    let sentences = extract_sentences(&segment.text, 2);
    if sentences.len() >= 2 {
        return sentences[..2].join(" ");
    }

    let topic = segment
        .keywords
        .first()
        .unwrap_or(&context.video_title);
    format!("Highlighting {} from {}.", topic, context.video_title)
}

pub fn segment_to_idea(segment: &CandidateSegment, context: &GenerationContext) -> Idea {
    let sentences = extract_sentences(&segment.text, CAPTION_LINES);

    Idea {
        clip_time: format_clip_time(segment.start_seconds, segment.end_seconds),
        title: build_title(segment, context),
        description: build_description(segment, context),
        hashtags: format_hashtags(&segment.keywords),
        captions: build_caption(&sentences),
    }
}

/// Three placeholder-timed ideas built straight from free text (the video
/// description, or the transcript text when no window survived ranking).
/// A blank `source` yields no ideas.
pub fn build_fallback_ideas(context: &GenerationContext, source: &str) -> Vec<Idea> {
    if sanitize_text(source).is_empty() {
        return Vec::new();
    }

    let sentences = extract_sentences(source, FALLBACK_SENTENCES);

    FALLBACK_TIMESTAMPS
        .iter()
        .enumerate()
        .map(|(i, (start, end))| {
            let chunk = sentences
                .iter()
                .skip(i * 2)
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            let text = if chunk.is_empty() {
                source.to_string()
            } else {
                chunk
            };

            let segment = CandidateSegment {
                start_seconds: 0.0,
                end_seconds: 45.0,
                keywords: extract_keywords(&text, FALLBACK_KEYWORDS),
                score: 60.0 + 5.0 * i as f64,
                text,
            };

            Idea {
                clip_time: format!("{start}-{end}"),
                ..segment_to_idea(&segment, context)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(title: &str) -> GenerationContext {
        GenerationContext {
            video_id: "dQw4w9WgXcQ".into(),
            video_title: title.into(),
            channel_name: Some("Creator".into()),
        }
    }

    fn segment(text: &str, keywords: &[&str], score: f64) -> CandidateSegment {
        CandidateSegment {
            start_seconds: 75.0,
            end_seconds: 121.4,
            text: text.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            score,
        }
    }

    #[test]
    fn high_scores_get_insane_lead() {
        let title = build_title(&segment("", &["secret"], 95.5), &context("Talk"));
        assert_eq!(title, "Insane Secret To Skyrocket Engagement");

        let title = build_title(&segment("", &["secret"], 70.0), &context("Talk"));
        assert_eq!(title, "Must-See Secret You Need To Try");
    }

    #[test]
    fn title_falls_back_to_video_title_then_clip() {
        let title = build_title(&segment("", &[], 65.0), &context("rustconf keynote"));
        assert_eq!(title, "Must-See Rustconf To Remember Today");

        let title = build_title(&segment("", &[], 65.0), &context(""));
        assert_eq!(title, "Must-See Clip To Remember Today");
    }

    #[test]
    fn description_prefers_two_sentences() {
        let seg = segment("One thing. Two things! Three.", &["things"], 50.0);
        assert_eq!(build_description(&seg, &context("Talk")), "One thing. Two things!");

        let seg = segment("just one run-on thought", &["thought"], 50.0);
        assert_eq!(
            build_description(&seg, &context("Talk")),
            "Highlighting thought from Talk."
        );

        let seg = segment("", &[], 50.0);
        assert_eq!(
            build_description(&seg, &context("Talk")),
            "Highlighting Talk from Talk."
        );
    }

    #[test]
    fn idea_uses_segment_clip_time() {
        let seg = segment("Hello there. General idea, second clause.", &["hello"], 40.0);
        let idea = segment_to_idea(&seg, &context("Talk"));
        assert_eq!(idea.clip_time, "01:15-02:01");
        assert_eq!(idea.captions.lines().count(), 3);
        assert!(idea.hashtags.contains(&"#hello".to_string()));
    }

    #[test]
    fn fallback_builds_three_placeholder_ideas() {
        let description = "Rust ownership explained. Borrowing without tears. \
                           Lifetimes made simple. Traits in depth.";
        let ideas = build_fallback_ideas(&context("Rust Talk"), description);

        let times: Vec<&str> = ideas.iter().map(|i| i.clip_time.as_str()).collect();
        assert_eq!(times, vec!["00:00-00:45", "00:45-01:30", "01:30-02:15"]);
        assert_eq!(ideas[0].description, "Rust ownership explained. Borrowing without tears.");
        assert_eq!(ideas[1].description, "Lifetimes made simple. Traits in depth.");
        // third chunk is empty, so the whole description is reused
        assert_eq!(ideas[2].description, "Rust ownership explained. Borrowing without tears.");
        assert!(ideas.iter().all(|i| i.title.starts_with("Must-See")));
    }

    #[test]
    fn blank_source_yields_nothing_even_with_a_title() {
        assert!(build_fallback_ideas(&context("Epic mountain biking"), "  ").is_empty());
        assert!(build_fallback_ideas(&context("YouTube Video"), "[Music]").is_empty());
        assert!(build_fallback_ideas(&context(""), "").is_empty());
    }

    #[test]
    fn fallback_titles_still_use_the_video_title_without_keywords() {
        let ideas = build_fallback_ideas(&context("Epic mountain biking"), "Go. Do it!");
        assert_eq!(ideas.len(), 3);
        assert!(ideas[0].title.starts_with("Must-See Epic"));
    }
}
