//! Sliding-window clip extraction and the relevance heuristic.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use crate::{
    text::{extract_keywords, sanitize_text, tokenize},
    types::{CandidateSegment, TimedFragment},
};

pub const WINDOW_MIN_SECONDS: f64 = 30.0;
pub const WINDOW_MAX_SECONDS: f64 = 60.0;
const GROWTH_SLACK_SECONDS: f64 = 10.0;
const IDEAL_CLIP_SECONDS: f64 = 45.0;

// 80% of the minimum window up to the maximum plus two seconds
const MIN_KEPT_SPAN: f64 = 24.0;
const MAX_KEPT_SPAN: f64 = 62.0;
const MAX_RANKED: usize = 6;
const SEGMENT_KEYWORDS: usize = 6;

const POWER_WORD_BONUS: f64 = 12.0;
const EXCITEMENT_BONUS: f64 = 3.0;
const EMPHASIS_BONUS: f64 = 4.0;

const POWER_WORDS: &[&str] = &[
    "secret",
    "ultimate",
    "powerful",
    "unbelievable",
    "surprising",
    "hack",
    "tip",
    "moment",
    "insane",
    "crazy",
    "wild",
    "perfect",
    "epic",
    "biggest",
    "smart",
    "hidden",
    "formula",
    "lesson",
    "boost",
    "master",
    "level",
    "viral",
];

static UPPERCASE_BURST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,}\b").expect("uppercase pattern"));

/// Heuristic short-form appeal of a piece of text spanning `duration` seconds.
pub fn score_text(text: &str, duration: f64) -> f64 {
    let normalized = sanitize_text(text).to_lowercase();

    let mut score = normalized.split_whitespace().count() as f64;
    score += (WINDOW_MAX_SECONDS - (duration - IDEAL_CLIP_SECONDS).abs()) * 0.8;

    let tokens: HashSet<String> = tokenize(&normalized).into_iter().collect();
    let power_hits = POWER_WORDS
        .iter()
        .filter(|word| tokens.contains(**word))
        .count();
    score += power_hits as f64 * POWER_WORD_BONUS;

    let excitement = text.chars().filter(|c| matches!(c, '!' | '?')).count();
    score += excitement as f64 * EXCITEMENT_BONUS;

    let bursts = UPPERCASE_BURST.find_iter(text).count();
    score += bursts as f64 * EMPHASIS_BONUS;

    score
}

fn segment_from_slice(slice: &[TimedFragment]) -> Option<CandidateSegment> {
    let (first, last) = (slice.first()?, slice.last()?);

    let joined = slice
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let text = sanitize_text(&joined);
    let start_seconds = first.offset_seconds;
    let end_seconds = last.end_seconds();

    Some(CandidateSegment {
        keywords: extract_keywords(&text, SEGMENT_KEYWORDS),
        score: score_text(&text, end_seconds - start_seconds),
        start_seconds,
        end_seconds,
        text,
    })
}

/// Every candidate window over `fragments`, unfiltered, in discovery order.
///
/// For each start fragment the end cursor is first pushed until the window
/// holds at least [`WINDOW_MIN_SECONDS`] of speech, then grown one fragment
/// at a time, emitting a candidate per end position, until the list runs
/// out or the next fragment would exceed the maximum plus slack.
pub fn build_segments(fragments: &[TimedFragment]) -> Vec<CandidateSegment> {
    let mut segments = Vec::new();
    let total = fragments.len();

    let mut end_index = 0;
    let mut duration_sum = 0.0;

    for start_index in 0..total {
        while end_index < total && duration_sum < WINDOW_MIN_SECONDS {
            duration_sum += fragments[end_index].duration_seconds;
            end_index += 1;
        }

        if duration_sum >= WINDOW_MIN_SECONDS && end_index > start_index {
            let mut candidate_end = end_index;
            let mut candidate_duration = duration_sum;

            loop {
                if let Some(segment) = segment_from_slice(&fragments[start_index..candidate_end]) {
                    segments.push(segment);
                }

                if candidate_end == total
                    || candidate_duration + fragments[candidate_end].duration_seconds
                        > WINDOW_MAX_SECONDS + GROWTH_SLACK_SECONDS
                {
                    break;
                }

                candidate_duration += fragments[candidate_end].duration_seconds;
                candidate_end += 1;
            }
        }

        duration_sum -= fragments[start_index].duration_seconds;
    }

    segments
}

/// Keep clip-sized candidates, best score first (stable), at most six.
pub fn rank_segments(mut candidates: Vec<CandidateSegment>) -> Vec<CandidateSegment> {
    candidates.retain(|segment| (MIN_KEPT_SPAN..=MAX_KEPT_SPAN).contains(&segment.duration()));
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(MAX_RANKED);
    candidates
}
