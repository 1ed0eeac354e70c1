//! Text helpers shared by the segment scorer and the idea synthesizer.
//!
//! Everything in here is a pure function over `&str`, safe to call from any
//! thread without coordination.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("bracket pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("space pattern"));
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence pattern"));
static CLAUSE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s+").expect("clause pattern"));
static NON_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("keyword pattern"));

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "that", "with", "have", "this", "from", "your", "about", "just", "into",
    "there", "their", "what", "when", "where", "which", "would", "could", "should", "really",
    "https", "video", "youtube", "shorts", "youre", "theyre", "cant", "wont", "its", "dont",
    "doesnt", "ive", "were", "was", "them", "because", "while", "will", "been", "than", "then",
    "only", "over", "other", "ever", "even", "make", "made", "some", "more", "most", "also",
    "like", "know", "want",
];

const CANONICAL_HASHTAGS: [&str; 3] = ["#shorts", "#youtubeshorts", "#viral"];
const FALLBACK_HASHTAGS: [&str; 4] = ["#contentcreator", "#videotips", "#creatorhub", "#algorithm"];
const MIN_HASHTAGS: usize = 5;
const MAX_HASHTAGS: usize = 7;

const EMOJI_SEQUENCE: [&str; 7] = ["⚡", "🔥", "🚀", "💡", "🎯", "✨", "🎬"];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Strip `[...]` annotations and collapse whitespace.
pub fn sanitize_text(raw: &str) -> String {
    let without_annotations = BRACKETED.replace_all(raw, "");
    WHITESPACE
        .replace_all(&without_annotations, " ")
        .trim()
        .to_string()
}

/// Split text into at most `limit` sentence-like units, topping up with
/// comma clauses when there are too few sentences.
pub fn extract_sentences(text: &str, limit: usize) -> Vec<String> {
    let cleaned = sanitize_text(text);

    let mut sentences = Vec::new();
    let mut last = 0;
    for boundary in SENTENCE_BREAK.find_iter(&cleaned) {
        // punctuation is a single ASCII byte at the start of the match
        sentences.push(cleaned[last..boundary.start() + 1].trim().to_string());
        last = boundary.end();
    }
    sentences.push(cleaned[last..].trim().to_string());
    sentences.retain(|sentence| !sentence.is_empty());

    if sentences.len() >= limit {
        sentences.truncate(limit);
        return sentences;
    }

    if sentences.is_empty() {
        return if cleaned.is_empty() {
            Vec::new()
        } else {
            vec![cleaned]
        };
    }

    let mut supplemental = Vec::new();
    for sentence in &sentences {
        if sentences.len() + supplemental.len() >= limit {
            break;
        }
        let clauses: Vec<&str> = CLAUSE_BREAK
            .split(sentence)
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .collect();
        // a comma-free sentence is never repeated as its own clause
        if clauses.len() < 2 {
            continue;
        }
        for clause in clauses {
            if sentences.len() + supplemental.len() < limit {
                supplemental.push(clause.to_string());
            }
        }
    }

    sentences.extend(supplemental);
    sentences.truncate(limit);
    sentences
}

/// Lower-cased tokens with everything outside `[a-z0-9]` treated as a separator.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_KEYWORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Most frequent non-stop-word tokens, ties broken by first occurrence.
pub fn extract_keywords(text: &str, max: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for word in tokenize(text) {
        if word.chars().count() <= 2 || is_stop_word(&word) {
            continue;
        }
        match positions.get(&word) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    // stable: equal counts keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(max).map(|(word, _)| word).collect()
}

pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical tags, then one tag per keyword, padded to at least five and
/// capped at seven. Duplicates collapse.
pub fn format_hashtags(keywords: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = CANONICAL_HASHTAGS.iter().map(|t| t.to_string()).collect();

    fn push_unique(tags: &mut Vec<String>, tag: String) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    for keyword in keywords {
        let cleaned: String = keyword
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if !cleaned.is_empty() {
            push_unique(&mut tags, format!("#{cleaned}"));
        }
    }

    for fallback in FALLBACK_HASHTAGS {
        if tags.len() >= MIN_HASHTAGS {
            break;
        }
        push_unique(&mut tags, fallback.to_string());
    }

    tags.truncate(MAX_HASHTAGS);
    tags
}

pub fn build_caption(sentences: &[String]) -> String {
    sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let emoji = EMOJI_SEQUENCE[index % EMOJI_SEQUENCE.len()];
            format!("{emoji} {sentence}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
