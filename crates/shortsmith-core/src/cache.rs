use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::error::Result;

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("shortsmith")
}

/// Get the cache directory for a given video id
///
/// Ids that are not plain `[A-Za-z0-9_-]` are hashed so they can never
/// escape the cache root.
pub fn get_cache_dir(root: &Path, video_id: &str) -> PathBuf {
    let safe = !video_id.is_empty()
        && video_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if safe {
        return root.join(video_id);
    }

    let mut hasher = DefaultHasher::new();
    video_id.hash(&mut hasher);
    root.join(hasher.finish().to_string())
}

/// Get the path for cached video metadata
pub fn get_metadata_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("metadata.json")
}

/// Get the path for a cached transcript file in the requested languages
pub fn get_transcript_path(cache_dir: &Path, sub_langs: &str) -> PathBuf {
    let lang: String = sub_langs
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    cache_dir.join(format!("transcript_{}.json", lang))
}

fn subtitle_lang(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let stem = name.strip_suffix(".json3")?;
    let (_, lang) = stem.rsplit_once('.')?;
    Some(lang.to_string())
}

fn lang_matches(requested: &str, lang: &str) -> bool {
    match requested.strip_suffix('*') {
        Some(prefix) => lang.starts_with(prefix.trim_end_matches('.')),
        None => requested == lang,
    }
}

/// Find a downloaded json3 subtitle file for one of `sub_langs`
///
/// `sub_langs` uses yt-dlp's comma separated syntax (`en,de`, `en.*`).
/// Earlier languages win; tracks in other languages are ignored.
pub fn find_subtitle_in_cache(cache_dir: &Path, sub_langs: &str) -> Option<PathBuf> {
    let Ok(entries) = std::fs::read_dir(cache_dir) else {
        return None;
    };

    let mut subtitles: Vec<(PathBuf, String)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter_map(|path| subtitle_lang(&path).map(|lang| (path, lang)))
        .collect();
    subtitles.sort();

    sub_langs
        .split(',')
        .map(str::trim)
        .filter(|requested| !requested.is_empty())
        .find_map(|requested| {
            subtitles
                .iter()
                .find(|(_, lang)| lang_matches(requested, lang))
                .map(|(path, _)| path.clone())
        })
}

pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json_content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json_content)?)
}

pub async fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(value)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimedFragment;

    #[test]
    fn unsafe_ids_are_hashed() {
        let root = Path::new("/cache");
        assert_eq!(get_cache_dir(root, "dQw4w9WgXcQ"), root.join("dQw4w9WgXcQ"));

        let hashed = get_cache_dir(root, "../../etc");
        assert_eq!(hashed.parent(), Some(root));
        assert_ne!(hashed, root.join("../../etc"));
    }

    #[test]
    fn subtitle_pick_follows_requested_language() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("subs.de.json3"), "{}").unwrap();
        std::fs::write(dir.path().join("subs.en.json3"), "{}").unwrap();
        std::fs::write(dir.path().join("subs.en-US.json3"), "{}").unwrap();
        std::fs::write(dir.path().join("metadata.json"), "{}").unwrap();

        let pick = |langs: &str| {
            find_subtitle_in_cache(dir.path(), langs)
                .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
        };
        assert_eq!(pick("de").as_deref(), Some("subs.de.json3"));
        assert_eq!(pick("en").as_deref(), Some("subs.en.json3"));
        assert_eq!(pick("fr,de").as_deref(), Some("subs.de.json3"));
        assert_eq!(pick("en-US").as_deref(), Some("subs.en-US.json3"));
        assert_eq!(pick("fr"), None);
    }

    #[test]
    fn wildcard_languages_match_by_prefix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("subs.en-GB.json3"), "{}").unwrap();
        std::fs::write(dir.path().join("subs.es.json3"), "{}").unwrap();

        let found = find_subtitle_in_cache(dir.path(), "en.*").unwrap();
        assert_eq!(found.file_name().unwrap(), "subs.en-GB.json3");
    }

    #[test]
    fn transcript_cache_is_keyed_by_language() {
        let cache_dir = Path::new("/cache/abc");
        assert_ne!(
            get_transcript_path(cache_dir, "en"),
            get_transcript_path(cache_dir, "de")
        );
        assert_eq!(
            get_transcript_path(cache_dir, "en.*,de"),
            cache_dir.join("transcript_en___de.json")
        );
    }

    #[tokio::test]
    async fn json_round_trips_through_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = get_transcript_path(&dir.path().join("abc"), "en");
        let fragments = vec![TimedFragment::new("hello", 1.0, 2.0)];

        save_json(&fragments, &path).await.unwrap();
        let loaded: Vec<TimedFragment> = load_json(&path).await.unwrap();
        assert_eq!(loaded, fragments);
    }
}
