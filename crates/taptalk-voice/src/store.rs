//! In-memory clip store — the reference `AudioClipStore` adapter.
//!
//! Clips are indexed by normalized name (trimmed, lowercased) so lookups
//! are exact-match but case-insensitive. Several clips may share a name;
//! resolution picks the most recently created one, with insertion order
//! breaking exact timestamp ties. This replaces the fetch-everything-and-
//! filter scan the engine grew out of with a keyed index, preserving the
//! same match semantics.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use taptalk_core::domain::AudioClip;
use taptalk_core::ports::{AudioClipStore, ClipStoreError};

/// File extensions accepted by [`InMemoryClipStore::load_dir`].
const SUPPORTED_EXTENSIONS: &[&str] = &["wav"];

/// Normalize a card name for index keys.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Map of normalized card name → every clip recorded under that name.
///
/// Uses a std (non-async) lock: lookups never hold it across an `.await`
/// point.
#[derive(Debug, Default)]
pub struct InMemoryClipStore {
    clips: RwLock<HashMap<String, Vec<AudioClip>>>,
}

impl InMemoryClipStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new clip under `name`, timestamped now.
    ///
    /// Re-recording a card is just another insert — the newer clip becomes
    /// authoritative without removing the older one.
    pub fn insert(&self, name: &str, payload: Vec<u8>) -> AudioClip {
        let clip = AudioClip::new(name.trim(), payload, Utc::now());
        self.insert_clip(clip.clone());
        clip
    }

    /// Insert a pre-built clip record (e.g. restored from persistence).
    pub fn insert_clip(&self, clip: AudioClip) {
        let key = normalize(&clip.owner_name);
        tracing::debug!(name = %clip.owner_name, bytes = clip.payload.len(), "clip stored");
        self.clips.write().unwrap().entry(key).or_default().push(clip);
    }

    /// Number of distinct card names with at least one clip.
    pub fn len(&self) -> usize {
        self.clips.read().unwrap().len()
    }

    /// Whether the store holds no clips.
    pub fn is_empty(&self) -> bool {
        self.clips.read().unwrap().is_empty()
    }

    /// Sorted owner names of the authoritative clip per card.
    pub fn names(&self) -> Vec<String> {
        let guard = self.clips.read().unwrap();
        let mut names: Vec<String> = guard
            .values()
            .filter_map(|clips| newest(clips).map(|c| c.owner_name.clone()))
            .collect();
        drop(guard);
        names.sort();
        names
    }

    /// Ingest a directory of recordings: every supported audio file becomes
    /// a clip whose card name is the file stem.
    ///
    /// Returns the number of files loaded. Unsupported files are skipped
    /// silently; unreadable supported files propagate the I/O error.
    pub fn load_dir(&self, dir: &Path) -> std::io::Result<usize> {
        let mut loaded = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || !is_supported(&path) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let payload = std::fs::read(&path)?;
            self.insert(name, payload);
            loaded += 1;
        }
        tracing::info!(dir = %dir.display(), loaded, "clip directory loaded");
        Ok(loaded)
    }
}

/// Whether a path carries a supported audio extension.
fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// The authoritative clip among `clips`: newest `created_at`, with later
/// insertion winning exact ties.
fn newest(clips: &[AudioClip]) -> Option<&AudioClip> {
    clips
        .iter()
        .enumerate()
        .max_by_key(|(i, c)| (c.created_at, *i))
        .map(|(_, c)| c)
}

#[async_trait]
impl AudioClipStore for InMemoryClipStore {
    async fn lookup(&self, name: &str) -> Result<Option<AudioClip>, ClipStoreError> {
        let guard = self.clips.read().unwrap();
        let found = guard.get(&normalize(name)).and_then(|clips| newest(clips)).cloned();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::io::Write;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        let store = InMemoryClipStore::new();
        store.insert("Hello", vec![1]);

        let found = block_on(store.lookup("  hello  ")).unwrap();
        assert_eq!(found.unwrap().payload, vec![1]);
    }

    #[test]
    fn lookup_misses_return_none() {
        let store = InMemoryClipStore::new();
        store.insert("water", vec![1]);

        assert!(block_on(store.lookup("juice")).unwrap().is_none());
        assert!(block_on(store.lookup("wat")).unwrap().is_none(), "no partial matching");
    }

    #[test]
    fn most_recent_clip_wins() {
        let store = InMemoryClipStore::new();
        let earlier = Utc::now() - Duration::seconds(60);
        store.insert_clip(AudioClip::new("more", vec![1], Utc::now()));
        store.insert_clip(AudioClip::new("more", vec![2], earlier));

        let found = block_on(store.lookup("more")).unwrap().unwrap();
        assert_eq!(found.payload, vec![1], "newer created_at is authoritative");
    }

    #[test]
    fn exact_timestamp_ties_prefer_later_insertion() {
        let store = InMemoryClipStore::new();
        let at = Utc::now();
        store.insert_clip(AudioClip::new("more", vec![1], at));
        store.insert_clip(AudioClip::new("more", vec![2], at));

        let found = block_on(store.lookup("more")).unwrap().unwrap();
        assert_eq!(found.payload, vec![2]);
    }

    #[test]
    fn re_recording_replaces_authoritative_clip() {
        let store = InMemoryClipStore::new();
        store.insert_clip(AudioClip::new("go", vec![1], Utc::now() - Duration::seconds(5)));
        store.insert("go", vec![9]);

        let found = block_on(store.lookup("GO")).unwrap().unwrap();
        assert_eq!(found.payload, vec![9]);
        assert_eq!(store.len(), 1, "same card name, one index entry");
    }

    #[test]
    fn load_dir_ingests_only_supported_files() {
        let dir = tempfile::tempdir().unwrap();
        for (file, bytes) in [("hello.wav", &b"RIFF"[..]), ("world.WAV", b"RIFF")] {
            let mut f = std::fs::File::create(dir.path().join(file)).unwrap();
            f.write_all(bytes).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

        let store = InMemoryClipStore::new();
        let loaded = store.load_dir(dir.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(store.names(), vec!["hello", "world"]);
        assert!(block_on(store.lookup("Hello")).unwrap().is_some());
        assert!(block_on(store.lookup("notes")).unwrap().is_none());
    }
}
