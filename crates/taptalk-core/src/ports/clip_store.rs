//! Clip store port — resolves a card name to its stored recording.
//!
//! # Design Rules
//!
//! - Lookup is a side-effect-free read; implementations must not mutate.
//! - Matching is exact on the trimmed, case-folded name — `"hello"` finds a
//!   clip stored under `"Hello"`.
//! - Names are not unique: when several clips share a name (a card was
//!   re-recorded), the most recently created clip wins.
//!
//! Callers in the playback path treat a store error like a miss: the word
//! is skipped, never surfaced to the user as a failure.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::AudioClip;

/// Errors returned by [`AudioClipStore`] operations.
#[derive(Debug, Error)]
pub enum ClipStoreError {
    /// The underlying storage could not be reached.
    #[error("Clip storage unavailable: {0}")]
    Unavailable(String),

    /// Unexpected internal error.
    #[error("Internal clip store error: {0}")]
    Internal(String),
}

/// Port trait for resolving card names to stored audio clips.
///
/// Implemented by `InMemoryClipStore` in `taptalk-voice`. The contract is
/// async so that a database- or network-backed store can implement it
/// without blocking; the queue controller awaits all resolutions before the
/// first clip plays.
#[async_trait]
pub trait AudioClipStore: Send + Sync {
    /// Resolve `name` to its authoritative clip, or `None` when no clip is
    /// stored under that name.
    async fn lookup(&self, name: &str) -> Result<Option<AudioClip>, ClipStoreError>;
}
