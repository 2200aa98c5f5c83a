//! Domain types for sentence assembly and clip playback.
//!
//! A [`Token`] is one word/card selected into the in-progress sentence. Its
//! identity is independent of its text: picking the same card twice yields
//! two tokens with distinct IDs, and each occurrence is voiced separately.
//!
//! An [`AudioClip`] is a stored recording owned by a card name. Names are
//! not unique — re-recording a card adds a newer clip — so the most recently
//! created clip for a name is the authoritative one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a [`Token`], unique per insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(Uuid);

impl TokenId {
    /// Generate a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One word/card selected into the in-progress sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Identity unique to this insertion (duplicate texts get distinct IDs).
    pub id: TokenId,
    /// The word as displayed on the card.
    pub text: String,
}

impl Token {
    /// Create a token with a fresh identity.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TokenId::new(),
            text: text.into(),
        }
    }
}

/// A stored audio recording associated with a card/word name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Name of the card that owns this recording.
    #[serde(rename = "ownerName")]
    pub owner_name: String,
    /// Encoded audio bytes as recorded.
    pub payload: Vec<u8>,
    /// When the recording was created. Newest wins when names collide.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl AudioClip {
    /// Create a clip record.
    pub fn new(owner_name: impl Into<String>, payload: Vec<u8>, created_at: DateTime<Utc>) -> Self {
        Self {
            owner_name: owner_name.into(),
            payload,
            created_at,
        }
    }
}

/// A token paired with the clip that voices it, for one playback session.
///
/// Built transiently when a session starts; never persisted. Tokens that
/// resolve to no clip produce no entry at all, so every entry is playable.
/// The session is derived from a single
/// [`SentenceBuilder`](crate::sentence::SentenceBuilder) snapshot, so later
/// sentence mutations cannot affect entries in flight.
#[derive(Debug, Clone)]
pub struct PlaybackQueueEntry {
    /// The token this entry voices.
    pub source_token: Token,
    /// The authoritative clip for the token's text.
    pub clip: AudioClip,
}

impl PlaybackQueueEntry {
    /// Pair a token with its resolved clip.
    #[must_use]
    pub const fn new(source_token: Token, clip: AudioClip) -> Self {
        Self { source_token, clip }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_texts_get_distinct_identities() {
        let a = Token::new("more");
        let b = Token::new("more");
        assert_eq!(a.text, b.text);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn queue_entry_pairs_token_with_clip() {
        let token = Token::new("juice");
        let clip = AudioClip::new("Juice", vec![1, 2, 3], Utc::now());

        let entry = PlaybackQueueEntry::new(token.clone(), clip);
        assert_eq!(entry.source_token.id, token.id);
        assert_eq!(entry.clip.owner_name, "Juice");
    }
}
