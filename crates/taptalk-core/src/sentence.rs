//! `SentenceBuilder` — the ordered token list for the utterance under construction.
//!
//! The builder owns every [`Token`] it creates. All operations are total:
//! removing an unknown ID is a no-op, and an empty builder joins to an empty
//! string. Playback never reads the live list — it consumes a [`snapshot`]
//! taken when the session starts, so mid-playback edits cannot disturb a
//! running queue.
//!
//! [`snapshot`]: SentenceBuilder::snapshot

use crate::domain::{Token, TokenId};

/// Ordered collection of selected word tokens.
///
/// Insertion order is the sentence word order. Duplicate texts are allowed
/// and keep distinct identities.
#[derive(Debug, Clone, Default)]
pub struct SentenceBuilder {
    tokens: Vec<Token>,
}

impl SentenceBuilder {
    /// Create an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Append a word at the tail, returning the created token.
    ///
    /// Always succeeds; no deduplication is applied.
    pub fn append(&mut self, text: impl Into<String>) -> Token {
        let token = Token::new(text);
        tracing::debug!(token_id = %token.id, text = %token.text, "token appended");
        self.tokens.push(token.clone());
        token
    }

    /// Remove the token with the given identity, if present.
    pub fn remove(&mut self, token_id: TokenId) {
        let before = self.tokens.len();
        self.tokens.retain(|t| t.id != token_id);
        if self.tokens.len() == before {
            tracing::debug!(%token_id, "remove: token not present — no-op");
        }
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Number of tokens currently selected.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens are selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Join token texts in order with single spaces.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The sentence as presented to the user: first letter uppercased, with
    /// a terminal `.` appended unless the text already ends in `.`, `!` or `?`.
    #[must_use]
    pub fn display_sentence(&self) -> String {
        let raw = self.current_text();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let mut chars = trimmed.chars();
        let capped: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => return String::new(),
        };

        if capped.ends_with(['.', '!', '?']) {
            capped
        } else {
            capped + "."
        }
    }

    /// Immutable copy of the current token order.
    ///
    /// The copy is safe against future mutation: a playback session built
    /// from it is never retroactively affected by `append`/`remove`/`clear`.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Token> {
        self.tokens.clone()
    }
}
