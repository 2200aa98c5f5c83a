//! Canonical event union for all cross-adapter events.
//!
//! This module is the single source of truth for events consumed by UI
//! listeners and backend emitters. The playback engine's internal channel
//! events are bridged into this union by `taptalk-voice`.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag for frontend compatibility:
//!
//! ```json
//! { "type": "speech_started", "clipCount": 3 }
//! ```

use serde::{Deserialize, Serialize};

/// Canonical event types for all adapters.
///
/// Each variant includes all necessary context for the event to be
/// self-describing, so visual playback indicators can be driven from the
/// event stream alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A playback session started voicing a non-empty queue.
    SpeechStarted {
        /// Number of resolved clips queued for this session.
        #[serde(rename = "clipCount")]
        clip_count: usize,
    },

    /// An individual clip within the session began playing.
    ///
    /// Lets the UI highlight the word currently being voiced.
    SpeechClipStarted {
        /// Zero-based position within the session's queue.
        index: usize,
        /// The word being voiced.
        text: String,
    },

    /// The session's final clip finished naturally.
    SpeechFinished,

    /// The session was cancelled before its final clip finished.
    SpeechCancelled,
}

impl AppEvent {
    /// Get the event name for wire protocols.
    ///
    /// This provides consistent event naming across transports.
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::SpeechStarted { .. } => "speech:started",
            Self::SpeechClipStarted { .. } => "speech:clip_started",
            Self::SpeechFinished => "speech:finished",
            Self::SpeechCancelled => "speech:cancelled",
        }
    }
}
