//! Port traits implemented by adapter crates.
//!
//! The engine core never touches persistence or audio hardware directly —
//! it drives these traits. `taptalk-voice` provides the in-memory clip
//! store and the rodio-backed playback adapter.

mod clip_store;
mod event_emitter;
mod playback;

pub use clip_store::{AudioClipStore, ClipStoreError};
pub use event_emitter::{AppEventEmitter, NoopEmitter};
pub use playback::{AudioPlaybackPort, PlaybackDoneCallback, PlaybackPortError};
