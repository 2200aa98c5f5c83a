#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod sentence;

// Re-export commonly used types for convenience
pub use domain::{AudioClip, PlaybackQueueEntry, Token, TokenId};
pub use events::AppEvent;
pub use ports::{
    AppEventEmitter, AudioClipStore, AudioPlaybackPort, ClipStoreError, NoopEmitter,
    PlaybackDoneCallback, PlaybackPortError,
};
pub use sentence::SentenceBuilder;
