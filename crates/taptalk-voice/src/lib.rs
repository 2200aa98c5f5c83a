#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod audio_thread;
pub mod controller;
pub mod output;
pub mod service;
pub mod store;

// Re-export key types for convenience
pub use audio_thread::AudioThreadHandle;
pub use controller::{PlaybackEvent, PlaybackQueueController, QueueState};
pub use service::spawn_event_bridge;
pub use store::InMemoryClipStore;
