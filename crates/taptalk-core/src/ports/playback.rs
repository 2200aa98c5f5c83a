//! Playback port — plays a single audio payload to completion.

use thiserror::Error;

/// Callback invoked when a clip finishes playing naturally.
///
/// Fires exactly once per successfully started playback, and never after
/// [`AudioPlaybackPort::stop`] has halted the clip.
pub type PlaybackDoneCallback = Box<dyn FnOnce() + Send + 'static>;

/// Errors returned when playback of a clip cannot begin.
#[derive(Debug, Error)]
pub enum PlaybackPortError {
    /// The audio output device/stream could not be opened.
    #[error("Failed to open audio output stream: {0}")]
    OutputStream(String),

    /// The clip payload could not be decoded as audio.
    #[error("Failed to decode audio clip: {0}")]
    Decode(String),

    /// The audio backend thread is no longer running.
    #[error("Audio backend is no longer running")]
    BackendGone,
}

/// Port trait for voicing one clip at a time.
///
/// Implemented by `AudioThreadHandle` in `taptalk-voice`. The queue
/// controller guarantees at most one clip is audible at any instant by
/// stopping the port before starting the next session.
pub trait AudioPlaybackPort: Send + Sync {
    /// Begin playback of `payload`. On natural completion `on_complete` is
    /// invoked exactly once; if playback fails to start, the callback is
    /// dropped without being invoked and an error is returned.
    fn play(
        &self,
        payload: Vec<u8>,
        on_complete: PlaybackDoneCallback,
    ) -> Result<(), PlaybackPortError>;

    /// Halt any active playback immediately. Safe to call when nothing is
    /// playing; the pending completion callback (if any) will never fire.
    fn stop(&self);
}
