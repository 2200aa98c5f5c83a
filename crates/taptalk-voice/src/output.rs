//! Audio output — plays one stored clip at a time via `rodio`.
//!
//! Clips arrive as encoded byte payloads (as recorded), so playback decodes
//! through `rodio::Decoder` rather than appending raw sample buffers.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use taptalk_core::ports::{PlaybackDoneCallback, PlaybackPortError};

/// Arms exactly one completion report for one started clip.
///
/// Every `play` allocates a fresh flag and hands a clone to that clip's
/// watcher thread. The watcher owns only its own clip's flag, so a stale
/// watcher left over from an earlier sink can neither fire a second report
/// nor disarm the report owed to the current clip.
#[derive(Clone)]
struct CompletionFlag(Arc<AtomicBool>);

impl CompletionFlag {
    fn armed() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Disarm without reporting (external stop).
    fn disarm(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Take the one completion report, if still armed.
    fn consume(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Playback handle for a single output device.
///
/// Holds at most one active sink. Starting a new clip stops the previous
/// one first, so two clips are never audible at once.
pub struct AudioOutput {
    /// rodio output stream (must be kept alive).
    _stream: OutputStream,

    /// Handle used to create sinks.
    stream_handle: OutputStreamHandle,

    /// Current playback sink (if any).
    sink: Option<Arc<Sink>>,

    /// Completion flag of the current sink. Replaced on every `play`;
    /// `stop()` disarms only this one, never a previous clip's.
    flag: Option<CompletionFlag>,
}

impl AudioOutput {
    /// Create a playback handle on the default output device.
    pub fn new() -> Result<Self, PlaybackPortError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| PlaybackPortError::OutputStream(e.to_string()))?;

        tracing::info!("Audio output initialized on default output device");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            flag: None,
        })
    }

    /// Decode and play `payload`. On natural completion (sink drains),
    /// `on_done` fires exactly once; it never fires after [`stop`].
    ///
    /// [`stop`]: AudioOutput::stop
    pub fn play(
        &mut self,
        payload: Vec<u8>,
        on_done: PlaybackDoneCallback,
    ) -> Result<(), PlaybackPortError> {
        // Stop any existing playback
        self.stop();

        let source = Decoder::new(Cursor::new(payload))
            .map_err(|e| PlaybackPortError::Decode(e.to_string()))?;
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| PlaybackPortError::OutputStream(e.to_string()))?;
        sink.append(source);

        let flag = CompletionFlag::armed();
        self.flag = Some(flag.clone());
        let sink = Arc::new(sink);
        self.sink = Some(Arc::clone(&sink));

        // `Sink` is Send in rodio 0.20+, so it can move into a blocking
        // thread. `sleep_until_end()` returns when the queue drains or when
        // `stop()` drops the internal sources.
        std::thread::spawn(move || {
            sink.sleep_until_end();

            // If stop() disarmed this clip's flag, the completion must not
            // be reported.
            if !flag.consume() {
                return;
            }

            tracing::debug!("Clip finished naturally");
            on_done();
        });

        tracing::debug!("Clip playback started");
        Ok(())
    }

    /// Stop any active playback immediately.
    pub fn stop(&mut self) {
        if let Some(flag) = self.flag.take() {
            flag.disarm();
        }
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_flag_consumes_exactly_once() {
        let flag = CompletionFlag::armed();
        assert!(flag.consume());
        assert!(!flag.consume(), "second consumption must not report");
    }

    #[test]
    fn disarmed_flag_never_reports() {
        let flag = CompletionFlag::armed();
        flag.disarm();
        assert!(!flag.consume());
    }

    /// A watcher that outlives its sink holds only its own clip's flag, so
    /// consuming it late must not disturb the flag armed for the next clip.
    #[test]
    fn stale_watcher_cannot_steal_next_clips_completion() {
        let first = CompletionFlag::armed();

        // A new clip starts: the output arms a fresh flag rather than
        // re-arming the shared one.
        let second = CompletionFlag::armed();

        // The first clip's watcher wakes late and takes its own report.
        assert!(first.consume());

        assert!(second.consume(), "the current clip still owns its report");
    }
}
