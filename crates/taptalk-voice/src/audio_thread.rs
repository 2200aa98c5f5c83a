//! Dedicated audio thread — isolates `!Send` audio resources from the async runtime.
//!
//! `rodio::OutputStream` is `!Send` on some platforms. Rather than using
//! `unsafe impl Send/Sync`, we confine it to a single OS thread and
//! communicate via channels.
//!
//! The public [`AudioThreadHandle`] is the `Send + Sync` proxy the queue
//! controller holds; it implements [`AudioPlaybackPort`] by routing every
//! call through an [`AudioCommand`] sent to the actor thread.

use std::sync::mpsc;
use std::thread;

use taptalk_core::ports::{AudioPlaybackPort, PlaybackDoneCallback, PlaybackPortError};

use crate::output::AudioOutput;

// ── Commands ───────────────────────────────────────────────────────

/// A command sent from the handle to the audio thread.
enum AudioCommand {
    /// Decode and play one clip payload.
    Play {
        payload: Vec<u8>,
        on_done: PlaybackDoneCallback,
        reply: mpsc::Sender<Result<(), PlaybackPortError>>,
    },

    /// Stop any active playback immediately (fire-and-forget).
    Stop,

    /// Shut down the audio thread, releasing the output device.
    Shutdown,
}

// ── Handle (Send + Sync proxy) ─────────────────────────────────────

/// `Send + Sync` handle to the dedicated audio thread.
///
/// All methods take `&self` — the underlying `mpsc::Sender` supports shared
/// access. `play` blocks until the audio thread reports whether the clip
/// started; this latency is microseconds of local channel I/O plus the
/// decode.
pub struct AudioThreadHandle {
    cmd_tx: mpsc::Sender<AudioCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AudioThreadHandle {
    /// Spawn the audio thread, open the default output device, and return
    /// the handle.
    ///
    /// Device-open errors are propagated back via a one-shot init channel.
    pub fn spawn() -> Result<Self, PlaybackPortError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), PlaybackPortError>>();

        let thread = thread::Builder::new()
            .name("taptalk-audio".into())
            .spawn(move || {
                Self::run(cmd_rx, &init_tx);
            })
            .map_err(|e| {
                PlaybackPortError::OutputStream(format!("failed to spawn audio thread: {e}"))
            })?;

        // Wait for the audio thread to finish initialisation.
        init_rx.recv().map_err(|_| PlaybackPortError::BackendGone)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    // ── Audio thread event loop ────────────────────────────────────

    /// The body of the dedicated audio thread. Owns the [`AudioOutput`] for
    /// its entire lifetime — it never crosses a thread boundary.
    fn run(cmd_rx: mpsc::Receiver<AudioCommand>, init_tx: &mpsc::Sender<Result<(), PlaybackPortError>>) {
        let mut output = match AudioOutput::new() {
            Ok(o) => o,
            Err(e) => {
                let _ = init_tx.send(Err(e));
                return;
            }
        };

        // Signal successful init.
        if init_tx.send(Ok(())).is_err() {
            // Caller dropped — nothing to do.
            return;
        }

        // ── Command loop (tight: recv → execute → reply → recv) ────
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                AudioCommand::Play {
                    payload,
                    on_done,
                    reply,
                } => {
                    let _ = reply.send(output.play(payload, on_done));
                }

                AudioCommand::Stop => {
                    output.stop();
                }

                AudioCommand::Shutdown => break,
            }
        }

        // `output` is dropped here, on the audio thread.
        tracing::debug!("Audio thread shutting down");
    }
}

impl AudioPlaybackPort for AudioThreadHandle {
    fn play(
        &self,
        payload: Vec<u8>,
        on_complete: PlaybackDoneCallback,
    ) -> Result<(), PlaybackPortError> {
        let (reply, rx) = mpsc::channel();
        self.cmd_tx
            .send(AudioCommand::Play {
                payload,
                on_done: on_complete,
                reply,
            })
            .map_err(|_| PlaybackPortError::BackendGone)?;
        rx.recv().map_err(|_| PlaybackPortError::BackendGone)?
    }

    fn stop(&self) {
        let _ = self.cmd_tx.send(AudioCommand::Stop);
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        // Best-effort shutdown — the thread may already be dead.
        let _ = self.cmd_tx.send(AudioCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
