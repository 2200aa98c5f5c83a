//! Playback queue controller — voices a token snapshot as a cancellable clip queue.
//!
//! The controller drives one playback session at a time:
//!
//! ```text
//!   Idle → (resolve all tokens) → Playing(0) → Playing(1) → … → Idle
//!                    │                   │
//!                    │ nothing resolved  │ cancel / superseding start
//!                    ▼                   ▼
//!                  Idle                Idle
//! ```
//!
//! All public operations and the port's completion notifications are
//! serialized through a single actor task, so two sessions can never be
//! active at once. Each session carries a generation number; a completion
//! that arrives tagged with an older generation (a clip stopped by `cancel`
//! or superseded by a newer `start`) is ignored rather than advancing the
//! queue.
//!
//! Failure handling is skip-and-continue throughout: words without a clip
//! are dropped during resolution, and a clip that fails to start counts as
//! an immediate completion. The controller always returns to `Idle`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use taptalk_core::domain::{PlaybackQueueEntry, Token};
use taptalk_core::ports::{AudioClipStore, AudioPlaybackPort, PlaybackDoneCallback};

// ── Queue state machine ────────────────────────────────────────────

/// Externally visible state of the playback queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QueueState {
    /// No session active.
    #[default]
    Idle,

    /// A session is voicing its queue.
    Playing,
}

// ── Events emitted by the controller ───────────────────────────────

/// Events emitted by the playback queue to the UI / application layer.
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// A session started voicing a non-empty queue.
    Started {
        /// Number of resolved clips in the session.
        clip_count: usize,
    },

    /// An individual clip began playing.
    ClipStarted {
        /// Zero-based position within the session's queue.
        index: usize,
        /// The word being voiced.
        text: String,
    },

    /// The final clip finished naturally.
    Finished,

    /// The session was cancelled (explicitly or by a superseding start).
    Cancelled,
}

// ── Commands ───────────────────────────────────────────────────────

/// A command sent from the public handle to the actor task.
enum QueueCommand {
    /// Begin a new session from a sentence snapshot.
    Start { tokens: Vec<Token> },

    /// Cancel the active session, if any.
    Cancel,
}

// ── Public handle ──────────────────────────────────────────────────

/// Handle to the playback queue actor.
///
/// `start` and `cancel` are fire-and-forget sends into the actor's mailbox;
/// the mailbox ordering is what serializes them against in-flight completion
/// processing. Dropping the handle shuts the actor down and stops any
/// active playback.
pub struct PlaybackQueueController {
    cmd_tx: mpsc::UnboundedSender<QueueCommand>,
    state_rx: watch::Receiver<QueueState>,
}

impl PlaybackQueueController {
    /// Spawn the queue actor and return the handle plus its event stream.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(
        store: Arc<dyn AudioClipStore>,
        port: Arc<dyn AudioPlaybackPort>,
    ) -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(QueueState::Idle);

        let actor = QueueActor {
            store,
            port,
            event_tx,
            state_tx,
            done_tx,
            generation: 0,
            queue: Vec::new(),
            current: 0,
            state: QueueState::Idle,
        };
        tokio::spawn(actor.run(cmd_rx, done_rx));

        (Self { cmd_tx, state_rx }, event_rx)
    }

    /// Start a new playback session from a sentence snapshot.
    ///
    /// Any active session is cancelled before the new one begins. Tokens
    /// that resolve to no clip are skipped; if nothing resolves, the queue
    /// stays idle and no event is emitted.
    pub fn start(&self, tokens: Vec<Token>) {
        let _ = self.cmd_tx.send(QueueCommand::Start { tokens });
    }

    /// Cancel the active session. Idempotent when idle.
    pub fn cancel(&self) {
        let _ = self.cmd_tx.send(QueueCommand::Cancel);
    }

    /// Current queue state.
    #[must_use]
    pub fn state(&self) -> QueueState {
        *self.state_rx.borrow()
    }
}

// ── Actor ──────────────────────────────────────────────────────────

/// State owned by the queue actor task.
struct QueueActor {
    store: Arc<dyn AudioClipStore>,
    port: Arc<dyn AudioPlaybackPort>,
    event_tx: mpsc::UnboundedSender<PlaybackEvent>,
    state_tx: watch::Sender<QueueState>,
    /// Cloned into each clip's completion callback, tagged with the
    /// session generation at play time.
    done_tx: mpsc::UnboundedSender<u64>,
    /// Monotonically increasing session counter. Bumped by every `start`
    /// and `cancel`, so completions from superseded sessions never match.
    generation: u64,
    /// Resolved entries for the active session, in token order.
    queue: Vec<PlaybackQueueEntry>,
    /// Index of the entry currently playing.
    current: usize,
    state: QueueState,
}

impl QueueActor {
    /// Actor loop: reacts to exactly one command or completion at a time.
    ///
    /// Exits when the controller handle is dropped (`cmd_rx` closes); any
    /// active playback is stopped on the way out. The `done_rx` arm can
    /// never yield `None` while the loop runs — the actor itself holds a
    /// sender — so the loop's only exit is the command channel closing.
    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<QueueCommand>,
        mut done_rx: mpsc::UnboundedReceiver<u64>,
    ) {
        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(QueueCommand::Start { tokens }) => self.handle_start(tokens).await,
                    Some(QueueCommand::Cancel) => self.handle_cancel(),
                    None => break,
                },
                Some(generation) = done_rx.recv() => self.handle_clip_done(generation),
            }
        }

        // Handle dropped mid-session: release the output device.
        self.port.stop();
        tracing::debug!("playback queue actor shut down");
    }

    /// Begin a new session: supersede any active one, resolve every token
    /// in order, then play the first resolved clip.
    ///
    /// Resolution completes before the first clip starts (resolve-then-play),
    /// keeping the queue-building phase atomic with respect to the snapshot.
    async fn handle_start(&mut self, tokens: Vec<Token>) {
        if self.state == QueueState::Playing {
            tracing::info!("new session supersedes active playback");
            self.halt_session();
        }

        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            tokens = tokens.len(),
            "resolving playback queue"
        );

        let queue = self.resolve(tokens).await;
        if queue.is_empty() {
            tracing::debug!(generation = self.generation, "no words resolved — staying idle");
            return;
        }

        let clip_count = queue.len();
        self.queue = queue;
        self.set_state(QueueState::Playing);
        self.emit(PlaybackEvent::Started { clip_count });
        self.play_from(0);
    }

    /// Cancel the active session; no-op when idle.
    fn handle_cancel(&mut self) {
        if self.state == QueueState::Idle {
            tracing::debug!("cancel with no active session — no-op");
            return;
        }
        self.halt_session();
    }

    /// Natural-completion notification for the clip played under `generation`.
    fn handle_clip_done(&mut self, generation: u64) {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "stale completion — ignored"
            );
            return;
        }
        if self.state != QueueState::Playing {
            return;
        }
        self.play_from(self.current + 1);
    }

    /// Resolve each token in order via the clip store. Words with no clip
    /// (or whose lookup errors) are dropped from the queue entirely.
    async fn resolve(&self, tokens: Vec<Token>) -> Vec<PlaybackQueueEntry> {
        let mut queue = Vec::with_capacity(tokens.len());
        for token in tokens {
            let trimmed = token.text.trim();
            if trimmed.is_empty() {
                continue;
            }
            match self.store.lookup(trimmed).await {
                Ok(Some(clip)) => queue.push(PlaybackQueueEntry::new(token, clip)),
                Ok(None) => {
                    tracing::debug!(word = %token.text, "no clip for word — skipped");
                }
                Err(e) => {
                    tracing::warn!(word = %token.text, error = %e, "clip lookup failed — word skipped");
                }
            }
        }
        queue
    }

    /// Play the first startable entry at or after `start_index`.
    ///
    /// A clip that fails to start is logged and treated as an immediate
    /// completion — the walk advances and never retries it. When the walk
    /// runs off the end of the queue the session finishes.
    fn play_from(&mut self, start_index: usize) {
        let mut index = start_index;
        while index < self.queue.len() {
            let entry = &self.queue[index];
            let payload = entry.clip.payload.clone();
            let text = entry.source_token.text.clone();
            let generation = self.generation;
            let done_tx = self.done_tx.clone();
            let on_complete: PlaybackDoneCallback = Box::new(move || {
                let _ = done_tx.send(generation);
            });

            match self.port.play(payload, on_complete) {
                Ok(()) => {
                    self.current = index;
                    tracing::debug!(index, word = %text, "clip playing");
                    self.emit(PlaybackEvent::ClipStarted { index, text });
                    return;
                }
                Err(e) => {
                    tracing::warn!(index, word = %text, error = %e, "clip failed to start — skipping");
                    index += 1;
                }
            }
        }
        self.finish();
    }

    /// Natural end of the session.
    fn finish(&mut self) {
        tracing::debug!(generation = self.generation, "queue drained");
        self.queue.clear();
        self.set_state(QueueState::Idle);
        self.emit(PlaybackEvent::Finished);
    }

    /// Tear down the active session: invalidate pending completions, stop
    /// the port, discard the queue, and announce the cancellation.
    fn halt_session(&mut self) {
        self.generation += 1;
        self.port.stop();
        self.queue.clear();
        self.set_state(QueueState::Idle);
        self.emit(PlaybackEvent::Cancelled);
    }

    fn set_state(&mut self, state: QueueState) {
        if self.state != state {
            tracing::debug!(?state, "queue state changed");
            self.state = state;
            let _ = self.state_tx.send(state);
        }
    }

    fn emit(&self, event: PlaybackEvent) {
        // Receiver may have been dropped (e.g. headless tests) — not an error.
        let _ = self.event_tx.send(event);
    }
}
