//! Event bridge — forwards controller events onto an `AppEventEmitter`.
//!
//! This module is the single place where `taptalk-voice` channel events are
//! converted to the transport-agnostic [`AppEvent`] union defined in
//! `taptalk-core`. Nothing outside this file should need to match on
//! [`PlaybackEvent`] to drive a UI transport.

use std::sync::Arc;

use tokio::sync::mpsc;

use taptalk_core::events::AppEvent;
use taptalk_core::ports::AppEventEmitter;

use crate::controller::PlaybackEvent;

/// Bridge `PlaybackEvent` → `AppEvent`, forwarding each event to `emitter`.
///
/// The spawned task self-terminates when the controller's sender is dropped
/// (i.e. when the [`PlaybackQueueController`](crate::controller::PlaybackQueueController)
/// actor shuts down): `recv()` returns `None` and the `while let` loop exits.
pub fn spawn_event_bridge(
    mut event_rx: mpsc::UnboundedReceiver<PlaybackEvent>,
    emitter: Arc<dyn AppEventEmitter>,
) {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                PlaybackEvent::Started { clip_count } => {
                    emitter.emit(AppEvent::SpeechStarted { clip_count });
                }
                PlaybackEvent::ClipStarted { index, text } => {
                    emitter.emit(AppEvent::SpeechClipStarted { index, text });
                }
                PlaybackEvent::Finished => {
                    emitter.emit(AppEvent::SpeechFinished);
                }
                PlaybackEvent::Cancelled => {
                    emitter.emit(AppEvent::SpeechCancelled);
                }
            }
        }
        // event_rx returned None: controller sender dropped — task exits.
    });
}
