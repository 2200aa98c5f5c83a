//! Event emitter trait for cross-crate event broadcasting.
//!
//! Implementations handle transport details (channels, GUI bridges, SSE).
//! The playback engine emits through this trait so that channel types never
//! become part of its public API surface.

use crate::events::AppEvent;

/// Trait for emitting application events.
///
/// # Implementations
///
/// - [`NoopEmitter`] — for tests and CLI contexts that don't need events
/// - Adapter-specific implementations (GUI event bus, SSE, etc.)
pub trait AppEventEmitter: Send + Sync {
    /// Emit an application event.
    ///
    /// Implementations should handle the event asynchronously or buffer it.
    /// This method should not block.
    fn emit(&self, event: AppEvent);

    /// Clone this emitter into a boxed trait object.
    ///
    /// This enables cloning of `Arc<dyn AppEventEmitter>` without requiring
    /// the underlying type to implement Clone.
    fn clone_box(&self) -> Box<dyn AppEventEmitter>;
}

/// A no-op event emitter for tests and CLI contexts.
///
/// Discards all events — suitable wherever event emission is optional.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AppEventEmitter for NoopEmitter {
    fn emit(&self, _event: AppEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}
