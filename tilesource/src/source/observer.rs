//! Observer contract for source lifecycle events.
//!
//! The owning registry subscribes to load outcomes by passing an observer
//! to the source at construction time. Notifications are synchronous calls
//! made from within the fetch completion path, exactly one per event.

use std::sync::Arc;

use super::error::SourceError;

/// Receives source lifecycle notifications.
///
/// Implementations must be `Send + Sync`: the completion path runs on the
/// transport's execution context, not on the thread that constructed the
/// source.
pub trait SourceObserver: Send + Sync {
    /// The source finished loading a descriptor.
    fn on_source_loaded(&self, source_id: &str);

    /// An externally visible attribute of the source (its attribution)
    /// changed with the newly loaded descriptor.
    fn on_source_changed(&self, source_id: &str);

    /// A load attempt failed. Any previously loaded descriptor is intact.
    fn on_source_error(&self, source_id: &str, error: &SourceError);
}

/// Shared observer handle injected into sources.
pub type SharedSourceObserver = Arc<dyn SourceObserver>;

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SourceObserver for NullObserver {
    fn on_source_loaded(&self, _source_id: &str) {}
    fn on_source_changed(&self, _source_id: &str) {}
    fn on_source_error(&self, _source_id: &str, _error: &SourceError) {}
}
