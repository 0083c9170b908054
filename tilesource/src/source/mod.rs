//! Remote tile-source descriptor loading.
//!
//! A [`TileSource`] owns one source configuration - an inline [`Tileset`]
//! or the URL of a TileJSON document - and resolves it into a descriptor
//! snapshot. Inline configurations are adopted synchronously; URL
//! configurations are fetched through an injected [`Transport`], parsed,
//! optionally canonicalized, and adopted from the completion callback. Load
//! outcomes are reported through the observer injected at construction.
//!
//! # Load protocol
//!
//! At most one fetch is in flight per source; `ensure_loaded` is a no-op
//! while a request is pending. Every completion - success, transport error,
//! empty body, parse failure or not-modified - clears the pending marker,
//! so a later `ensure_loaded` may retry. A failed attempt never clears a
//! previously adopted descriptor.

mod error;
mod observer;
mod parser;
mod types;

pub use error::{ParseError, SourceError};
pub use observer::{NullObserver, SharedSourceObserver, SourceObserver};
pub use parser::parse_tile_json;
pub use types::{SourceType, TilesetConfig, DEFAULT_TILE_SIZE};

#[cfg(test)]
pub use observer::tests::{RecordingObserver, SourceEvent};

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::tileset::Tileset;
use crate::transport::{RequestHandle, Transport, TransportResponse};
use crate::vendor::UrlCanonicalizer;

/// Mutable load state, shared with in-flight completion callbacks.
#[derive(Default)]
struct LoadState {
    /// Most recently adopted descriptor; `None` until the first success.
    tileset: Option<Tileset>,
    /// Whether a fetch is outstanding. Authoritative for the
    /// at-most-one-in-flight guard; `handle` may lag behind it.
    pending: bool,
    /// Ownership of the outstanding request, if any.
    handle: Option<RequestHandle>,
}

/// A tile source whose descriptor is loaded on demand.
///
/// The observer and canonicalizer are injected at construction and never
/// change; the configuration is fixed for the lifetime of the source. The
/// source itself is not `Clone`: dropping it releases any in-flight request
/// and guarantees the completion callback no longer notifies the observer.
pub struct TileSource<C: UrlCanonicalizer> {
    id: String,
    config: TilesetConfig,
    source_type: SourceType,
    tile_size: u16,
    observer: SharedSourceObserver,
    canonicalizer: Arc<C>,
    state: Arc<Mutex<LoadState>>,
}

impl<C: UrlCanonicalizer + 'static> TileSource<C> {
    /// Create a source.
    ///
    /// `id` identifies the source in observer notifications and is never
    /// used for control logic. `tile_size` is a device-pixel hint forwarded
    /// to the canonicalizer (see [`DEFAULT_TILE_SIZE`]).
    pub fn new(
        id: impl Into<String>,
        config: TilesetConfig,
        source_type: SourceType,
        tile_size: u16,
        observer: SharedSourceObserver,
        canonicalizer: Arc<C>,
    ) -> Self {
        Self {
            id: id.into(),
            config,
            source_type,
            tile_size,
            observer,
            canonicalizer,
            state: Arc::new(Mutex::new(LoadState::default())),
        }
    }

    /// Identifier used in observer notifications.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The configuration this source was constructed with.
    pub fn config(&self) -> &TilesetConfig {
        &self.config
    }

    /// Make sure the descriptor is loaded or being loaded.
    ///
    /// Inline configurations are adopted on the first call and silently
    /// ignored afterwards; no transport request is ever issued for them and
    /// no notification is emitted. URL configurations issue one fetch,
    /// unless one is already outstanding. The call never blocks on I/O;
    /// parsing and notification happen inside the completion callback on
    /// the transport's execution context.
    pub fn ensure_loaded<T: Transport>(&self, transport: &T) {
        match &self.config {
            TilesetConfig::Inline(tileset) => {
                let mut state = self.state.lock();
                if state.tileset.is_none() {
                    debug!(source = %self.id, "adopting inline descriptor");
                    state.tileset = Some(tileset.clone());
                }
            }
            TilesetConfig::Url(url) => {
                {
                    let mut state = self.state.lock();
                    if state.pending {
                        return;
                    }
                    state.pending = true;
                }

                debug!(source = %self.id, url = %url, "requesting descriptor");
                let completion = Completion {
                    state: Arc::downgrade(&self.state),
                    observer: Arc::clone(&self.observer),
                    canonicalizer: Arc::clone(&self.canonicalizer),
                    id: self.id.clone(),
                    url: url.clone(),
                    source_type: self.source_type,
                    tile_size: self.tile_size,
                };
                let handle =
                    transport.fetch(url, Box::new(move |response| completion.run(response)));

                // A transport may have completed the fetch before returning;
                // in that case `pending` is already cleared and the handle
                // must not be kept.
                let mut state = self.state.lock();
                if state.pending {
                    state.handle = Some(handle);
                }
            }
        }
    }

    /// Whether a descriptor has been adopted at least once.
    ///
    /// Never reset by a failed refresh.
    pub fn is_loaded(&self) -> bool {
        self.state.lock().tileset.is_some()
    }

    /// The current descriptor snapshot, if loaded.
    pub fn tileset(&self) -> Option<Tileset> {
        self.state.lock().tileset.clone()
    }

    /// The current attribution, if loaded and non-empty.
    pub fn attribution(&self) -> Option<String> {
        self.state
            .lock()
            .tileset
            .as_ref()
            .and_then(|tileset| tileset.attribution.clone())
            .filter(|attribution| !attribution.is_empty())
    }
}

/// Everything a completion callback needs, detached from the source.
///
/// Holds only a weak reference to the load state: if the source was dropped
/// before the response arrived, the callback does nothing and the observer
/// is not notified.
struct Completion<C> {
    state: Weak<Mutex<LoadState>>,
    observer: SharedSourceObserver,
    canonicalizer: Arc<C>,
    id: String,
    url: String,
    source_type: SourceType,
    tile_size: u16,
}

impl<C: UrlCanonicalizer> Completion<C> {
    fn run(self, response: TransportResponse) {
        let Some(state) = self.state.upgrade() else {
            debug!(source = %self.id, "response after source drop, ignoring");
            return;
        };

        // Clear the pending marker on every branch, including errors and
        // not-modified: a later ensure_loaded may retry.
        {
            let mut state = state.lock();
            state.pending = false;
            state.handle = None;
        }

        match response {
            TransportResponse::Error(message) => {
                self.observer
                    .on_source_error(&self.id, &SourceError::Transport(message));
            }
            TransportResponse::NotModified => {}
            TransportResponse::NoContent => {
                self.observer.on_source_error(&self.id, &SourceError::EmptyBody);
            }
            TransportResponse::Body(body) => self.adopt(&state, &body),
        }
    }

    /// Parse the response body and, on success, swap in the new descriptor.
    fn adopt(&self, state: &Mutex<LoadState>, body: &[u8]) {
        let new_tileset = match parse_tile_json(
            body,
            &self.url,
            self.source_type,
            self.tile_size,
            &*self.canonicalizer,
        ) {
            Ok(tileset) => tileset,
            Err(e) => {
                self.observer
                    .on_source_error(&self.id, &SourceError::Parse(e));
                return;
            }
        };

        let attribution_changed = {
            let mut state = state.lock();
            let prior = state
                .tileset
                .as_ref()
                .and_then(|tileset| tileset.attribution.clone());
            let changed = prior != new_tileset.attribution;
            state.tileset = Some(new_tileset);
            changed
        };

        // Notify outside the lock: observers may call back into accessors.
        debug!(source = %self.id, attribution_changed, "descriptor loaded");
        self.observer.on_source_loaded(&self.id);
        if attribution_changed {
            self.observer.on_source_changed(&self.id);
        }
    }
}
