//! Tilesource - asynchronous loading of remote tile-source descriptors.
//!
//! A map style references tile sources either by embedding a descriptor
//! (a TileJSON document) inline, or by naming a URL the descriptor must be
//! fetched from. This library resolves both configurations into a
//! [`Tileset`] snapshot and reports the outcome through an observer:
//!
//! - [`tileset`] - the decoded descriptor data model
//! - [`source`] - the stateful [`TileSource`] that drives the load protocol
//! - [`transport`] - the request/response contract and its reqwest-backed
//!   implementation
//! - [`vendor`] - the URL-canonicalization contract for vendor-hosted
//!   sources
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tilesource::{
//!     HttpTransport, NullObserver, PassthroughCanonicalizer, SourceType,
//!     TileSource, TilesetConfig, DEFAULT_TILE_SIZE,
//! };
//!
//! let transport = HttpTransport::new()?;
//! let source = TileSource::new(
//!     "basemap",
//!     TilesetConfig::Url("https://example.com/tiles.json".to_string()),
//!     SourceType::Raster,
//!     DEFAULT_TILE_SIZE,
//!     Arc::new(NullObserver),
//!     Arc::new(PassthroughCanonicalizer),
//! );
//! source.ensure_loaded(&transport);
//! // ... the observer is notified once the fetch completes.
//! ```

pub mod source;
pub mod tileset;
pub mod transport;
pub mod vendor;

pub use source::{
    parse_tile_json, NullObserver, ParseError, SharedSourceObserver, SourceError, SourceObserver,
    SourceType, TileSource, TilesetConfig, DEFAULT_TILE_SIZE,
};
pub use tileset::{Scheme, Tileset};
pub use transport::{
    HttpTransport, RequestHandle, ResponseCallback, Transport, TransportResponse,
};
pub use vendor::{PassthroughCanonicalizer, UrlCanonicalizer};
