//! Source configuration types.

use std::fmt;

use crate::tileset::Tileset;

/// Default tile size hint in device pixels.
pub const DEFAULT_TILE_SIZE: u16 = 512;

/// Kind of tile content a source serves.
///
/// Forwarded to the URL canonicalizer as a hint; never used for control
/// logic inside the source itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// Raster imagery tiles.
    Raster,
    /// Vector tiles.
    Vector,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Raster => write!(f, "raster"),
            SourceType::Vector => write!(f, "vector"),
        }
    }
}

/// How a source obtains its descriptor, fixed at construction.
///
/// Exactly one of the two: either the descriptor is embedded inline in the
/// owner's configuration, or it must be fetched from a URL. Modelled as a
/// sum type so every call site handles both cases exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum TilesetConfig {
    /// Descriptor embedded directly in the owner's configuration.
    Inline(Tileset),
    /// URL of a TileJSON document to fetch.
    Url(String),
}

impl TilesetConfig {
    /// Whether the descriptor is configured inline.
    pub fn is_inline(&self) -> bool {
        matches!(self, TilesetConfig::Inline(_))
    }

    /// The configured descriptor URL, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            TilesetConfig::Inline(_) => None,
            TilesetConfig::Url(url) => Some(url),
        }
    }
}
