//! TileJSON document parsing.
//!
//! Parsing is a pure function from raw document bytes to a [`Tileset`],
//! split into two stages: a generic JSON decode (syntax diagnostics carry a
//! byte offset and the decoder's message verbatim) and a typed conversion
//! into the descriptor shape (schema diagnostics carry a message). When the
//! document was fetched from a recognized vendor URL, the decoded tile URL
//! templates are additionally rewritten into the vendor's canonical form.

use serde_json::Value;

use super::error::ParseError;
use super::types::SourceType;
use crate::tileset::Tileset;
use crate::vendor::UrlCanonicalizer;

/// Parse a TileJSON document into a [`Tileset`].
///
/// `source_url` is the URL the document was fetched from; it decides
/// whether the vendor rewrite applies. `source_type` and `tile_size` are
/// forwarded to the canonicalizer as hints. No partial result is returned
/// on error.
pub fn parse_tile_json<C>(
    body: &[u8],
    source_url: &str,
    source_type: SourceType,
    tile_size: u16,
    canonicalizer: &C,
) -> Result<Tileset, ParseError>
where
    C: UrlCanonicalizer + ?Sized,
{
    let document: Value = serde_json::from_slice(body).map_err(|e| ParseError::Syntax {
        offset: byte_offset(body, e.line(), e.column()),
        message: e.to_string(),
    })?;

    let mut tileset: Tileset = serde_json::from_value(document).map_err(|e| ParseError::Schema {
        message: e.to_string(),
    })?;

    // Vendor-hosted TileJSON may ship templates that are not fully
    // qualified; rewrite them into the vendor's canonical form.
    if canonicalizer.is_vendor_url(source_url) {
        for template in &mut tileset.tiles {
            *template = canonicalizer.canonicalize(template, source_type, tile_size);
        }
    }

    Ok(tileset)
}

/// Translate serde_json's 1-based line/column diagnostics into a byte
/// offset within `body`, clamped to the input length.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut start = 0usize;
    for _ in 1..line {
        match body[start..].iter().position(|&b| b == b'\n') {
            Some(newline) => start += newline + 1,
            None => return body.len(),
        }
    }
    (start + column.saturating_sub(1)).min(body.len())
}
