//! Tileset descriptor data model.
//!
//! A [`Tileset`] is the decoded form of a TileJSON document: the ordered
//! tile URL templates, the attribution text, and the descriptor metadata
//! that is decoded structurally but not interpreted here (scheme, zoom
//! bounds, geographic bounds). Fields this library has no opinion about are
//! carried opaquely in [`Tileset::extra`].
//!
//! A `Tileset` value is never mutated in place once constructed; the source
//! replaces its whole snapshot on every successful refresh.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tile addressing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Slippy-map addressing, row 0 at the north edge. The TileJSON default.
    #[default]
    Xyz,
    /// TMS addressing, row 0 at the south edge.
    Tms,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Xyz => write!(f, "xyz"),
            Scheme::Tms => write!(f, "tms"),
        }
    }
}

/// Decoded tile-source descriptor.
///
/// The `tiles` field is required and its order is significant: clients
/// select and rotate between templates in the order they appear. An absent
/// `attribution` (`None`) is distinct from a present-but-empty one
/// (`Some("")`); change detection compares the two as different values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    /// Ordered tile URL templates.
    pub tiles: Vec<String>,

    /// Human-readable copyright/credit text, surfaced to end users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,

    /// Tile addressing scheme. Decoded but not interpreted here.
    #[serde(default)]
    pub scheme: Scheme,

    /// Minimum zoom level. Decoded but not interpreted here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<u8>,

    /// Maximum zoom level. Decoded but not interpreted here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<u8>,

    /// Geographic bounds as `[west, south, east, north]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Vec<f64>>,

    /// Default center as `[lon, lat, zoom]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec<f64>>,

    /// All remaining TileJSON fields, carried through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tileset {
    /// Create a descriptor from tile URL templates, with all metadata unset.
    pub fn new(tiles: Vec<String>) -> Self {
        Self {
            tiles,
            attribution: None,
            scheme: Scheme::default(),
            minzoom: None,
            maxzoom: None,
            bounds: None,
            center: None,
            extra: Map::new(),
        }
    }

    /// Create a descriptor with an attribution text.
    pub fn with_attribution(tiles: Vec<String>, attribution: impl Into<String>) -> Self {
        Self {
            attribution: Some(attribution.into()),
            ..Self::new(tiles)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_defaults_to_xyz() {
        assert_eq!(Scheme::default(), Scheme::Xyz);
    }

    #[test]
    fn test_scheme_display() {
        assert_eq!(Scheme::Xyz.to_string(), "xyz");
        assert_eq!(Scheme::Tms.to_string(), "tms");
    }

    #[test]
    fn test_decode_minimal_document() {
        let tileset: Tileset =
            serde_json::from_str(r#"{"tiles":["https://a/{z}/{x}/{y}.png"]}"#).unwrap();
        assert_eq!(tileset.tiles, vec!["https://a/{z}/{x}/{y}.png"]);
        assert_eq!(tileset.attribution, None);
        assert_eq!(tileset.scheme, Scheme::Xyz);
        assert!(tileset.extra.is_empty());
    }

    #[test]
    fn test_decode_full_document() {
        let tileset: Tileset = serde_json::from_str(
            r#"{
                "tilejson": "2.2.0",
                "name": "streets",
                "tiles": ["https://a/{z}/{x}/{y}.png", "https://b/{z}/{x}/{y}.png"],
                "attribution": "© Example",
                "scheme": "tms",
                "minzoom": 2,
                "maxzoom": 14,
                "bounds": [-180.0, -85.0, 180.0, 85.0],
                "center": [8.0, 53.5, 10.0]
            }"#,
        )
        .unwrap();
        assert_eq!(tileset.tiles.len(), 2);
        assert_eq!(tileset.attribution.as_deref(), Some("© Example"));
        assert_eq!(tileset.scheme, Scheme::Tms);
        assert_eq!(tileset.minzoom, Some(2));
        assert_eq!(tileset.maxzoom, Some(14));
        assert_eq!(tileset.bounds, Some(vec![-180.0, -85.0, 180.0, 85.0]));
        assert_eq!(tileset.center, Some(vec![8.0, 53.5, 10.0]));
        // Unknown keys are preserved, not dropped.
        assert_eq!(
            tileset.extra.get("name"),
            Some(&Value::String("streets".to_string()))
        );
        assert_eq!(
            tileset.extra.get("tilejson"),
            Some(&Value::String("2.2.0".to_string()))
        );
    }

    #[test]
    fn test_template_order_is_preserved() {
        let tileset: Tileset =
            serde_json::from_str(r#"{"tiles":["https://c/","https://a/","https://b/"]}"#).unwrap();
        assert_eq!(tileset.tiles, vec!["https://c/", "https://a/", "https://b/"]);
    }

    #[test]
    fn test_empty_attribution_is_distinct_from_absent() {
        let absent: Tileset = serde_json::from_str(r#"{"tiles":[]}"#).unwrap();
        let empty: Tileset = serde_json::from_str(r#"{"tiles":[],"attribution":""}"#).unwrap();
        assert_eq!(absent.attribution, None);
        assert_eq!(empty.attribution, Some(String::new()));
        assert_ne!(absent.attribution, empty.attribution);
    }

    #[test]
    fn test_missing_tiles_fails_to_decode() {
        let result = serde_json::from_str::<Tileset>(r#"{"attribution":"© Example"}"#);
        assert!(result.is_err());
    }
}
