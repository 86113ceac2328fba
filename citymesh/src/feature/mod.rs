//! Feature data model
//!
//! Types flowing between the pipeline stages: decoded tiles, geographic
//! features, and merged output features. Features are created once per
//! decoded tile and never mutated afterwards; only [`MergedFeature`] values
//! survive to the render stage, and nothing outlives one pipeline run.

use std::collections::HashMap;
use std::fmt;

use crate::coord::TileCoord;
use crate::geometry::Geometry;

/// A typed vector-tile property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Float(f32),
    Double(f64),
    Int(i64),
    Uint(u64),
    Sint(i64),
    Bool(bool),
}

impl PropertyValue {
    /// Returns the contained string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::Double(v) => write!(f, "{}", v),
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::Uint(v) => write!(f, "{}", v),
            PropertyValue::Sint(v) => write!(f, "{}", v),
            PropertyValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// A geographic polygon feature with a stable cross-tile identifier.
///
/// `id` is assigned by the upstream data source and is stable across tiles
/// covering the same real-world entity; it is the sole merge key.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: String,
    pub properties: HashMap<String, PropertyValue>,
    pub geometry: Geometry,
}

/// One named layer of a decoded tile.
#[derive(Debug, Clone)]
pub struct FeatureLayer {
    /// Layer name as declared in the tile
    pub name: String,
    /// Tile-local coordinate extent the layer was decoded from
    pub extent: u32,
    /// Features in decode order
    pub features: Vec<Feature>,
}

/// A decoded tile. Owned transiently during fetch; discarded once its
/// features are extracted into a [`FeatureCollection`].
#[derive(Debug, Clone)]
pub struct RawTile {
    pub coord: TileCoord,
    pub layers: HashMap<String, FeatureLayer>,
}

impl RawTile {
    /// Looks up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&FeatureLayer> {
        self.layers.get(name)
    }
}

/// An ordered sequence of features.
///
/// Insertion order is irrelevant to result correctness but feeds the merge
/// stage, which sorts before its single linear grouping pass.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Flattens one named layer out of every tile, consuming the tiles.
    pub fn from_tiles(tiles: Vec<RawTile>, layer_name: &str) -> Self {
        Self::from_tiles_filtered(tiles, layer_name, |_| true)
    }

    /// Flattens one named layer out of every tile, keeping only features
    /// accepted by the predicate.
    pub fn from_tiles_filtered<F>(tiles: Vec<RawTile>, layer_name: &str, filter: F) -> Self
    where
        F: Fn(&Feature) -> bool,
    {
        let features = tiles
            .into_iter()
            .filter_map(|mut tile| tile.layers.remove(layer_name))
            .flat_map(|layer| layer.features)
            .filter(|f| filter(f))
            .collect();
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }
}

/// Result of unioning one or more same-id features.
///
/// Carries the group's id, the properties of the group's first fragment in
/// sorted order, and a single winding-corrected geometry.
#[derive(Debug, Clone)]
pub struct MergedFeature {
    pub id: String,
    pub properties: HashMap<String, PropertyValue>,
    pub geometry: Geometry,
    /// How many input fragments contributed to this feature
    pub fragment_count: usize,
}
