//! Vector-tile decoding
//!
//! Turns a binary protobuf vector-tile payload into named [`FeatureLayer`]s
//! of validated geographic features. The protobuf container comes from
//! `geozero`'s vendored vector-tile schema; geometry command streams and
//! property tags are decoded here, and every geometry is validated at this
//! boundary so downstream stages can trust it.

mod error;
mod geometry;

pub use error::DecodeError;

use std::collections::HashMap;

use geozero::mvt::{tile, Message, Tile};
use tracing::{debug, trace};

use crate::coord::TileCoord;
use crate::feature::{Feature, FeatureLayer, PropertyValue, RawTile};
use crate::geometry::Geometry;

use geometry::{assemble_polygons, decode_rings};

/// Extent the vector-tile spec assumes when a layer omits one.
const DEFAULT_EXTENT: u32 = 4096;

/// Decodes a binary vector-tile payload into a [`RawTile`].
///
/// Non-polygonal features (points, linestrings) are skipped; building
/// layers are polygonal and the downstream merge operates on polygons only.
///
/// # Errors
///
/// Returns [`DecodeError`] if the payload is not a valid vector tile or if
/// any polygonal feature fails geometry validation.
pub fn decode_tile(coord: TileCoord, bytes: &[u8]) -> Result<RawTile, DecodeError> {
    let container = Tile::decode(bytes).map_err(|e| DecodeError::Container(e.to_string()))?;

    let mut layers = HashMap::new();
    for layer in &container.layers {
        let decoded = decode_layer(&coord, layer)?;
        debug!(
            tile = %coord,
            layer = %decoded.name,
            features = decoded.features.len(),
            "decoded layer"
        );
        layers.insert(decoded.name.clone(), decoded);
    }

    Ok(RawTile { coord, layers })
}

fn decode_layer(coord: &TileCoord, layer: &tile::Layer) -> Result<FeatureLayer, DecodeError> {
    let extent = layer.extent.unwrap_or(DEFAULT_EXTENT);
    let mut features = Vec::with_capacity(layer.features.len());

    for feature in &layer.features {
        if feature.r#type() != tile::GeomType::Polygon {
            trace!(
                tile = %coord,
                layer = %layer.name,
                geom_type = ?feature.r#type(),
                "skipping non-polygon feature"
            );
            continue;
        }

        let properties = decode_properties(layer, feature)?;
        let id = feature_id(layer, feature, &properties)?;

        let rings = decode_rings(&feature.geometry)?;
        let mut polygons = assemble_polygons(rings, coord, extent)?;
        let geometry = if polygons.len() == 1 {
            Geometry::Polygon(polygons.remove(0))
        } else {
            Geometry::MultiPolygon(polygons.into())
        };
        geometry.validate()?;

        features.push(Feature {
            id,
            properties,
            geometry,
        });
    }

    Ok(FeatureLayer {
        name: layer.name.clone(),
        extent,
        features,
    })
}

/// The merge key: the upstream `id` property, falling back to the
/// tile-level feature id.
fn feature_id(
    layer: &tile::Layer,
    feature: &tile::Feature,
    properties: &HashMap<String, PropertyValue>,
) -> Result<String, DecodeError> {
    if let Some(value) = properties.get("id") {
        return Ok(value.to_string());
    }
    if let Some(id) = feature.id {
        return Ok(id.to_string());
    }
    Err(DecodeError::MissingId {
        layer: layer.name.clone(),
    })
}

/// Resolves the feature's tag index pairs against the layer's key/value
/// tables.
fn decode_properties(
    layer: &tile::Layer,
    feature: &tile::Feature,
) -> Result<HashMap<String, PropertyValue>, DecodeError> {
    let mut properties = HashMap::with_capacity(feature.tags.len() / 2);

    for pair in feature.tags.chunks(2) {
        let [key_index, value_index] = pair else {
            return Err(DecodeError::InvalidTagIndex {
                index: *pair.first().unwrap_or(&0),
            });
        };
        let key = layer
            .keys
            .get(*key_index as usize)
            .ok_or(DecodeError::InvalidTagIndex { index: *key_index })?;
        let value = layer
            .values
            .get(*value_index as usize)
            .ok_or(DecodeError::InvalidTagIndex { index: *value_index })?;

        if let Some(value) = property_value(value) {
            properties.insert(key.clone(), value);
        }
    }

    Ok(properties)
}

fn property_value(value: &tile::Value) -> Option<PropertyValue> {
    if let Some(s) = &value.string_value {
        Some(PropertyValue::String(s.clone()))
    } else if let Some(v) = value.float_value {
        Some(PropertyValue::Float(v))
    } else if let Some(v) = value.double_value {
        Some(PropertyValue::Double(v))
    } else if let Some(v) = value.int_value {
        Some(PropertyValue::Int(v))
    } else if let Some(v) = value.uint_value {
        Some(PropertyValue::Uint(v))
    } else if let Some(v) = value.sint_value {
        Some(PropertyValue::Sint(v))
    } else {
        value.bool_value.map(PropertyValue::Bool)
    }
}
