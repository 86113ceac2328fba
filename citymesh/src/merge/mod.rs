//! Cross-tile feature merging
//!
//! A building split across tile boundaries arrives as several features
//! sharing one id. Merging sorts the flattened feature list by id and walks
//! it once, unioning each feature into the last accumulated entry when the
//! ids match. The sort is load-bearing, not an optimization: the linear
//! pass only ever compares against the *last* entry, so same-id features
//! must be adjacent for grouping to happen at all.
//!
//! Polygon union does not guarantee ring winding, so each union result is
//! rewound to the configured convention. `rewind_after_union` exists to
//! reproduce the historical uncorrected behavior (inside-out polygons under
//! an even-odd fill rule); leave it enabled for correct output.

use std::time::Instant;

use geo::BooleanOps;
use tracing::debug;

use crate::feature::{Feature, MergedFeature};
use crate::geometry::{rewind, Geometry, GeometryError, WindingOrder};

/// Merge stage configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeConfig {
    /// Winding convention applied after each union
    pub winding: WindingOrder,
    /// Apply winding correction after each union (disable only to
    /// reproduce the uncorrected rendering behavior)
    pub rewind_after_union: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            winding: WindingOrder::Clockwise,
            rewind_after_union: true,
        }
    }
}

/// Merges same-id features into single polygons.
///
/// Every distinct input id appears exactly once in the output, with its
/// geometry the union of all input fragments sharing that id. A group of
/// exactly one feature is returned unchanged: no union is computed and the
/// source geometry (assumed well-wound) is untouched.
///
/// # Errors
///
/// Returns [`GeometryError`] if any union input fails validation; the
/// failure aborts the merge rather than skipping the feature, since a
/// partially merged collection is worse than no collection.
pub fn merge_features(
    features: Vec<Feature>,
    config: &MergeConfig,
) -> Result<Vec<MergedFeature>, GeometryError> {
    let started = Instant::now();
    let input_count = features.len();

    let mut sorted = features;
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let merged = merge_adjacent(sorted, config)?;

    debug!(
        input = input_count,
        output = merged.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "merged feature collection"
    );
    Ok(merged)
}

/// The linear grouping pass. Correct only on id-sorted input; exposed to
/// the crate so tests can pin the adjacency precondition.
pub(crate) fn merge_adjacent(
    features: Vec<Feature>,
    config: &MergeConfig,
) -> Result<Vec<MergedFeature>, GeometryError> {
    let mut merged: Vec<MergedFeature> = Vec::new();

    for feature in features {
        match merged.last_mut() {
            Some(last) if last.id == feature.id => {
                last.geometry.validate()?;
                feature.geometry.validate()?;

                let union = last
                    .geometry
                    .to_multi_polygon()
                    .union(&feature.geometry.to_multi_polygon());
                let mut geometry = Geometry::MultiPolygon(union);
                if config.rewind_after_union {
                    geometry = rewind(&geometry, config.winding);
                }

                last.geometry = geometry;
                last.fragment_count += 1;
            }
            _ => merged.push(MergedFeature {
                id: feature.id,
                properties: feature.properties,
                geometry: feature.geometry,
                fragment_count: 1,
            }),
        }
    }

    Ok(merged)
}
