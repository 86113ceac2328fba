//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file. These are
//! pure data types with no parsing logic; defaults mirror the library
//! constants.

use crate::geometry::WindingOrder;
use crate::merge::MergeConfig;
use crate::physics::{
    AttractionConfig, PhysicsConfig, BORDER_THICKNESS, DEFAULT_ATTRACTOR_COUNT,
    DEFAULT_BATCH_SIZE, DEFAULT_FORCE_CONSTANT,
};
use crate::pipeline::{FetchPolicy, PipelineConfig};
use crate::provider::{DEFAULT_PROPERTIES, EUBUCCO_BASE_URL, EUBUCCO_BUILDINGS_LAYER};
use crate::svg::{DEFAULT_GROUP_ID, DEFAULT_SIMPLIFY_TOLERANCE};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// Tile server settings
    pub provider: ProviderSettings,
    /// Map pipeline settings
    pub pipeline: PipelineSettings,
    /// Physics sandbox settings
    pub physics: PhysicsSettings,
}

/// Tile server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Tile server base URL
    pub base_url: String,
    /// Layer to request and merge
    pub layer: String,
    /// Property subset requested per feature
    pub properties: Vec<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: EUBUCCO_BASE_URL.to_string(),
            layer: EUBUCCO_BUILDINGS_LAYER.to_string(),
            properties: DEFAULT_PROPERTIES.iter().map(|p| p.to_string()).collect(),
            request_timeout_secs: 30,
        }
    }
}

/// Map pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Per-tile failure handling
    pub fetch_policy: FetchPolicy,
    /// Winding convention applied after unions
    pub winding: WindingOrder,
    /// Apply winding correction after each union
    pub rewind_after_union: bool,
    /// Tile edge length in pixels
    pub tile_size: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            fetch_policy: pipeline.fetch_policy,
            winding: pipeline.merge.winding,
            rewind_after_union: pipeline.merge.rewind_after_union,
            tile_size: pipeline.tile_size,
        }
    }
}

impl PipelineSettings {
    /// Maps the settings onto the pipeline's own configuration type.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            fetch_policy: self.fetch_policy,
            merge: MergeConfig {
                winding: self.winding,
                rewind_after_union: self.rewind_after_union,
            },
            tile_size: self.tile_size,
        }
    }
}

/// Physics sandbox configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsSettings {
    /// Paths processed per batch before yielding
    pub batch_size: usize,
    /// Number of heaviest bodies acting as attractors
    pub attractor_count: usize,
    /// Attraction force constant
    pub force_constant: f64,
    /// Border wall thickness in pixels
    pub border_thickness: f64,
    /// Douglas-Peucker tolerance for outline simplification
    pub simplify_tolerance: f64,
    /// SVG group id holding the path outlines
    pub group_id: String,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            attractor_count: DEFAULT_ATTRACTOR_COUNT,
            force_constant: DEFAULT_FORCE_CONSTANT,
            border_thickness: BORDER_THICKNESS,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            group_id: DEFAULT_GROUP_ID.to_string(),
        }
    }
}

impl PhysicsSettings {
    /// Session construction parameters.
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig {
            border_thickness: self.border_thickness,
            ..PhysicsConfig::default()
        }
    }

    /// Attraction law parameters.
    pub fn to_attraction_config(&self) -> AttractionConfig {
        AttractionConfig {
            force_constant: self.force_constant,
            attractor_count: self.attractor_count,
        }
    }
}
