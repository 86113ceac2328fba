//! Citymesh - building-footprint pipelines for city data
//!
//! This library provides two independent pipelines around city building
//! footprints:
//!
//! - **Map pipeline**: computes the tile grid covering a viewport under a
//!   Mercator projection, fetches protobuf vector tiles concurrently, decodes
//!   the buildings layer into geographic polygon features, merges fragments
//!   of the same building across tile boundaries into single polygons, and
//!   renders the result as SVG markup or an earcut-triangulated mesh.
//! - **Physics pipeline**: extracts path outlines from an SVG document,
//!   simplifies them, and spawns one rigid body per outline into a 2D
//!   physics world with an explicit per-tick attraction force.
//!
//! # High-Level API
//!
//! ```ignore
//! use citymesh::pipeline::{MapPipeline, PipelineConfig};
//! use citymesh::projection::Projection;
//! use citymesh::provider::{AsyncReqwestClient, BuildingTilesProvider};
//! use citymesh::viewport::Viewport;
//!
//! let viewport = Viewport::new(1280.0, 800.0, 1.0);
//! let projection = Projection::for_zoom(16.3731, 48.2083, 18, &viewport);
//! let client = AsyncReqwestClient::new()?;
//! let provider = BuildingTilesProvider::eubucco(client);
//!
//! let pipeline = MapPipeline::new(provider, PipelineConfig::default());
//! let merged = pipeline.run(&projection, &viewport).await?;
//! ```

pub mod config;
pub mod coord;
pub mod decode;
pub mod feature;
pub mod geometry;
pub mod logging;
pub mod merge;
pub mod physics;
pub mod pipeline;
pub mod projection;
pub mod provider;
pub mod render;
pub mod svg;
pub mod viewport;

/// Version of the citymesh library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
