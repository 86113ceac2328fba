//! Map pipeline orchestration
//!
//! Sequences the four stages with strictly forward dataflow:
//!
//! ```text
//! Tile Grid → Fetch/Decode (concurrent) → Merge → Render
//! ```
//!
//! All tile fetches for a run are issued concurrently and joined before the
//! merge begins; each fetch writes only its own result slot, so no locking
//! is needed. Under the default [`FetchPolicy::FailFast`] one failing tile
//! aborts the whole batch with no partial feature collection and the merge
//! stage never runs. [`FetchPolicy::SkipFailed`] instead drops failing
//! tiles with a warning, an explicit opt-in rather than the baseline
//! contract. In-flight requests cannot be cancelled; timeouts are the HTTP
//! client's policy.

mod error;

pub use error::PipelineError;

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::coord::{TileCoord, TileGrid};
use crate::decode::decode_tile;
use crate::feature::{Feature, FeatureCollection, MergedFeature, RawTile};
use crate::merge::{merge_features, MergeConfig};
use crate::projection::Projection;
use crate::provider::TileSource;
use crate::render::svg_document;
use crate::viewport::Viewport;

/// Per-tile failure handling during the fetch stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// One failing tile aborts the whole batch (the default)
    #[default]
    FailFast,
    /// Failing tiles are logged and dropped; the rest of the batch renders
    SkipFailed,
}

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub fetch_policy: FetchPolicy,
    pub merge: MergeConfig,
    /// Tile edge length assumed by the grid generator
    pub tile_size: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_policy: FetchPolicy::default(),
            merge: MergeConfig::default(),
            tile_size: TileGrid::DEFAULT_TILE_SIZE,
        }
    }
}

/// The tile-union pipeline: grid → fetch → merge.
pub struct MapPipeline<S: TileSource + 'static> {
    source: Arc<S>,
    layer: String,
    config: PipelineConfig,
    filter: Option<Box<dyn Fn(&Feature) -> bool + Send + Sync>>,
}

impl<S: TileSource + 'static> MapPipeline<S> {
    /// Creates a pipeline reading the given layer from a tile source.
    pub fn new(source: S, layer: impl Into<String>, config: PipelineConfig) -> Self {
        Self {
            source: Arc::new(source),
            layer: layer.into(),
            config,
            filter: None,
        }
    }

    /// Installs a predicate deciding which decoded features enter the
    /// merge; features it rejects are dropped after decode.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Feature) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Runs grid generation, concurrent fetch/decode, and merge.
    ///
    /// # Errors
    ///
    /// Under [`FetchPolicy::FailFast`], the first fetch or decode failure
    /// aborts the run. Merge-stage geometry failures always abort.
    #[instrument(skip_all, fields(source = self.source.name(), layer = %self.layer))]
    pub async fn run(
        &self,
        projection: &Projection,
        viewport: &Viewport,
    ) -> Result<Vec<MergedFeature>, PipelineError> {
        let grid = TileGrid::with_tile_size(self.config.tile_size).cover(projection, viewport);
        info!(tiles = grid.len(), "tile grid computed");

        let started = Instant::now();
        let tiles = fetch_stage(Arc::clone(&self.source), &grid, self.config.fetch_policy).await?;
        debug!(
            tiles = tiles.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetch stage complete"
        );

        let features = match &self.filter {
            Some(filter) => FeatureCollection::from_tiles_filtered(tiles, &self.layer, filter),
            None => FeatureCollection::from_tiles(tiles, &self.layer),
        };
        let merged = merge_features(features.into_features(), &self.config.merge)?;
        info!(features = merged.len(), "pipeline run complete");
        Ok(merged)
    }

    /// Runs the pipeline and renders the merged collection as SVG markup.
    pub async fn run_to_svg(
        &self,
        projection: &Projection,
        viewport: &Viewport,
    ) -> Result<String, PipelineError> {
        let merged = self.run(projection, viewport).await?;
        Ok(svg_document(&merged, projection, viewport))
    }
}

/// Fetches and decodes every tile of the grid concurrently.
///
/// Tiles are returned in grid order regardless of completion order: each
/// task fills only its own slot, and the join barrier ensures the caller
/// sees either every slot filled or (fail-fast) an error.
async fn fetch_stage<S: TileSource + 'static>(
    source: Arc<S>,
    grid: &[TileCoord],
    policy: FetchPolicy,
) -> Result<Vec<RawTile>, PipelineError> {
    let mut tasks = JoinSet::new();
    for (index, coord) in grid.iter().copied().enumerate() {
        let source = Arc::clone(&source);
        tasks.spawn(async move {
            let result = async {
                let bytes = source.fetch_tile(coord).await?;
                Ok::<RawTile, PipelineError>(decode_tile(coord, &bytes)?)
            }
            .await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<RawTile>> = grid.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.map_err(|e| PipelineError::TaskPanicked(e.to_string()))?;
        match result {
            Ok(tile) => slots[index] = Some(tile),
            Err(e) => match policy {
                FetchPolicy::FailFast => return Err(e),
                FetchPolicy::SkipFailed => {
                    warn!(tile = %grid[index], error = %e, "skipping failed tile");
                }
            },
        }
    }

    Ok(slots.into_iter().flatten().collect())
}
