//! Integration tests for the map pipeline.
//!
//! These tests drive the full grid → fetch → decode → merge sequence
//! against a scripted tile source serving real protobuf-encoded vector
//! tiles, covering:
//! - Cross-tile merging of same-id building fragments
//! - Winding correction of union results
//! - All-or-nothing fetch failure propagation
//! - SVG rendering of the merged collection

use std::collections::HashMap;
use std::f64::consts::TAU;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use geo::Area;
use geozero::mvt::{tile, Message, Tile};

use citymesh::coord::TileCoord;
use citymesh::geometry::Geometry;
use citymesh::pipeline::{FetchPolicy, MapPipeline, PipelineConfig, PipelineError};
use citymesh::projection::Projection;
use citymesh::provider::{FetchError, TileSource};
use citymesh::viewport::Viewport;

const LAYER: &str = "public.data_building";

// =============================================================================
// Test Helpers
// =============================================================================

/// Serves pre-encoded tile payloads keyed by coordinate. Counts merge-stage
/// visibility by counting fetches. Unknown coordinates fail with HTTP 500.
struct ScriptedSource {
    tiles: HashMap<TileCoord, Vec<u8>>,
    fetches: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(tiles: HashMap<TileCoord, Vec<u8>>) -> Self {
        Self {
            tiles,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl TileSource for ScriptedSource {
    async fn fetch_tile(&self, coord: TileCoord) -> Result<Vec<u8>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.tiles
            .get(&coord)
            .cloned()
            .ok_or(FetchError::HttpStatus {
                status: 500,
                url: coord.to_string(),
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn zigzag(value: i64) -> u32 {
    ((value << 1) ^ (value >> 63)) as u32
}

/// Encodes a clockwise (in y-down tile space) axis-aligned rectangle as an
/// MVT polygon command stream.
fn rect_commands(x0: i64, y0: i64, width: i64, height: i64) -> Vec<u32> {
    vec![
        9,
        zigzag(x0),
        zigzag(y0),
        26,
        zigzag(width),
        zigzag(0),
        zigzag(0),
        zigzag(height),
        zigzag(-width),
        zigzag(0),
        15,
    ]
}

/// Builds an encoded single-layer tile with one feature per (id, geometry)
/// pair.
fn encode_tile(features: &[(&str, Vec<u32>)]) -> Vec<u8> {
    let keys = vec!["id".to_string()];
    let values: Vec<tile::Value> = features
        .iter()
        .map(|(id, _)| tile::Value {
            string_value: Some(id.to_string()),
            ..Default::default()
        })
        .collect();
    let features = features
        .iter()
        .enumerate()
        .map(|(index, (_, geometry))| tile::Feature {
            id: None,
            tags: vec![0, index as u32],
            r#type: Some(tile::GeomType::Polygon as i32),
            geometry: geometry.clone(),
        })
        .collect();

    Tile {
        layers: vec![tile::Layer {
            version: 2,
            name: LAYER.to_string(),
            features,
            keys,
            values,
            extent: Some(4096),
        }],
    }
    .encode_to_vec()
}

/// Viewport/projection pair whose tile grid is exactly the four zoom-2
/// tiles (1,1) (2,1) (1,2) (2,2).
fn four_tile_setup() -> (Projection, Viewport) {
    let viewport = Viewport::new(512.0, 512.0, 1.0);
    let projection = Projection::new(0.0, 0.0, 1024.0 / TAU, viewport.center());
    (projection, viewport)
}

/// Tile payloads for the standard scenario: building "1" is split across
/// the two top tiles with overlapping fragments, building "2" sits alone
/// in tile (1,2), and tile (2,2) has no features.
fn scenario_tiles() -> HashMap<TileCoord, Vec<u8>> {
    let mut tiles = HashMap::new();
    // Fragment reaches 104 units past the shared tile edge (extent 4096)
    tiles.insert(
        TileCoord::new(1, 1, 2),
        encode_tile(&[("1", rect_commands(3900, 1000, 300, 300))]),
    );
    tiles.insert(
        TileCoord::new(2, 1, 2),
        encode_tile(&[("1", rect_commands(-100, 1000, 300, 300))]),
    );
    tiles.insert(
        TileCoord::new(1, 2, 2),
        encode_tile(&[("2", rect_commands(500, 500, 400, 400))]),
    );
    tiles.insert(TileCoord::new(2, 2, 2), encode_tile(&[]));
    tiles
}

fn signed_area(geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Polygon(p) => p.signed_area(),
        Geometry::MultiPolygon(mp) => mp.signed_area(),
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[tokio::test]
async fn test_cross_tile_fragments_merge_into_one_feature() {
    let (projection, viewport) = four_tile_setup();
    let pipeline = MapPipeline::new(
        ScriptedSource::new(scenario_tiles()),
        LAYER,
        PipelineConfig::default(),
    );

    let merged = pipeline.run(&projection, &viewport).await.unwrap();

    assert_eq!(merged.len(), 2, "two distinct building ids");

    let one = merged.iter().find(|f| f.id == "1").unwrap();
    assert_eq!(one.fragment_count, 2, "both fragments contributed");
    assert_eq!(
        one.geometry.polygon_count(),
        1,
        "overlapping fragments union into a single polygon"
    );

    let two = merged.iter().find(|f| f.id == "2").unwrap();
    assert_eq!(two.fragment_count, 1);
}

#[tokio::test]
async fn test_union_output_is_wound_clockwise() {
    let (projection, viewport) = four_tile_setup();
    let pipeline = MapPipeline::new(
        ScriptedSource::new(scenario_tiles()),
        LAYER,
        PipelineConfig::default(),
    );

    let merged = pipeline.run(&projection, &viewport).await.unwrap();
    let one = merged.iter().find(|f| f.id == "1").unwrap();

    assert!(
        signed_area(&one.geometry) < 0.0,
        "merged geometry must have a clockwise exterior"
    );
}

#[tokio::test]
async fn test_one_failing_tile_aborts_the_run() {
    let (projection, viewport) = four_tile_setup();

    let mut tiles = scenario_tiles();
    tiles.remove(&TileCoord::new(2, 2, 2));

    let pipeline = MapPipeline::new(
        ScriptedSource::new(tiles),
        LAYER,
        PipelineConfig::default(),
    );

    let result = pipeline.run(&projection, &viewport).await;
    match result {
        Err(PipelineError::Fetch(FetchError::HttpStatus { status, .. })) => {
            assert_eq!(status, 500)
        }
        other => panic!("expected propagated fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_skip_failed_policy_renders_surviving_tiles() {
    let (projection, viewport) = four_tile_setup();

    let mut tiles = scenario_tiles();
    tiles.remove(&TileCoord::new(1, 2, 2));

    let config = PipelineConfig {
        fetch_policy: FetchPolicy::SkipFailed,
        ..PipelineConfig::default()
    };
    let pipeline = MapPipeline::new(ScriptedSource::new(tiles), LAYER, config);

    let merged = pipeline.run(&projection, &viewport).await.unwrap();

    // Building "2" lived in the dropped tile; building "1" still merges
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, "1");
    assert_eq!(merged[0].fragment_count, 2);
}

#[tokio::test]
async fn test_distinct_ids_roundtrip_through_pipeline() {
    let (projection, viewport) = four_tile_setup();
    let pipeline = MapPipeline::new(
        ScriptedSource::new(scenario_tiles()),
        LAYER,
        PipelineConfig::default(),
    );

    let merged = pipeline.run(&projection, &viewport).await.unwrap();
    let mut ids: Vec<&str> = merged.iter().map(|f| f.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["1", "2"], "no id lost, no id invented");
}

#[tokio::test]
async fn test_feature_filter_drops_rejected_features() {
    let (projection, viewport) = four_tile_setup();
    let pipeline = MapPipeline::new(
        ScriptedSource::new(scenario_tiles()),
        LAYER,
        PipelineConfig::default(),
    )
    .with_filter(|feature| feature.id != "2");

    let merged = pipeline.run(&projection, &viewport).await.unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, "1");
}

#[tokio::test]
async fn test_run_to_svg_emits_feature_paths() {
    let (projection, viewport) = four_tile_setup();
    let pipeline = MapPipeline::new(
        ScriptedSource::new(scenario_tiles()),
        LAYER,
        PipelineConfig::default(),
    );

    let svg = pipeline.run_to_svg(&projection, &viewport).await.unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"id="1""#));
    assert!(svg.contains(r#"id="2""#));
    assert_eq!(svg.matches("<path").count(), 2);
}
