//! Integration tests for the SVG physics pipeline.
//!
//! These tests drive the full extract → fit → batched spawn → simulate
//! sequence on an in-memory SVG document, covering:
//! - Batch yield determinism (ceil(N/B) batches, input spawn order)
//! - Degenerate shape rejection with batch continuation
//! - Per-tick attraction driving bodies together
//! - Session teardown

use citymesh::physics::{
    apply_attraction, AttractionConfig, BatchSpawner, PhysicsConfig, PhysicsSession,
};
use citymesh::svg::{bounding_box, extract_paths, FitTransform, DEFAULT_GROUP_ID};
use citymesh::viewport::Viewport;

// =============================================================================
// Test Helpers
// =============================================================================

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0)
}

fn session() -> PhysicsSession {
    PhysicsSession::new(&viewport(), &PhysicsConfig::default())
}

/// Builds an SVG document with one square path per entry, left to right.
fn svg_with_squares(count: usize) -> String {
    let mut paths = String::new();
    for i in 0..count {
        let x = 40.0 + i as f64 * 90.0;
        paths.push_str(&format!(
            r#"<path d="M{x},40 L{},40 L{},100 L{x},100 Z"/>"#,
            x + 60.0,
            x + 60.0,
        ));
    }
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="{}">{}</g></svg>"#,
        DEFAULT_GROUP_ID, paths
    )
}

// =============================================================================
// Integration Tests
// =============================================================================

#[tokio::test]
async fn test_batch_yields_are_ceil_of_path_count() {
    let svg = svg_with_squares(8);
    let paths = extract_paths(&svg, DEFAULT_GROUP_ID).unwrap();
    let fit = FitTransform::fit(&bounding_box(&paths).unwrap(), &viewport());

    let mut session = session();
    let report = BatchSpawner::new()
        .with_batch_size(3)
        .spawn_paths(&mut session, &paths, &fit, None)
        .await;

    assert_eq!(report.created, 8);
    assert_eq!(report.batches, 3, "ceil(8 / 3) suspension points");
}

#[tokio::test]
async fn test_bodies_spawn_in_input_order() {
    let svg = svg_with_squares(5);
    let paths = extract_paths(&svg, DEFAULT_GROUP_ID).unwrap();
    let fit = FitTransform::fit(&bounding_box(&paths).unwrap(), &viewport());

    let mut session = session();
    BatchSpawner::new()
        .with_batch_size(2)
        .spawn_paths(&mut session, &paths, &fit, None)
        .await;

    let snapshots = session.snapshot();
    assert_eq!(snapshots.len(), 5);
    for pair in snapshots.windows(2) {
        assert!(
            pair[0].position.0 < pair[1].position.0,
            "spawn order must follow input order"
        );
    }
}

#[tokio::test]
async fn test_degenerate_shape_produces_no_body() {
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="{}">
            <path d="M40,40 L100,40 L100,100 L40,100 Z"/>
            <path d="M200,40 L260,40"/>
            <path d="M300,40 L360,40 L360,100 L300,100 Z"/>
        </g></svg>"#,
        DEFAULT_GROUP_ID
    );
    let paths = extract_paths(&svg, DEFAULT_GROUP_ID).unwrap();
    let fit = FitTransform::identity();

    let mut session = session();
    let report = BatchSpawner::new()
        .spawn_paths(&mut session, &paths, &fit, None)
        .await;

    assert_eq!(report.created, 2, "valid shapes before and after still spawn");
    assert_eq!(report.skipped_degenerate, 1);
    assert_eq!(session.body_count(), 2);
}

#[tokio::test]
async fn test_attraction_contracts_the_swarm() {
    let svg = svg_with_squares(4);
    let paths = extract_paths(&svg, DEFAULT_GROUP_ID).unwrap();
    let fit = FitTransform::identity();

    let mut session = session();
    BatchSpawner::new()
        .spawn_paths(&mut session, &paths, &fit, None)
        .await;

    let config = AttractionConfig {
        force_constant: 20.0,
        attractor_count: 1,
    };

    let before = spread(&session);
    for _ in 0..60 {
        apply_attraction(&mut session, &config);
        session.step();
    }
    let after = spread(&session);

    assert!(
        after < before,
        "attraction should contract the swarm: {} -> {}",
        before,
        after
    );
}

#[tokio::test]
async fn test_clear_tears_the_session_down() {
    let svg = svg_with_squares(3);
    let paths = extract_paths(&svg, DEFAULT_GROUP_ID).unwrap();

    let mut session = session();
    BatchSpawner::new()
        .spawn_paths(&mut session, &paths, &FitTransform::identity(), None)
        .await;
    assert_eq!(session.body_count(), 3);

    session.clear();
    assert_eq!(session.body_count(), 0);
    assert!(session.snapshot().is_empty());
}

/// Mean distance of body centers from their common centroid.
fn spread(session: &PhysicsSession) -> f64 {
    let positions: Vec<(f64, f64)> = session
        .snapshot()
        .iter()
        .map(|body| body.position)
        .collect();
    let n = positions.len() as f64;
    let center = positions
        .iter()
        .fold((0.0, 0.0), |acc, p| (acc.0 + p.0 / n, acc.1 + p.1 / n));
    positions
        .iter()
        .map(|p| ((p.0 - center.0).powi(2) + (p.1 - center.1).powi(2)).sqrt())
        .sum::<f64>()
        / n
}
