//! `physics` command: spawn SVG outlines into a world and simulate.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use citymesh::config::ConfigFile;
use citymesh::physics::{
    apply_attraction, BatchSpawner, PhysicsSession, BODY_FILL_STYLE,
};
use citymesh::svg::{bounding_box, extract_paths, FitTransform};
use citymesh::viewport::Viewport;

use crate::error::CliError;

#[derive(Args)]
pub struct PhysicsArgs {
    /// Input SVG file
    #[arg(long)]
    input: PathBuf,

    /// SVG group id holding the path outlines (defaults to the config
    /// value)
    #[arg(long)]
    group: Option<String>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Simulation steps to run after spawning
    #[arg(long, default_value_t = 600)]
    steps: u32,

    /// Write an SVG snapshot of final body positions
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

pub async fn run(args: PhysicsArgs, config: &ConfigFile) -> Result<(), CliError> {
    let svg_text = fs::read_to_string(&args.input).map_err(|e| CliError::FileRead {
        path: args.input.display().to_string(),
        error: e,
    })?;

    let group = args.group.as_deref().unwrap_or(&config.physics.group_id);
    let paths = extract_paths(&svg_text, group)?;
    info!(paths = paths.len(), group = group, "loaded SVG paths");

    let viewport = Viewport::new(args.width, args.height, 1.0);
    let bbox = bounding_box(&paths)?;
    let fit = FitTransform::fit(&bbox, &viewport);

    let mut session = PhysicsSession::new(&viewport, &config.physics.to_physics_config());
    let spawner = BatchSpawner::new()
        .with_batch_size(config.physics.batch_size)
        .with_tolerance(config.physics.simplify_tolerance);
    let report = spawner.spawn_paths(&mut session, &paths, &fit, None).await;

    let attraction = config.physics.to_attraction_config();
    for _ in 0..args.steps {
        apply_attraction(&mut session, &attraction);
        session.step();
    }

    println!(
        "Spawned {} bodies in {} batches ({} degenerate skipped, {} failed); ran {} steps",
        report.created, report.batches, report.skipped_degenerate, report.failed, args.steps
    );

    if let Some(path) = &args.snapshot {
        let svg = snapshot_svg(&session, &viewport);
        fs::write(path, svg).map_err(|e| CliError::FileWrite {
            path: path.display().to_string(),
            error: e,
        })?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}

/// Renders final body outlines as filled polygons.
pub(crate) fn snapshot_svg(session: &PhysicsSession, viewport: &Viewport) -> String {
    let mut svg = format!(
        r#"<svg viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
        viewport.width, viewport.height
    );
    for body in session.snapshot() {
        let points = body
            .outline
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            svg,
            r#"<polygon points="{}" fill="{}"/>"#,
            points, BODY_FILL_STYLE
        );
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use citymesh::physics::PhysicsConfig;

    #[test]
    fn test_snapshot_svg_one_polygon_per_body() {
        let viewport = Viewport::new(400.0, 300.0, 1.0);
        let mut session = PhysicsSession::new(&viewport, &PhysicsConfig::default());
        session
            .spawn_body(&[(50.0, 50.0), (90.0, 50.0), (70.0, 90.0)])
            .unwrap();
        session
            .spawn_body(&[(200.0, 50.0), (240.0, 50.0), (220.0, 90.0)])
            .unwrap();

        let svg = snapshot_svg(&session, &viewport);

        assert!(svg.starts_with(r#"<svg viewBox="0 0 400 300""#));
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert!(svg.contains(BODY_FILL_STYLE));
    }

    #[test]
    fn test_snapshot_svg_empty_session() {
        let viewport = Viewport::new(400.0, 300.0, 1.0);
        let session = PhysicsSession::new(&viewport, &PhysicsConfig::default());

        let svg = snapshot_svg(&session, &viewport);
        assert!(!svg.contains("<polygon"));
    }
}
