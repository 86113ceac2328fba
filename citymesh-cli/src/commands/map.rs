//! `map` command: fetch, merge, and render building tiles.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use citymesh::config::ConfigFile;
use citymesh::pipeline::MapPipeline;
use citymesh::projection::Projection;
use citymesh::provider::{AsyncReqwestClient, BuildingTilesProvider};
use citymesh::render::{svg_document, triangulate, DeviceTransform};
use citymesh::viewport::Viewport;

use crate::error::CliError;

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// SVG document with one path per merged feature
    Svg,
    /// Triangle listing, one `x0 y0 x1 y1 x2 y2` line per triangle
    Mesh,
}

#[derive(Args)]
pub struct MapArgs {
    /// Center longitude in decimal degrees
    #[arg(long, default_value_t = 16.3731)]
    lon: f64,

    /// Center latitude in decimal degrees
    #[arg(long, default_value_t = 48.2083)]
    lat: f64,

    /// Zoom level
    #[arg(long, default_value_t = 18)]
    zoom: u8,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f64,

    /// Output file path
    #[arg(long)]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "svg")]
    format: OutputFormat,
}

pub async fn run(args: MapArgs, config: &ConfigFile) -> Result<(), CliError> {
    let viewport = Viewport::new(args.width, args.height, args.pixel_ratio);
    let projection = Projection::for_zoom(args.lon, args.lat, args.zoom, &viewport);

    let client = AsyncReqwestClient::with_timeout(config.provider.request_timeout_secs)
        .map_err(CliError::Provider)?;
    let provider = BuildingTilesProvider::new(
        client,
        config.provider.base_url.as_str(),
        config.provider.layer.as_str(),
    )
    .with_properties(config.provider.properties.clone());

    let pipeline = MapPipeline::new(
        provider,
        config.provider.layer.as_str(),
        config.pipeline.to_pipeline_config(),
    );
    let merged = pipeline.run(&projection, &viewport).await?;
    info!(features = merged.len(), "pipeline finished");

    let output = match args.format {
        OutputFormat::Svg => svg_document(&merged, &projection, &viewport),
        OutputFormat::Mesh => {
            let transform = DeviceTransform::from_projection(&projection, &viewport);
            let mut listing = String::new();
            for feature in &merged {
                let mesh = triangulate(&feature.geometry, &transform)
                    .map_err(citymesh::pipeline::PipelineError::Geometry)?;
                for triangle in mesh.triangles() {
                    let _ = writeln!(
                        listing,
                        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                        triangle[0][0],
                        triangle[0][1],
                        triangle[1][0],
                        triangle[1][1],
                        triangle[2][0],
                        triangle[2][1]
                    );
                }
            }
            listing
        }
    };

    fs::write(&args.output, output).map_err(|e| CliError::FileWrite {
        path: args.output.display().to_string(),
        error: e,
    })?;

    println!(
        "Wrote {} merged features to {}",
        merged.len(),
        args.output.display()
    );
    Ok(())
}
