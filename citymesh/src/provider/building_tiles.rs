//! Building-footprint vector-tile source.
//!
//! Fetches protobuf vector tiles from a parameterized tile server.
//!
//! # URL Pattern
//!
//! `{base}/{layer}/{z}/{x}/{y}.pbf?properties={csv}`
//!
//! - Uses standard XYZ tile coordinates
//! - The `properties` query parameter narrows each feature to the declared
//!   property subset, bounding payload cost
//!
//! The default configuration targets the EUBUCCO building database, whose
//! buildings layer carries a stable per-building `id` property that is the
//! merge key for fragments split across tile boundaries.

use tracing::trace;

use super::http::AsyncHttpClient;
use super::types::{FetchError, TileSource};
use crate::coord::TileCoord;

/// Base URL for the EUBUCCO public tile server.
pub const EUBUCCO_BASE_URL: &str = "https://tiles.eubucco.com";

/// Buildings layer name on the EUBUCCO tile server.
pub const EUBUCCO_BUILDINGS_LAYER: &str = "public.data_building";

/// Property subset requested for each building feature.
pub const DEFAULT_PROPERTIES: [&str; 6] =
    ["id", "id_source", "type", "type_source", "height", "age"];

/// Vector-tile source for a building tile server.
///
/// # Example
///
/// ```ignore
/// use citymesh::provider::{AsyncReqwestClient, BuildingTilesProvider};
///
/// let client = AsyncReqwestClient::new()?;
/// let provider = BuildingTilesProvider::eubucco(client);
/// ```
pub struct BuildingTilesProvider<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
    layer: String,
    properties: Vec<String>,
}

impl<C: AsyncHttpClient> BuildingTilesProvider<C> {
    /// Creates a provider for an arbitrary tile server and layer, with the
    /// default property subset.
    pub fn new(http_client: C, base_url: impl Into<String>, layer: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            layer: layer.into(),
            properties: DEFAULT_PROPERTIES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Creates a provider pointed at the EUBUCCO public tile server.
    pub fn eubucco(http_client: C) -> Self {
        Self::new(http_client, EUBUCCO_BASE_URL, EUBUCCO_BUILDINGS_LAYER)
    }

    /// Replaces the requested property subset.
    pub fn with_properties(mut self, properties: impl IntoIterator<Item = String>) -> Self {
        self.properties = properties.into_iter().collect();
        self
    }

    /// The layer this provider serves; also the layer name inside the
    /// decoded tile.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Builds the tile URL for the given coordinate.
    fn build_url(&self, coord: &TileCoord) -> String {
        format!(
            "{}/{}/{}/{}/{}.pbf?properties={}",
            self.base_url,
            self.layer,
            coord.z,
            coord.x,
            coord.y,
            self.properties.join(",")
        )
    }
}

impl<C: AsyncHttpClient> TileSource for BuildingTilesProvider<C> {
    async fn fetch_tile(&self, coord: TileCoord) -> Result<Vec<u8>, FetchError> {
        let url = self.build_url(&coord);
        trace!(tile = %coord, url = %url, "fetching tile");
        self.http_client.get(&url).await
    }

    fn name(&self) -> &str {
        "building-tiles"
    }
}
