//! Tile payload retrieval
//!
//! The [`TileSource`] trait abstracts where tile bytes come from, following
//! the same dependency-inversion seam as the HTTP client: production code
//! uses [`BuildingTilesProvider`] over [`AsyncReqwestClient`], tests inject
//! mocks at either level.

mod building_tiles;
mod http;
mod types;

pub use building_tiles::{
    BuildingTilesProvider, DEFAULT_PROPERTIES, EUBUCCO_BASE_URL, EUBUCCO_BUILDINGS_LAYER,
};
pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use types::{FetchError, TileSource};
