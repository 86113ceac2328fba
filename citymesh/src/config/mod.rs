//! Application configuration
//!
//! INI-format configuration with one section per concern. Every key is
//! optional; absent keys take the library defaults, so an empty file is a
//! valid configuration.
//!
//! ```ini
//! [provider]
//! base_url = https://tiles.eubucco.com
//! layer = public.data_building
//! properties = id,id_source,type,type_source,height,age
//!
//! [pipeline]
//! fetch_policy = fail-fast
//! winding = clockwise
//! rewind_after_union = true
//!
//! [physics]
//! batch_size = 50
//! attractor_count = 5
//! ```

mod parser;
mod settings;

pub use parser::{load_config, parse_config, ConfigError};
pub use settings::{ConfigFile, PhysicsSettings, PipelineSettings, ProviderSettings};
