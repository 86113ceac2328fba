//! SVG-outline physics sandbox
//!
//! Owns nothing globally: the caller constructs a [`PhysicsSession`],
//! spawns bodies through a [`BatchSpawner`], and drives the loop by calling
//! [`apply_attraction`] and [`PhysicsSession::step`] once per tick.
//!
//! ```ignore
//! use citymesh::physics::{
//!     apply_attraction, AttractionConfig, BatchSpawner, PhysicsConfig, PhysicsSession,
//! };
//!
//! let mut session = PhysicsSession::new(&viewport, &PhysicsConfig::default());
//! let report = BatchSpawner::new()
//!     .spawn_paths(&mut session, &paths, &fit, None)
//!     .await;
//!
//! let attraction = AttractionConfig::default();
//! for _ in 0..600 {
//!     apply_attraction(&mut session, &attraction);
//!     session.step();
//! }
//! ```

mod attraction;
mod error;
mod session;
mod spawn;

pub use attraction::{
    apply_attraction, AttractionConfig, DEFAULT_ATTRACTOR_COUNT, DEFAULT_FORCE_CONSTANT,
};
pub use error::PhysicsError;
pub use session::{
    BodySnapshot, PhysicsConfig, PhysicsSession, BODY_FILL_STYLE, BORDER_THICKNESS,
};
pub use spawn::{BatchSpawner, SpawnReport, DEFAULT_BATCH_SIZE};
