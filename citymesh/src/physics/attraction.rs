//! Gravitational attraction between bodies
//!
//! An explicit per-tick update invoked by the owner of the simulation loop,
//! rather than a listener hidden on an event bus: the heaviest few bodies
//! pull every other body toward themselves with an inverse-square force
//! law. Border walls never attract or get attracted.

use std::cmp::Ordering;

use super::session::PhysicsSession;

/// Force constant of the attraction law.
pub const DEFAULT_FORCE_CONSTANT: f64 = 0.000_001;

/// How many of the heaviest bodies act as attractors.
pub const DEFAULT_ATTRACTOR_COUNT: usize = 5;

/// Attraction law parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractionConfig {
    /// Multiplier applied to `mass / distance²`
    pub force_constant: f64,
    /// Number of heaviest bodies that attract the rest
    pub attractor_count: usize,
}

impl Default for AttractionConfig {
    fn default() -> Self {
        Self {
            force_constant: DEFAULT_FORCE_CONSTANT,
            attractor_count: DEFAULT_ATTRACTOR_COUNT,
        }
    }
}

/// Applies one tick of attraction forces to the session's bodies.
///
/// The `attractor_count` heaviest bodies each pull every other body with a
/// force of magnitude `force_constant * attractor_mass / distance²`,
/// scaled along the raw separation vector. Call once per simulation tick
/// before [`PhysicsSession::step`].
pub fn apply_attraction(session: &mut PhysicsSession, config: &AttractionConfig) {
    let bodies = session.dynamic_bodies();
    if bodies.len() < 2 {
        return;
    }

    let mut ranked = bodies.clone();
    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));
    let attractors: Vec<_> = ranked.into_iter().take(config.attractor_count).collect();

    for (a_handle, a_pos, a_mass) in &attractors {
        for (b_handle, b_pos, _) in &bodies {
            if a_handle == b_handle {
                continue;
            }
            let dx = a_pos.0 - b_pos.0;
            let dy = a_pos.1 - b_pos.1;
            let distance_sq = dx * dx + dy * dy;
            if distance_sq == 0.0 {
                continue;
            }
            let magnitude = config.force_constant * a_mass / distance_sq;
            session.apply_force(*b_handle, (dx * magnitude, dy * magnitude));
        }
    }
}
