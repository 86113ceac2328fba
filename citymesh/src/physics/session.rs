//! Physics world session
//!
//! An explicit context object owning the rigid-body world: construction
//! builds the border walls, [`PhysicsSession::step`] advances the
//! simulation one tick, and [`PhysicsSession::clear`] tears the world down.
//! Nothing lives at module scope; callers own the session and the
//! simulation loop.

use rapier2d::prelude::*;
use tracing::debug;

use super::error::PhysicsError;
use crate::viewport::Viewport;

/// Thickness of the static border walls framing the viewport, in pixels.
pub const BORDER_THICKNESS: f64 = 50.0;

/// Fill style carried by spawned bodies for snapshot rendering.
pub const BODY_FILL_STYLE: &str = "black";

/// Session construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Border wall thickness in pixels
    pub border_thickness: f64,
    /// Integration timestep in seconds
    pub dt: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            border_thickness: BORDER_THICKNESS,
            dt: 1.0 / 60.0,
        }
    }
}

/// A body spawned from a path outline.
struct SpawnedBody {
    handle: RigidBodyHandle,
    /// Outline vertices local to the body centroid
    outline: Vec<(f64, f64)>,
}

/// World-space view of one body, for snapshot output.
#[derive(Debug, Clone)]
pub struct BodySnapshot {
    pub position: (f64, f64),
    /// Outline vertices in world space
    pub outline: Vec<(f64, f64)>,
    pub mass: f64,
}

/// A 2D rigid-body world with zero gravity and static border walls.
pub struct PhysicsSession {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    border_handles: Vec<RigidBodyHandle>,
    spawned: Vec<SpawnedBody>,
}

impl PhysicsSession {
    /// Creates a session with border walls framing the viewport.
    pub fn new(viewport: &Viewport, config: &PhysicsConfig) -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = config.dt as Real;

        let mut session = Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![0.0, 0.0],
            params,
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            border_handles: Vec::new(),
            spawned: Vec::new(),
        };
        session.add_borders(viewport, config.border_thickness);
        session
    }

    /// Adds the four static border rectangles: top, bottom, left, right.
    fn add_borders(&mut self, viewport: &Viewport, thickness: f64) {
        let w = viewport.width;
        let h = viewport.height;
        let t = thickness;

        let walls = [
            (w / 2.0, -t / 2.0, w, t),
            (w / 2.0, h + t / 2.0, w, t),
            (-t / 2.0, h / 2.0, t, h),
            (w + t / 2.0, h / 2.0, t, h),
        ];

        for (cx, cy, width, height) in walls {
            let body = RigidBodyBuilder::fixed()
                .translation(vector![cx as Real, cy as Real])
                .build();
            let handle = self.bodies.insert(body);
            let collider =
                ColliderBuilder::cuboid((width / 2.0) as Real, (height / 2.0) as Real).build();
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
            self.border_handles.push(handle);
        }
    }

    /// Spawns a dynamic body from an outline.
    ///
    /// The body is placed at the outline's centroid with the outline
    /// re-expressed in local coordinates; a convex decomposition of the
    /// closed outline forms the collider, so concave shapes keep their
    /// silhouette.
    pub fn spawn_body(&mut self, vertices: &[(f64, f64)]) -> Result<RigidBodyHandle, PhysicsError> {
        if vertices.len() < 3 {
            return Err(PhysicsError::DegenerateOutline {
                vertices: vertices.len(),
            });
        }

        let n = vertices.len() as f64;
        let centroid = vertices
            .iter()
            .fold((0.0, 0.0), |acc, v| (acc.0 + v.0 / n, acc.1 + v.1 / n));

        let local: Vec<(f64, f64)> = vertices
            .iter()
            .map(|v| (v.0 - centroid.0, v.1 - centroid.1))
            .collect();
        let points: Vec<Point<Real>> = local
            .iter()
            .map(|&(x, y)| point![x as Real, y as Real])
            .collect();
        let segments: Vec<[u32; 2]> = (0..points.len() as u32)
            .map(|i| [i, (i + 1) % points.len() as u32])
            .collect();

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![centroid.0 as Real, centroid.1 as Real])
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::convex_decomposition(&points, &segments).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.spawned.push(SpawnedBody {
            handle,
            outline: local,
        });
        debug!(vertices = vertices.len(), "spawned body");
        Ok(handle)
    }

    /// Advances the simulation one tick and clears accumulated forces, so
    /// force application is strictly per-tick.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );

        for body in &self.spawned {
            if let Some(rb) = self.bodies.get_mut(body.handle) {
                rb.reset_forces(false);
            }
        }
    }

    /// Adds a force to a body for the current tick.
    pub fn apply_force(&mut self, handle: RigidBodyHandle, force: (f64, f64)) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.add_force(vector![force.0 as Real, force.1 as Real], true);
        }
    }

    /// Handles, positions, and masses of all spawned (non-border) bodies,
    /// in spawn order.
    pub fn dynamic_bodies(&self) -> Vec<(RigidBodyHandle, (f64, f64), f64)> {
        self.spawned
            .iter()
            .filter_map(|body| {
                self.bodies.get(body.handle).map(|rb| {
                    let t = rb.translation();
                    (body.handle, (t.x as f64, t.y as f64), rb.mass() as f64)
                })
            })
            .collect()
    }

    /// Number of spawned (non-border) bodies.
    pub fn body_count(&self) -> usize {
        self.spawned.len()
    }

    /// Whether the handle belongs to a border wall.
    pub fn is_border(&self, handle: RigidBodyHandle) -> bool {
        self.border_handles.contains(&handle)
    }

    /// Position of a body's center of rotation.
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<(f64, f64)> {
        self.bodies
            .get(handle)
            .map(|rb| (rb.translation().x as f64, rb.translation().y as f64))
    }

    /// World-space snapshots of all spawned bodies, in spawn order.
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.spawned
            .iter()
            .filter_map(|body| {
                self.bodies.get(body.handle).map(|rb| {
                    let position = rb.position();
                    let outline = body
                        .outline
                        .iter()
                        .map(|&(x, y)| {
                            let p = position * point![x as Real, y as Real];
                            (p.x as f64, p.y as f64)
                        })
                        .collect();
                    BodySnapshot {
                        position: (rb.translation().x as f64, rb.translation().y as f64),
                        outline,
                        mass: rb.mass() as f64,
                    }
                })
            })
            .collect()
    }

    /// Tears the world down: every body, collider, and border is removed.
    pub fn clear(&mut self) {
        self.bodies = RigidBodySet::new();
        self.colliders = ColliderSet::new();
        self.islands = IslandManager::new();
        self.broad_phase = BroadPhaseBvh::new();
        self.narrow_phase = NarrowPhase::new();
        self.impulse_joints = ImpulseJointSet::new();
        self.multibody_joints = MultibodyJointSet::new();
        self.ccd_solver = CCDSolver::new();
        self.border_handles.clear();
        self.spawned.clear();
        debug!("physics session cleared");
    }
}
