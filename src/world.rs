//! Physics World and Fixed-Substep Simulation
//!
//! Owns the body list, the broad-phase grid, the event collector and the
//! per-step counters, and drives the pipeline:
//!
//! 1. integrate gravity and velocities (per body, per substep)
//! 2. refresh the body's grid cells and query candidate neighbors
//! 3. narrow-phase detect, positional separation, impulse resolution
//! 4. after all substeps: emit end-of-contact events, prune bodies that
//!    left the world rectangle
//!
//! Coordinates are screen-style: `x` grows right, `y` grows down, so
//! gravity is a positive `y` vector. The world rectangle spans `(0, 0)`
//! to `(width, height)`.
//!
//! Pairs are solved once per substep in body-index order, each side
//! seeing the poses current at that moment. Bodies are removed by
//! swap-remove; indices of later bodies shift, and the grid and event
//! bookkeeping are retargeted to match.
//!
//! Author: Moroya Sakamoto

use log::{debug, trace};

use crate::body::{Aabb, RigidBody};
use crate::collision;
use crate::error::PhysicsError;
use crate::event::{ContactEvent, EventCollector};
use crate::math::Vector2;
use crate::solver;
use crate::spatial::SpatialHashGrid;

// ============================================================================
// Configuration
// ============================================================================

/// World construction parameters.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// World width in units
    pub width: f64,
    /// World height in units
    pub height: f64,
    /// Broad-phase cell size
    pub cell_size: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            cell_size: 80.0,
        }
    }
}

impl PhysicsConfig {
    fn validate(&self) -> Result<(), PhysicsError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "width must be positive and finite",
            });
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "height must be positive and finite",
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "cell_size must be positive and finite",
            });
        }
        Ok(())
    }
}

// ============================================================================
// Step statistics
// ============================================================================

/// Counters for the most recent `step()`, reset at its start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Substeps run
    pub substeps: u32,
    /// Candidate pairs produced by the broad phase
    pub broadphase_pairs: u32,
    /// Narrow-phase tests performed
    pub narrowphase_tests: u32,
    /// Contacts that went through the resolver
    pub contacts_resolved: u32,
    /// Bodies dropped by out-of-bounds pruning
    pub bodies_pruned: u32,
    /// Dynamic bodies alive after the step
    pub active_bodies: u32,
    /// Static bodies alive after the step
    pub static_bodies: u32,
}

// ============================================================================
// PhysicsWorld
// ============================================================================

/// Simulation container: bodies, broad phase, events and statistics.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: Vec<RigidBody>,
    grid: SpatialHashGrid,
    events: EventCollector,
    stats: StepStats,
    neighbor_scratch: Vec<usize>,
}

impl PhysicsWorld {
    /// Create an empty world over the configured rectangle.
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        let grid = SpatialHashGrid::new(config.width, config.height, config.cell_size);
        debug!(
            "physics world ready: {}x{} units, {} grid cells",
            config.width,
            config.height,
            grid.cell_count()
        );
        Ok(Self {
            config,
            bodies: Vec::new(),
            grid,
            events: EventCollector::new(),
            stats: StepStats::default(),
            neighbor_scratch: Vec::new(),
        })
    }

    /// Construction parameters.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Add a body and register it with the broad phase. Returns the body
    /// index; indices stay stable until a removal swaps the last body in.
    pub fn add_body(&mut self, body: RigidBody) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        self.grid.insert(&mut self.bodies[index], index);
        debug!("body {} added at {:?}", index, self.bodies[index].centroid());
        index
    }

    /// Remove a body by index. The last body is swapped into the freed
    /// slot; the grid and contact-pair bookkeeping follow the move.
    pub fn remove_body(&mut self, index: usize) -> Result<RigidBody, PhysicsError> {
        if index >= self.bodies.len() {
            return Err(PhysicsError::InvalidBodyIndex {
                index,
                count: self.bodies.len(),
            });
        }
        debug!("body {index} removed");
        Ok(self.remove_body_at(index))
    }

    fn remove_body_at(&mut self, index: usize) -> RigidBody {
        self.grid.remove(&mut self.bodies[index], index);
        let removed = self.bodies.swap_remove(index);
        self.events.forget_body(index);
        let old_last = self.bodies.len();
        if index < old_last {
            self.grid.reindex(&self.bodies[index], old_last, index);
            self.events.remap_body(old_last, index);
        }
        removed
    }

    /// Body by index.
    pub fn body(&self, index: usize) -> Result<&RigidBody, PhysicsError> {
        self.bodies.get(index).ok_or(PhysicsError::InvalidBodyIndex {
            index,
            count: self.bodies.len(),
        })
    }

    /// Mutable body by index. Geometry moved through this handle is
    /// re-indexed by the broad phase on the next step.
    pub fn body_mut(&mut self, index: usize) -> Result<&mut RigidBody, PhysicsError> {
        let count = self.bodies.len();
        self.bodies
            .get_mut(index)
            .ok_or(PhysicsError::InvalidBodyIndex { index, count })
    }

    /// All bodies, indexable by the handles returned from [`add_body`].
    ///
    /// [`add_body`]: PhysicsWorld::add_body
    #[inline]
    #[must_use]
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Number of live bodies.
    #[inline]
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Counters from the most recent step.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> StepStats {
        self.stats
    }

    /// Contact events from the most recent step. Body indices are the
    /// slots at emission time; a prune at the end of the same step may
    /// have shifted later slots.
    #[inline]
    #[must_use]
    pub fn contact_events(&self) -> &[ContactEvent] {
        self.events.contact_events()
    }

    /// Take the contact events, leaving the collector empty.
    pub fn drain_contact_events(&mut self) -> Vec<ContactEvent> {
        self.events.drain_contact_events()
    }

    /// Advance the simulation by `dt` seconds split into `sub_steps`
    /// equal substeps. A zero substep count or a non-positive or
    /// non-finite `dt` leaves the world completely untouched.
    pub fn step(&mut self, dt: f64, gravity: Vector2, sub_steps: u32) {
        if sub_steps == 0 || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.stats = StepStats::default();
        self.events.begin_frame();

        let sub_dt = dt / f64::from(sub_steps);
        for _ in 0..sub_steps {
            self.substep(sub_dt, gravity);
        }
        self.stats.substeps = sub_steps;

        self.events.end_frame();
        self.prune_out_of_bounds();

        for body in &self.bodies {
            if body.is_static {
                self.stats.static_bodies += 1;
            } else {
                self.stats.active_bodies += 1;
            }
        }
        trace!(
            "step dt={} bodies={} contacts={} pruned={}",
            dt,
            self.bodies.len(),
            self.stats.contacts_resolved,
            self.stats.bodies_pruned
        );
    }

    fn substep(&mut self, dt: f64, gravity: Vector2) {
        let count = self.bodies.len();
        for i in 0..count {
            {
                let body = &mut self.bodies[i];
                if !body.is_static {
                    body.velocity.add_scaled(gravity, dt);
                    let velocity = body.velocity;
                    body.translate(velocity, dt);
                    let spin = body.angular_velocity * dt;
                    body.rotate(spin);
                }
            }
            self.grid.update(&mut self.bodies[i], i);

            let mut scratch = core::mem::take(&mut self.neighbor_scratch);
            self.grid.query_nearby(&mut self.bodies, i, &mut scratch);
            for &j in &scratch {
                // lower-indexed neighbors already handled this pair
                if j <= i {
                    continue;
                }
                self.stats.broadphase_pairs += 1;
                // Skip static-static pairs
                if self.bodies[i].is_static && self.bodies[j].is_static {
                    continue;
                }
                self.stats.narrowphase_tests += 1;

                let detection = collision::detect(&self.bodies[i], &self.bodies[j]);
                if !detection.collision {
                    continue;
                }
                let manifold =
                    collision::contact_points(&self.bodies[i], &self.bodies[j], detection.normal);
                let relative_velocity =
                    (self.bodies[j].velocity - self.bodies[i].velocity).dot(detection.normal);

                solver::separate_bodies(&mut self.bodies, i, j, detection.normal, detection.depth);
                solver::resolve_collision(&mut self.bodies, i, j, detection.normal, &manifold);

                let point = manifold.as_slice().first().copied().unwrap_or(Vector2::ZERO);
                self.events.report_contact(
                    i,
                    j,
                    detection.normal,
                    point,
                    detection.depth,
                    relative_velocity,
                );
                self.stats.contacts_resolved += 1;
            }
            self.neighbor_scratch = scratch;
        }
    }

    /// Drop every body whose AABB no longer touches the world rectangle.
    fn prune_out_of_bounds(&mut self) {
        let world_rect = Aabb::new(
            Vector2::ZERO,
            Vector2::new(self.config.width, self.config.height),
        );
        let mut index = 0;
        while index < self.bodies.len() {
            if self.bodies[index].aabb().intersects(&world_rect) {
                index += 1;
            } else {
                let removed = self.remove_body_at(index);
                self.stats.bodies_pruned += 1;
                debug!("pruned out-of-bounds body at {:?}", removed.centroid());
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
