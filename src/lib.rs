//! # ALICE-Physics2D
//!
//! **Impulse-Based 2D Rigid Body Simulation**
//!
//! A Rust library providing a deterministic 2D physics core: circles,
//! rectangles and capsules with density-derived mass properties, a
//! spatial-hash broad phase, SAT narrow-phase detection and an impulse
//! solver with restitution and Coulomb friction.
//!
//! ## Features
//!
//! | Feature | Description | Cost |
//! |---------|-------------|------|
//! | **Three shape types** | Circle, rectangle, capsule with plate-mass model | O(1) per body |
//! | **Spatial hash grid** | Cell-range broad phase with incremental updates | ~O(n) pairs |
//! | **SAT narrow phase** | Nine shape-pair tests, support-point manifolds | O(1) per pair |
//! | **Impulse solver** | Restitution plus static/dynamic Coulomb friction | O(points) |
//! | **Contact events** | Begin/persist/end lifecycle per body pair | O(pairs) |
//!
//! ## Design Principles
//!
//! - **Deterministic**: fixed iteration order, no hashing by address, identical
//!   runs produce bit-identical trajectories
//! - **Screen coordinates**: `y` grows downward, so gravity is a positive `y` vector
//! - **Half-depth convention**: detection reports half the overlap along the
//!   normal; the pair consumes it split by inverse-mass share
//! - **Index handles**: bodies are addressed by dense indices and swap-removed,
//!   with grid and event bookkeeping retargeted on every move
//!
//! ## Quick Start
//!
//! ```rust
//! use alice_physics2d::prelude::*;
//!
//! let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
//!
//! // a static floor and a falling ball
//! world.add_body(
//!     RigidBody::rectangle(Vector2::new(640.0, 600.0), 600.0, 100.0).with_static(),
//! );
//! let ball = world.add_body(RigidBody::circle(Vector2::new(640.0, 100.0), 20.0));
//!
//! // 60 Hz frames, 4 substeps each
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0, Vector2::new(0.0, 980.0), 4);
//! }
//!
//! assert!(world.body(ball).unwrap().centroid().y > 100.0);
//! ```

pub mod body;
pub mod collision;
pub mod error;
pub mod event;
pub mod math;
pub mod solver;
pub mod spatial;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::body::{
        Aabb, Capsule, Circle, Friction, Rectangle, RigidBody, Shape, ShapeKind,
    };
    pub use crate::collision::{ContactManifold, Detection};
    pub use crate::error::PhysicsError;
    pub use crate::event::{ContactEvent, ContactEventType, EventCollector};
    pub use crate::math::Vector2;
    pub use crate::spatial::{CellRange, SpatialHashGrid};
    pub use crate::world::{PhysicsConfig, PhysicsWorld, StepStats};
}

// Re-export main types at crate root
pub use prelude::*;

// ============================================================================
// Integration Tests
// ============================================================================
