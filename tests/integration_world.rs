//! Integration tests for ALICE-Physics2D
//!
//! These tests verify end-to-end behaviour of the physics core using only the
//! public API re-exported from the crate root. Scenes use screen coordinates
//! (y grows downward) with gravity along +y, matching the interactive demos.

use alice_physics2d::prelude::*;
use approx::assert_relative_eq;

// ============================================================================
// Helpers
// ============================================================================

const DT: f64 = 1.0 / 60.0;
const SUB_STEPS: u32 = 4;
const GRAVITY: Vector2 = Vector2 { x: 0.0, y: 980.0 };

/// Top edge of the standard floor used by most scenes.
const FLOOR_TOP: f64 = 550.0;

/// Run a world for `frames` frames with the standard timestep and gravity.
fn run_world(world: &mut PhysicsWorld, frames: usize) {
    for _ in 0..frames {
        world.step(DT, GRAVITY, SUB_STEPS);
    }
}

/// Default-sized world with a static floor as body 0. The floor is a 600x100
/// slab centred at (640, 600), so its top edge sits at y = 550.
fn world_with_floor() -> PhysicsWorld {
    let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
    world.add_body(RigidBody::rectangle(Vector2::new(640.0, 600.0), 600.0, 100.0).with_static());
    world
}

// ============================================================================
// Test 1 — Free-fall determinism
// ============================================================================

/// A body under gravity must fall, and running the same simulation twice must
/// produce bit-exact identical results.
#[test]
fn test_free_fall_determinism() {
    fn simulate() -> (Vector2, Vector2) {
        let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        world.add_body(RigidBody::circle(Vector2::new(640.0, 100.0), 20.0));
        run_world(&mut world, 60);
        (world.bodies()[0].centroid(), world.bodies()[0].velocity)
    }

    let (pos_a, vel_a) = simulate();
    let (pos_b, vel_b) = simulate();

    // Bit-exact equality, not just "close"
    assert_eq!(pos_a.x.to_bits(), pos_b.x.to_bits(), "x diverged");
    assert_eq!(pos_a.y.to_bits(), pos_b.y.to_bits(), "y diverged");
    assert_eq!(vel_a.y.to_bits(), vel_b.y.to_bits(), "vy diverged");

    // The body must have fallen below its spawn height (y grows downward)
    assert!(pos_a.y > 100.0, "body did not fall: y = {}", pos_a.y);
}

// ============================================================================
// Test 2 — Elastic head-on collision swaps velocities
// ============================================================================

/// Two equal circles approach head-on with restitution 1. After the impact
/// their velocities must be exactly exchanged, with no lateral or angular
/// velocity injected.
#[test]
fn test_elastic_head_on_swap() {
    let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
    let a = world.add_body(
        RigidBody::circle(Vector2::new(600.0, 360.0), 20.0)
            .with_velocity(Vector2::new(50.0, 0.0))
            .with_restitution(1.0),
    );
    let b = world.add_body(
        RigidBody::circle(Vector2::new(680.0, 360.0), 20.0)
            .with_velocity(Vector2::new(-50.0, 0.0))
            .with_restitution(1.0),
    );

    // Zero gravity keeps the collision one-dimensional
    for _ in 0..40 {
        world.step(DT, Vector2::ZERO, SUB_STEPS);
    }

    let va = world.bodies()[a].velocity;
    let vb = world.bodies()[b].velocity;
    assert_relative_eq!(va.x, -50.0, epsilon = 1e-9);
    assert_relative_eq!(vb.x, 50.0, epsilon = 1e-9);
    assert_eq!(va.y, 0.0, "head-on impact must not create vy");
    assert_eq!(world.bodies()[a].angular_velocity, 0.0);
    assert_eq!(world.bodies()[b].angular_velocity, 0.0);

    // And they must now be moving apart
    let gap = world.bodies()[b].centroid().x - world.bodies()[a].centroid().x;
    assert!(gap > 40.0, "bodies still overlapping after bounce: gap = {gap}");
}

// ============================================================================
// Test 3 — Stack of boxes settles
// ============================================================================

/// Two inelastic boxes stacked on the floor stay stacked: after a few seconds
/// both sit at their rest heights with negligible velocity.
#[test]
fn test_stack_of_boxes_settles() {
    let mut world = world_with_floor();
    let lower = world.add_body(
        RigidBody::rectangle(Vector2::new(640.0, 535.0), 30.0, 30.0).with_restitution(0.0),
    );
    let upper = world.add_body(
        RigidBody::rectangle(Vector2::new(640.0, 505.0), 30.0, 30.0).with_restitution(0.0),
    );

    run_world(&mut world, 240);

    let c_lower = world.bodies()[lower].centroid();
    let c_upper = world.bodies()[upper].centroid();
    assert!(
        (c_lower.y - 535.0).abs() < 2.0,
        "lower box drifted: y = {}",
        c_lower.y
    );
    assert!(
        (c_upper.y - 505.0).abs() < 2.5,
        "upper box drifted: y = {}",
        c_upper.y
    );
    assert!((c_lower.x - 640.0).abs() < 1.0);
    assert!((c_upper.x - 640.0).abs() < 1.0);
    assert!(c_upper.y < c_lower.y - 25.0, "stack order inverted");
    assert!(world.bodies()[lower].velocity.length() < 5.0);
    assert!(world.bodies()[upper].velocity.length() < 5.0);
    assert_eq!(world.body_count(), 3);
}

// ============================================================================
// Test 4 — Capsule comes to rest upright
// ============================================================================

/// A vertical capsule dropped onto the floor rests on its lower cap without
/// tipping over or sliding sideways.
#[test]
fn test_capsule_rests_on_floor() {
    let mut world = world_with_floor();
    let capsule = world.add_body(
        RigidBody::capsule(Vector2::new(640.0, 480.0), 20.0, 40.0).with_restitution(0.0),
    );

    run_world(&mut world, 300);

    let body = &world.bodies()[capsule];
    assert!(
        (body.aabb().max.y - FLOOR_TOP).abs() < 1.5,
        "capsule not resting on floor: bottom = {}",
        body.aabb().max.y
    );
    assert!((body.centroid().x - 640.0).abs() < 1.0, "capsule slid sideways");
    assert!(body.angular_velocity.abs() < 0.05, "capsule is spinning");
    assert!(body.velocity.length() < 5.0);
}

// ============================================================================
// Test 5 — Bounce emits Begin then End
// ============================================================================

/// A bouncy ball hitting the floor produces a Begin event on the impact frame
/// and an End event once it leaves again.
#[test]
fn test_bounce_emits_begin_then_end() {
    let mut world = world_with_floor();
    world.add_body(RigidBody::circle(Vector2::new(640.0, 480.0), 20.0));

    let mut sequence = Vec::new();
    for _ in 0..90 {
        world.step(DT, GRAVITY, SUB_STEPS);
        for event in world.drain_contact_events() {
            if event.body_a == 0 && event.body_b == 1 {
                sequence.push(event.event_type);
            }
        }
    }

    assert!(!sequence.is_empty(), "ball never touched the floor");
    assert_eq!(sequence[0], ContactEventType::Begin, "first event must be Begin");
    assert!(
        sequence.contains(&ContactEventType::End),
        "bounce never produced an End event: {sequence:?}"
    );
    assert_eq!(world.body_count(), 2, "ball escaped the world");
}

// ============================================================================
// Test 6 — Resting contact reports Persist every frame
// ============================================================================

/// Once an inelastic ball has settled on the floor, every subsequent frame
/// reports exactly one Persist event for the pair.
#[test]
fn test_resting_contact_reports_persist_every_frame() {
    let mut world = world_with_floor();
    world.add_body(RigidBody::circle(Vector2::new(640.0, 520.0), 20.0).with_restitution(0.0));

    run_world(&mut world, 60);

    for frame in 0..60 {
        world.step(DT, GRAVITY, SUB_STEPS);
        let events = world.contact_events();
        assert!(!events.is_empty(), "no contact reported at frame {frame}");
        for event in events {
            assert_eq!((event.body_a, event.body_b), (0, 1));
            assert_eq!(
                event.event_type,
                ContactEventType::Persist,
                "unexpected {:?} during resting contact",
                event.event_type
            );
        }
    }
}

// ============================================================================
// Test 7 — Runaway body is pruned
// ============================================================================

/// A body flung past the world edge is removed once its AABB no longer
/// overlaps the world rectangle; the floor survives.
#[test]
fn test_runaway_body_is_pruned() {
    let mut world = world_with_floor();
    world.add_body(
        RigidBody::circle(Vector2::new(640.0, 100.0), 20.0)
            .with_velocity(Vector2::new(2000.0, 0.0)),
    );

    let mut pruned_total = 0;
    for _ in 0..60 {
        world.step(DT, GRAVITY, SUB_STEPS);
        pruned_total += world.stats().bodies_pruned;
    }

    assert_eq!(pruned_total, 1, "exactly one body should have been pruned");
    assert_eq!(world.body_count(), 1);
    assert!(world.bodies()[0].is_static, "the floor should survive");
}

// ============================================================================
// Test 8 — Removing a body mid-simulation
// ============================================================================

/// `remove_body` swap-removes: the last body takes the freed slot and the
/// simulation continues without disturbance.
#[test]
fn test_remove_body_mid_simulation() {
    let mut world = world_with_floor();
    let first = world.add_body(
        RigidBody::circle(Vector2::new(500.0, 300.0), 20.0).with_restitution(0.0),
    );
    world.add_body(RigidBody::circle(Vector2::new(800.0, 300.0), 20.0).with_restitution(0.0));

    run_world(&mut world, 30);

    let removed = world.remove_body(first).unwrap();
    assert_eq!(removed.centroid().x, 500.0, "wrong body removed");
    assert_eq!(world.body_count(), 2);

    // The second ball now occupies the freed slot
    assert!((world.bodies()[first].centroid().x - 800.0).abs() < 1.0);

    run_world(&mut world, 90);
    let survivor = &world.bodies()[first];
    assert!(
        (survivor.aabb().max.y - FLOOR_TOP).abs() < 2.0,
        "surviving ball did not settle: bottom = {}",
        survivor.aabb().max.y
    );

    assert!(matches!(
        world.remove_body(5),
        Err(PhysicsError::InvalidBodyIndex { index: 5, count: 2 })
    ));
}

// ============================================================================
// Test 9 — Static floor never moves
// ============================================================================

/// A static body must remain bit-exactly at its initial position no matter
/// what lands on it.
#[test]
fn test_static_floor_never_moves() {
    let mut world = world_with_floor();
    let initial = world.bodies()[0].centroid();
    world.add_body(RigidBody::circle(Vector2::new(640.0, 300.0), 25.0).with_restitution(0.0));

    run_world(&mut world, 180);

    let after = world.bodies()[0].centroid();
    assert_eq!(initial.x.to_bits(), after.x.to_bits(), "floor moved in x");
    assert_eq!(initial.y.to_bits(), after.y.to_bits(), "floor moved in y");
    assert_eq!(world.bodies()[0].velocity, Vector2::ZERO);

    // The ball ended up resting on it
    assert!((world.bodies()[1].aabb().max.y - FLOOR_TOP).abs() < 2.0);
}

// ============================================================================
// Test 10 — Full scene bit-exact replay
// ============================================================================

/// A mixed scene with collisions, friction and rotation must replay
/// bit-exactly: same inputs, same float operations, same results.
#[test]
fn test_full_scene_bit_exact_replay() {
    fn simulate() -> Vec<(u64, u64, u64, u64, u64)> {
        let mut world = world_with_floor();
        world.add_body(
            RigidBody::circle(Vector2::new(540.0, 200.0), 18.0)
                .with_velocity(Vector2::new(30.0, 0.0)),
        );
        world.add_body(RigidBody::rectangle(Vector2::new(700.0, 150.0), 36.0, 24.0));
        world.add_body(RigidBody::capsule(Vector2::new(620.0, 120.0), 16.0, 30.0));

        run_world(&mut world, 180);

        world
            .bodies()
            .iter()
            .map(|body| {
                let c = body.centroid();
                (
                    c.x.to_bits(),
                    c.y.to_bits(),
                    body.velocity.x.to_bits(),
                    body.velocity.y.to_bits(),
                    body.angular_velocity.to_bits(),
                )
            })
            .collect()
    }

    let run_a = simulate();
    let run_b = simulate();
    assert_eq!(run_a.len(), run_b.len(), "body counts diverged");
    assert_eq!(run_a, run_b, "replay diverged");
}
