//! Bouncing Bodies Example
//!
//! Demonstrates creating a 2D physics world, adding mixed rigid bodies,
//! and stepping the simulation. Coordinates are screen-style: y grows
//! downward and gravity points along +y.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example bouncing_bodies
//! ```

use alice_physics2d::prelude::*;

fn main() {
    env_logger::init();

    let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();

    // Static geometry: a floor slab and two walls to keep bodies inside
    world.add_body(RigidBody::rectangle(Vector2::new(640.0, 600.0), 600.0, 100.0).with_static());
    world.add_body(RigidBody::rectangle(Vector2::new(330.0, 400.0), 20.0, 400.0).with_static());
    world.add_body(RigidBody::rectangle(Vector2::new(950.0, 400.0), 20.0, 400.0).with_static());

    // Dynamic bodies: a bouncy ball, a dead ball, a box and a capsule
    let ball = world.add_body(RigidBody::circle(Vector2::new(500.0, 120.0), 22.0));
    let dead_ball =
        world.add_body(RigidBody::circle(Vector2::new(640.0, 80.0), 18.0).with_restitution(0.0));
    let brick = world.add_body(RigidBody::rectangle(Vector2::new(760.0, 140.0), 40.0, 28.0));
    let capsule = world.add_body(
        RigidBody::capsule(Vector2::new(580.0, 200.0), 18.0, 36.0)
            .with_velocity(Vector2::new(120.0, 0.0)),
    );

    println!("ALICE-Physics2D Bouncing Bodies");
    println!("===============================");
    println!("Bodies: {}", world.body_count());
    println!();

    // Simulate 4 seconds at 60 FPS with 4 substeps per frame
    let gravity = Vector2::new(0.0, 980.0);
    let mut contact_begins = 0usize;

    for frame in 0..240 {
        world.step(1.0 / 60.0, gravity, 4);
        contact_begins += world
            .contact_events()
            .iter()
            .filter(|event| event.event_type == ContactEventType::Begin)
            .count();

        if frame % 30 == 0 {
            let ball_pos = world.bodies()[ball].centroid();
            let dead_pos = world.bodies()[dead_ball].centroid();
            let brick_pos = world.bodies()[brick].centroid();
            let capsule_pos = world.bodies()[capsule].centroid();
            println!(
                "Frame {:3}: ball ({:6.1}, {:6.1})  dead ({:6.1}, {:6.1})  brick ({:6.1}, {:6.1})  capsule ({:6.1}, {:6.1})",
                frame,
                ball_pos.x, ball_pos.y,
                dead_pos.x, dead_pos.y,
                brick_pos.x, brick_pos.y,
                capsule_pos.x, capsule_pos.y,
            );
        }
    }

    let stats = world.stats();
    println!();
    println!("Simulation complete (240 frames, 4 seconds).");
    println!(
        "Final frame: {} active / {} static bodies, {} contacts resolved, {} substeps",
        stats.active_bodies, stats.static_bodies, stats.contacts_resolved, stats.substeps
    );
    println!("Contacts begun over the run: {contact_begins}");
}
