#![no_main]
use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use alice_physics2d::{PhysicsWorld, PhysicsConfig, RigidBody, Vector2};

#[derive(Debug, Arbitrary)]
struct CollisionInput {
    /// Shape selectors for the two bodies
    kind1: u8,
    kind2: u8,
    /// Two bodies' positions (close together to force collision)
    x1: i8,
    y1: i8,
    x2: i8,
    y2: i8,
    /// Shape extents
    size1: u8,
    size2: u8,
    /// Steps to run
    steps: u8,
}

fn make_body(kind: u8, x: f64, y: f64, size: u8) -> RigidBody {
    let extent = f64::from(size % 40) + 2.0;
    let center = Vector2::new(x, y);
    match kind % 3 {
        0 => RigidBody::circle(center, extent),
        1 => RigidBody::rectangle(center, extent, extent + 4.0),
        _ => RigidBody::capsule(center, extent, extent + 6.0),
    }
}

// Fuzz collision detection by placing bodies close together.
// Must never panic even with fully overlapping bodies.
fuzz_target!(|input: CollisionInput| {
    let Ok(mut world) = PhysicsWorld::new(PhysicsConfig::default()) else {
        return;
    };

    // Place two bodies at potentially overlapping positions near the
    // world center so they interact before pruning removes them.
    world.add_body(make_body(
        input.kind1,
        640.0 + f64::from(input.x1),
        360.0 + f64::from(input.y1),
        input.size1,
    ));
    world.add_body(make_body(
        input.kind2,
        640.0 + f64::from(input.x2),
        360.0 + f64::from(input.y2),
        input.size2,
    ));

    let gravity = Vector2::new(0.0, 980.0);
    let steps = (input.steps as usize).min(64);
    for _ in 0..steps {
        world.step(1.0 / 60.0, gravity, 4);
    }
});
