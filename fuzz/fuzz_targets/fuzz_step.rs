#![no_main]
use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use alice_physics2d::{PhysicsWorld, PhysicsConfig, RigidBody, Vector2};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Number of bodies to add (capped)
    body_count: u8,
    /// Per-body shape selector, position and extent (i16 to keep values reasonable)
    bodies: Vec<(u8, i16, i16, u8)>,
    /// Indices to remove between steps (capped, taken modulo the live count)
    removals: Vec<u8>,
    /// Number of simulation steps (capped)
    step_count: u8,
}

// Fuzz the physics world: add random bodies, step, and remove some.
// Must never panic regardless of input.
fuzz_target!(|input: FuzzInput| {
    let Ok(mut world) = PhysicsWorld::new(PhysicsConfig::default()) else {
        return;
    };

    let body_count = (input.body_count as usize).min(16);
    for i in 0..body_count {
        let (kind, px, py, extent) = input.bodies.get(i).copied().unwrap_or((0, 0, 0, 8));
        let center = Vector2::new(f64::from(px), f64::from(py));
        let size = f64::from(extent % 40) + 2.0;

        let mut body = match kind % 3 {
            0 => RigidBody::circle(center, size),
            1 => RigidBody::rectangle(center, size, size + 4.0),
            _ => RigidBody::capsule(center, size, size + 6.0),
        };
        if kind & 4 != 0 {
            body = body.with_static();
        }
        world.add_body(body);
    }

    let gravity = Vector2::new(0.0, 980.0);
    let steps = (input.step_count as usize).min(32);
    for _ in 0..steps {
        world.step(1.0 / 60.0, gravity, 4);
    }

    // Removal while the simulation is live must stay index-safe.
    for &removal in input.removals.iter().take(8) {
        if world.body_count() == 0 {
            break;
        }
        let _ = world.remove_body(removal as usize % world.body_count());
        world.step(1.0 / 60.0, gravity, 2);
    }
});
