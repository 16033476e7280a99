//! Impulse-Based Contact Resolution
//!
//! Two-stage response for a colliding pair: a positional correction that
//! pushes the bodies out of overlap along the contact normal, then a
//! velocity solve that applies restitution and Coulomb friction impulses
//! at each contact point.
//!
//! # Conventions
//!
//! - The normal points from body `a` toward body `b`; `a` is pushed
//!   against it, `b` along it.
//! - `depth` is the half-overlap reported by detection and is consumed in
//!   full here, split by inverse-mass share.
//! - Contact points are solved sequentially; each point sees the
//!   velocities left by the previous one, with the impulse magnitude
//!   divided by the point count.
//!
//! Restitution combines as the pair minimum, friction coefficients as the
//! pair average. Static partners have zero inverse mass and inertia, so
//! they absorb no correction and no impulse.
//!
//! Author: Moroya Sakamoto

use crate::body::RigidBody;
use crate::collision::ContactManifold;
use crate::math::Vector2;

// Tangential speeds below this (squared) are noise, not sliding.
const TANGENT_EPSILON_SQ: f64 = 1e-12;

/// Push `a` and `b` out of overlap along `normal`, splitting the total
/// displacement `depth` by inverse-mass share. Immovable pairs are left
/// untouched.
pub fn separate_bodies(bodies: &mut [RigidBody], a: usize, b: usize, normal: Vector2, depth: f64) {
    let total_inverse = bodies[a].inverse_mass + bodies[b].inverse_mass;
    if total_inverse == 0.0 {
        return;
    }
    let share_a = bodies[a].inverse_mass / total_inverse;
    let share_b = bodies[b].inverse_mass / total_inverse;
    bodies[a].translate(normal, -depth * share_a);
    bodies[b].translate(normal, depth * share_b);
}

// Point velocity of a rotating body: v + w x r.
#[inline]
fn velocity_at(body: &RigidBody, r: Vector2) -> Vector2 {
    body.velocity + r.perpendicular() * body.angular_velocity
}

/// Apply restitution and friction impulses for a colliding pair at each
/// manifold point. Call after [`separate_bodies`] with the same normal.
pub fn resolve_collision(
    bodies: &mut [RigidBody],
    a: usize,
    b: usize,
    normal: Vector2,
    manifold: &ContactManifold,
) {
    if manifold.is_empty() {
        return;
    }
    let count = manifold.len() as f64;
    let restitution = bodies[a].restitution.min(bodies[b].restitution);
    let static_friction = (bodies[a].friction.static_coefficient
        + bodies[b].friction.static_coefficient)
        * 0.5;
    let dynamic_friction = (bodies[a].friction.dynamic_coefficient
        + bodies[b].friction.dynamic_coefficient)
        * 0.5;
    let centroid_a = bodies[a].centroid();
    let centroid_b = bodies[b].centroid();

    for &point in manifold.as_slice() {
        let ra = point - centroid_a;
        let rb = point - centroid_b;

        let relative = velocity_at(&bodies[b], rb) - velocity_at(&bodies[a], ra);
        let normal_speed = relative.dot(normal);
        // already separating at this point
        if normal_speed > 0.0 {
            continue;
        }

        let denominator = bodies[a].inverse_mass
            + bodies[b].inverse_mass
            + ra.cross(normal) * ra.cross(normal) * bodies[a].inverse_inertia
            + rb.cross(normal) * rb.cross(normal) * bodies[b].inverse_inertia;
        // immovable pair
        if denominator == 0.0 {
            continue;
        }

        let impulse_magnitude = -(1.0 + restitution) * normal_speed / denominator / count;
        let impulse = normal * impulse_magnitude;
        bodies[a].apply_impulse_at(-impulse, ra);
        bodies[b].apply_impulse_at(impulse, rb);

        // friction acts on the post-impulse velocities
        let relative = velocity_at(&bodies[b], rb) - velocity_at(&bodies[a], ra);
        let tangent_raw = relative - normal * relative.dot(normal);
        if tangent_raw.length_squared() < TANGENT_EPSILON_SQ {
            continue;
        }
        let tangent = tangent_raw.normalize();

        let tangent_denominator = bodies[a].inverse_mass
            + bodies[b].inverse_mass
            + ra.cross(tangent) * ra.cross(tangent) * bodies[a].inverse_inertia
            + rb.cross(tangent) * rb.cross(tangent) * bodies[b].inverse_inertia;
        let tangential_magnitude = -relative.dot(tangent) / tangent_denominator / count;

        // Coulomb clamp: stick below the static cone, slide at the
        // dynamic coefficient beyond it
        let friction_impulse = if tangential_magnitude.abs() <= impulse_magnitude * static_friction
        {
            tangent * tangential_magnitude
        } else {
            tangent * (-impulse_magnitude * dynamic_friction)
        };
        bodies[a].apply_impulse_at(-friction_impulse, ra);
        bodies[b].apply_impulse_at(friction_impulse, rb);
    }
}

// ============================================================================
// Tests
// ============================================================================
