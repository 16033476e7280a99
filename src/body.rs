//! Rigid Bodies and Shape Geometry
//!
//! Three body variants share one kinematic and mass-property core:
//!
//! | Variant   | Geometry                        | Area        | Inertia          |
//! |-----------|---------------------------------|-------------|------------------|
//! | Circle    | center, radius, facing point    | `πr²`       | `½ m r²`         |
//! | Rectangle | 4 world-space corner vertices   | `w·h`       | `m(w²+h²)/12`    |
//! | Capsule   | segment `p1..p2`, radius, 4 mid-section vertices | `πr² + w·h` | `m(w²+h²)/12` |
//!
//! Mass is `density × area × thickness` with per-variant material defaults,
//! fixed at construction. Geometry lives in world space and is mutated in
//! place by `translate`/`rotate`; nothing is recomputed from a local-space
//! template, so per-step transform cost stays O(vertex count).
//!
//! Static bodies keep their mass and inertia fields for inspection but have
//! both inverses pinned to zero, velocities zeroed, and restitution pinned
//! to 1, which lets the solver treat them uniformly.

use core::f64::consts::PI;

use crate::math::Vector2;
use crate::spatial::CellRange;

// Material defaults. Circles are aluminium-like; rectangles and capsules
// share brick-like values.
const DENSITY_CIRCLE: f64 = 2700.0;
const THICKNESS_CIRCLE: f64 = 0.01;
const RESTITUTION_CIRCLE: f64 = 0.9;
const FRICTION_CIRCLE: Friction = Friction {
    static_coefficient: 0.61,
    dynamic_coefficient: 0.47,
};

const DENSITY_BRICK: f64 = 1800.0;
const THICKNESS_BRICK: f64 = 0.02;
const RESTITUTION_BRICK: f64 = 0.3;
const FRICTION_BRICK: Friction = Friction {
    static_coefficient: 0.8,
    dynamic_coefficient: 0.6,
};

// ============================================================================
// Aabb
// ============================================================================

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Smallest corner
    pub min: Vector2,
    /// Largest corner
    pub max: Vector2,
}

impl Aabb {
    /// Create from corners.
    #[inline]
    #[must_use]
    pub const fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    /// Box width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Box height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Closed-interval overlap test (touching boxes intersect).
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

// ============================================================================
// Friction
// ============================================================================

/// Per-body Coulomb friction pair.
///
/// The static coefficient bounds the tangential impulse while a contact
/// sticks; the dynamic coefficient applies once it slides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Friction {
    pub static_coefficient: f64,
    pub dynamic_coefficient: f64,
}

// ============================================================================
// Shape variants
// ============================================================================

/// Circle geometry.
#[derive(Clone, Copy, Debug)]
pub struct Circle {
    /// World-space center
    pub center: Vector2,
    /// Radius
    pub radius: f64,
    /// Reference point on the rim, kept so renderers can derive a facing
    /// angle; carried through every translate/rotate.
    pub p1: Vector2,
}

impl Circle {
    fn new(center: Vector2, radius: f64) -> Self {
        Self {
            center,
            radius,
            p1: Vector2::new(center.x - radius, center.y),
        }
    }

    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Vector2 {
        self.center
    }

    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let extent = Vector2::new(self.radius, self.radius);
        Aabb::new(self.center - extent, self.center + extent)
    }

    fn translate(&mut self, displacement: Vector2, scale: f64) {
        self.center.add_scaled(displacement, scale);
        self.p1.add_scaled(displacement, scale);
    }

    fn rotate(&mut self, angle: f64) {
        self.p1 = self.p1.rotate_about(self.center, angle);
    }
}

/// Rectangle geometry: 4 corner vertices in world space, ordered
/// top-left, top-right, bottom-right, bottom-left at rest.
#[derive(Clone, Copy, Debug)]
pub struct Rectangle {
    pub vertices: [Vector2; 4],
}

impl Rectangle {
    fn new(center: Vector2, width: f64, height: f64) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self {
            vertices: [
                Vector2::new(center.x - hw, center.y - hh),
                Vector2::new(center.x + hw, center.y - hh),
                Vector2::new(center.x + hw, center.y + hh),
                Vector2::new(center.x - hw, center.y + hh),
            ],
        }
    }

    /// Vertex mean.
    #[must_use]
    pub fn centroid(&self) -> Vector2 {
        let sum = self.vertices[0] + self.vertices[1] + self.vertices[2] + self.vertices[3];
        sum * 0.25
    }

    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for vertex in &self.vertices[1..] {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
        }
        Aabb::new(min, max)
    }

    fn translate(&mut self, displacement: Vector2, scale: f64) {
        for vertex in &mut self.vertices {
            vertex.add_scaled(displacement, scale);
        }
    }

    fn rotate(&mut self, angle: f64) {
        let centroid = self.centroid();
        for vertex in &mut self.vertices {
            *vertex = vertex.rotate_about(centroid, angle);
        }
    }
}

/// Capsule geometry: a circle swept along the segment `p1..p2`.
///
/// The 4 `vertices` outline the rectangular mid-section (width `2r` by the
/// segment length) and provide the coarse separating axes; end caps are
/// handled by radius offsets in the projections.
#[derive(Clone, Copy, Debug)]
pub struct Capsule {
    /// First end-center
    pub p1: Vector2,
    /// Second end-center
    pub p2: Vector2,
    /// Cap radius
    pub radius: f64,
    /// Mid-section rectangle corners
    pub vertices: [Vector2; 4],
}

impl Capsule {
    fn new(center: Vector2, width: f64, height: f64) -> Self {
        let radius = width * 0.5;
        let half = height * 0.5;
        let p1 = Vector2::new(center.x, center.y - half);
        let p2 = Vector2::new(center.x, center.y + half);
        Self {
            p1,
            p2,
            radius,
            vertices: [
                Vector2::new(p1.x - radius, p1.y),
                Vector2::new(p1.x + radius, p1.y),
                Vector2::new(p2.x + radius, p2.y),
                Vector2::new(p2.x - radius, p2.y),
            ],
        }
    }

    /// Segment midpoint.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Vector2 {
        (self.p1 + self.p2) * 0.5
    }

    /// Exact box of the swept circle: end-centers padded by the radius.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let min = Vector2::new(
            self.p1.x.min(self.p2.x) - self.radius,
            self.p1.y.min(self.p2.y) - self.radius,
        );
        let max = Vector2::new(
            self.p1.x.max(self.p2.x) + self.radius,
            self.p1.y.max(self.p2.y) + self.radius,
        );
        Aabb::new(min, max)
    }

    fn translate(&mut self, displacement: Vector2, scale: f64) {
        self.p1.add_scaled(displacement, scale);
        self.p2.add_scaled(displacement, scale);
        for vertex in &mut self.vertices {
            vertex.add_scaled(displacement, scale);
        }
    }

    fn rotate(&mut self, angle: f64) {
        let centroid = self.centroid();
        self.p1 = self.p1.rotate_about(centroid, angle);
        self.p2 = self.p2.rotate_about(centroid, angle);
        for vertex in &mut self.vertices {
            *vertex = vertex.rotate_about(centroid, angle);
        }
    }
}

// ============================================================================
// Shape union
// ============================================================================

/// Discriminant for shape-pair dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Capsule,
}

/// Closed union over the three shape variants.
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Capsule(Capsule),
}

impl Shape {
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Capsule(_) => ShapeKind::Capsule,
        }
    }

    #[must_use]
    pub fn centroid(&self) -> Vector2 {
        match self {
            Shape::Circle(c) => c.centroid(),
            Shape::Rectangle(r) => r.centroid(),
            Shape::Capsule(c) => c.centroid(),
        }
    }

    #[must_use]
    pub fn aabb(&self) -> Aabb {
        match self {
            Shape::Circle(c) => c.aabb(),
            Shape::Rectangle(r) => r.aabb(),
            Shape::Capsule(c) => c.aabb(),
        }
    }

    fn translate(&mut self, displacement: Vector2, scale: f64) {
        match self {
            Shape::Circle(c) => c.translate(displacement, scale),
            Shape::Rectangle(r) => r.translate(displacement, scale),
            Shape::Capsule(c) => c.translate(displacement, scale),
        }
    }

    fn rotate(&mut self, angle: f64) {
        match self {
            Shape::Circle(c) => c.rotate(angle),
            Shape::Rectangle(r) => r.rotate(angle),
            Shape::Capsule(c) => c.rotate(angle),
        }
    }
}

// ============================================================================
// RigidBody
// ============================================================================

/// A simulated body: shape geometry plus kinematic and mass state.
///
/// Constructed through [`RigidBody::circle`], [`RigidBody::rectangle`] or
/// [`RigidBody::capsule`], then refined with the `with_*` builders.
/// Preconditions: radius/width/height must be positive and finite; the
/// constructors do not validate them.
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// World-space geometry
    pub shape: Shape,
    /// Linear velocity
    pub velocity: Vector2,
    /// Angular velocity in radians per second
    pub angular_velocity: f64,
    /// Infinite-mass flag; see module docs for the pinning rules
    pub is_static: bool,
    /// Bounciness in `[0, 1]`; pinned to 1 for static bodies
    pub restitution: f64,
    /// Coulomb friction pair
    pub friction: Friction,
    /// Mass derived from density, area and thickness
    pub mass: f64,
    /// `1/mass`, or 0 for static bodies
    pub inverse_mass: f64,
    /// Moment of inertia about the centroid
    pub inertia: f64,
    /// `1/inertia`, or 0 for static bodies
    pub inverse_inertia: f64,
    /// Material density used at construction
    pub density: f64,
    /// Plate thickness used at construction
    pub thickness: f64,
    /// Grid cell range currently occupied; owned by the broad phase
    pub(crate) cell_range: Option<CellRange>,
    /// Last broad-phase query that visited this body
    pub(crate) query_stamp: u64,
}

impl RigidBody {
    fn assemble(
        shape: Shape,
        density: f64,
        thickness: f64,
        area: f64,
        inertia_per_mass: f64,
        restitution: f64,
        friction: Friction,
    ) -> Self {
        let mass = density * area * thickness;
        let inertia = mass * inertia_per_mass;
        Self {
            shape,
            velocity: Vector2::ZERO,
            angular_velocity: 0.0,
            is_static: false,
            restitution,
            friction,
            mass,
            inverse_mass: 1.0 / mass,
            inertia,
            inverse_inertia: 1.0 / inertia,
            density,
            thickness,
            cell_range: None,
            query_stamp: 0,
        }
    }

    /// Dynamic circle centered at `center`.
    #[must_use]
    pub fn circle(center: Vector2, radius: f64) -> Self {
        Self::assemble(
            Shape::Circle(Circle::new(center, radius)),
            DENSITY_CIRCLE,
            THICKNESS_CIRCLE,
            PI * radius * radius,
            0.5 * radius * radius,
            RESTITUTION_CIRCLE,
            FRICTION_CIRCLE,
        )
    }

    /// Dynamic rectangle centered at `center`, axis-aligned at rest.
    #[must_use]
    pub fn rectangle(center: Vector2, width: f64, height: f64) -> Self {
        Self::assemble(
            Shape::Rectangle(Rectangle::new(center, width, height)),
            DENSITY_BRICK,
            THICKNESS_BRICK,
            width * height,
            (width * width + height * height) / 12.0,
            RESTITUTION_BRICK,
            FRICTION_BRICK,
        )
    }

    /// Dynamic capsule centered at `center`; `width` is the cap diameter,
    /// `height` the segment length, so the overall extent is
    /// `height + width` tip to tip.
    #[must_use]
    pub fn capsule(center: Vector2, width: f64, height: f64) -> Self {
        let radius = width * 0.5;
        Self::assemble(
            Shape::Capsule(Capsule::new(center, width, height)),
            DENSITY_BRICK,
            THICKNESS_BRICK,
            PI * radius * radius + width * height,
            (width * width + height * height) / 12.0,
            RESTITUTION_BRICK,
            FRICTION_BRICK,
        )
    }

    /// Make the body static: zero inverse mass and inertia, zero
    /// velocities, restitution pinned to 1. Overrides any velocity or
    /// restitution set earlier, and later `with_*` calls cannot undo it.
    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self.inverse_mass = 0.0;
        self.inverse_inertia = 0.0;
        self.velocity = Vector2::ZERO;
        self.angular_velocity = 0.0;
        self.restitution = 1.0;
        self
    }

    /// Initial linear velocity. Ignored for static bodies.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        if !self.is_static {
            self.velocity = velocity;
        }
        self
    }

    /// Restitution override in `[0, 1]`. Ignored for static bodies.
    #[must_use]
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        if !self.is_static {
            self.restitution = restitution;
        }
        self
    }

    /// Shape discriminant, used for pair dispatch.
    #[inline]
    #[must_use]
    pub fn shape_kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Derived center: identity for circles, vertex mean for rectangles,
    /// segment midpoint for capsules.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Vector2 {
        self.shape.centroid()
    }

    /// World-space bounding box.
    #[inline]
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        self.shape.aabb()
    }

    /// Translate all geometry points by `displacement * scale`.
    #[inline]
    pub fn translate(&mut self, displacement: Vector2, scale: f64) {
        self.shape.translate(displacement, scale);
    }

    /// Rotate all geometry points about the centroid by `angle` radians.
    #[inline]
    pub fn rotate(&mut self, angle: f64) {
        self.shape.rotate(angle);
    }

    /// Apply an impulse at lever arm `r` (from the centroid to the
    /// application point). No-op for static bodies via the zero inverses.
    #[inline]
    pub fn apply_impulse_at(&mut self, impulse: Vector2, r: Vector2) {
        self.velocity.add_scaled(impulse, self.inverse_mass);
        self.angular_velocity += r.cross(impulse) * self.inverse_inertia;
    }
}

// ============================================================================
// Tests
// ============================================================================
