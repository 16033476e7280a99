//! Narrow-Phase Collision Detection
//!
//! Separating-axis tests and contact extraction for every ordered pair of
//! the three shape variants. Circle pairs short-circuit through distance
//! checks; everything else runs SAT over a per-pair axis set. Capsules
//! project as swept circles (segment endpoints padded by the radius), so
//! their round caps are exact under SAT without cap vertices.
//!
//! # Conventions
//!
//! - Detection normals are unit length and point from the first argument
//!   toward the second.
//! - Reported depth is half the minimum overlap; each body is expected to
//!   move by its inverse-mass share of it.
//! - Touching counts as colliding (depth 0) for SAT pairs, while the
//!   distance-based circle tests require strict overlap.
//!
//! Contact extraction is independent of detection: support points are the
//! closest feature pairs between the outlines, merged within
//! [`CONTACT_MERGE_TOLERANCE`] and capped at two points.
//!
//! Author: Moroya Sakamoto

use crate::body::{Capsule, Circle, Rectangle, RigidBody, Shape};
use crate::math::Vector2;

/// Squared-distance window within which two candidate support points are
/// treated as the same contact feature.
pub const CONTACT_MERGE_TOLERANCE: f64 = 5e-4;

// ============================================================================
// Results
// ============================================================================

/// Outcome of a narrow-phase test.
#[derive(Clone, Copy, Debug)]
pub struct Detection {
    /// Whether the pair overlaps
    pub collision: bool,
    /// Unit normal from the first shape toward the second; `ZERO` when
    /// there is no collision
    pub normal: Vector2,
    /// Half the minimum overlap along `normal`
    pub depth: f64,
}

impl Detection {
    /// The no-collision result.
    pub const NONE: Detection = Detection {
        collision: false,
        normal: Vector2::ZERO,
        depth: 0.0,
    };

    #[inline]
    fn hit(normal: Vector2, depth: f64) -> Self {
        Self {
            collision: true,
            normal,
            depth,
        }
    }
}

/// Up to two world-space contact points for a colliding pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContactManifold {
    points: [Vector2; 2],
    len: usize,
}

impl ContactManifold {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: [Vector2::ZERO; 2],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, point: Vector2) {
        if self.len < 2 {
            self.points[self.len] = point;
            self.len += 1;
        }
    }

    /// Number of contact points (0 to 2).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid points.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Vector2] {
        &self.points[..self.len]
    }
}

// ============================================================================
// Projection helpers
// ============================================================================

fn project_vertices(vertices: &[Vector2], axis: Vector2) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for vertex in vertices {
        let d = vertex.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

fn project_circle(center: Vector2, radius: f64, axis: Vector2) -> (f64, f64) {
    let d = center.dot(axis);
    (d - radius, d + radius)
}

// Swept-circle projection: segment endpoints padded by the cap radius.
fn project_capsule(capsule: &Capsule, axis: Vector2) -> (f64, f64) {
    let a = capsule.p1.dot(axis);
    let b = capsule.p2.dot(axis);
    (a.min(b) - capsule.radius, a.max(b) + capsule.radius)
}

/// Outward edge normals of a vertex loop, one per edge.
fn edge_axes(vertices: &[Vector2; 4]) -> [Vector2; 4] {
    let mut axes = [Vector2::ZERO; 4];
    for i in 0..4 {
        let edge = vertices[(i + 1) % 4] - vertices[i];
        axes[i] = edge.perpendicular().normalize();
    }
    axes
}

/// Closest point to `point` on the segment `p1..p2` and its squared
/// distance. A degenerate segment collapses to `p1`.
fn closest_point_on_segment(point: Vector2, p1: Vector2, p2: Vector2) -> (Vector2, f64) {
    let ab = p2 - p1;
    let length_sq = ab.length_squared();
    if length_sq == 0.0 {
        return (p1, point.distance_squared_to(p1));
    }
    let t = ((point - p1).dot(ab) / length_sq).clamp(0.0, 1.0);
    let closest = p1 + ab * t;
    (closest, point.distance_squared_to(closest))
}

fn closest_vertex_to(point: Vector2, vertices: &[Vector2]) -> Vector2 {
    let mut best = vertices[0];
    let mut best_distance_sq = point.distance_squared_to(vertices[0]);
    for vertex in &vertices[1..] {
        let distance_sq = point.distance_squared_to(*vertex);
        if distance_sq < best_distance_sq {
            best_distance_sq = distance_sq;
            best = *vertex;
        }
    }
    best
}

fn closest_point_on_perimeter(point: Vector2, vertices: &[Vector2; 4]) -> Vector2 {
    let mut best = vertices[0];
    let mut best_distance_sq = f64::INFINITY;
    for i in 0..4 {
        let (candidate, distance_sq) =
            closest_point_on_segment(point, vertices[i], vertices[(i + 1) % 4]);
        if distance_sq < best_distance_sq {
            best_distance_sq = distance_sq;
            best = candidate;
        }
    }
    best
}

// ============================================================================
// SAT accumulator
// ============================================================================

/// Running minimum-overlap state for one SAT pass.
struct SatAccumulator {
    normal: Vector2,
    min_overlap: f64,
}

impl SatAccumulator {
    fn new() -> Self {
        Self {
            normal: Vector2::ZERO,
            min_overlap: f64::INFINITY,
        }
    }

    /// Fold one axis in; `false` means the projections separate and the
    /// whole test is over. Touching intervals count as overlapping.
    fn feed(&mut self, axis: Vector2, a: (f64, f64), b: (f64, f64)) -> bool {
        // degenerate axis from coincident features; contributes nothing
        if axis == Vector2::ZERO {
            return true;
        }
        if a.0 > b.1 || b.0 > a.1 {
            return false;
        }
        let overlap = (a.1 - b.0).min(b.1 - a.0);
        if overlap < self.min_overlap {
            self.min_overlap = overlap;
            self.normal = axis;
        }
        true
    }

    /// Resolve the stored normal against the centroid direction and halve
    /// the overlap into the shared-displacement depth.
    fn finish(self, direction: Vector2) -> Detection {
        let mut normal = self.normal;
        if direction.dot(normal) < 0.0 {
            normal = -normal;
        }
        Detection::hit(normal, self.min_overlap * 0.5)
    }
}

// ============================================================================
// Pair detection
// ============================================================================

/// Circle vs circle distance test. Exactly touching or concentric circles
/// do not collide.
#[must_use]
pub fn circle_vs_circle(a: &Circle, b: &Circle) -> Detection {
    let distance_sq = a.center.distance_squared_to(b.center);
    let radii = a.radius + b.radius;
    if distance_sq == 0.0 || distance_sq >= radii * radii {
        return Detection::NONE;
    }
    let distance = distance_sq.sqrt();
    let normal = (b.center - a.center) / distance;
    Detection::hit(normal, (radii - distance) * 0.5)
}

/// Circle vs rectangle SAT over the closest-vertex axis plus the four
/// edge normals.
#[must_use]
pub fn circle_vs_rectangle(circle: &Circle, rect: &Rectangle) -> Detection {
    let mut sat = SatAccumulator::new();
    let closest = closest_vertex_to(circle.center, &rect.vertices);
    let vertex_axis = (closest - circle.center).normalize();
    if !sat.feed(
        vertex_axis,
        project_circle(circle.center, circle.radius, vertex_axis),
        project_vertices(&rect.vertices, vertex_axis),
    ) {
        return Detection::NONE;
    }
    for axis in edge_axes(&rect.vertices) {
        if !sat.feed(
            axis,
            project_circle(circle.center, circle.radius, axis),
            project_vertices(&rect.vertices, axis),
        ) {
            return Detection::NONE;
        }
    }
    sat.finish(rect.centroid() - circle.center)
}

/// Circle vs capsule distance test against the capsule's segment.
/// Touching or center-on-skeleton configurations do not collide.
#[must_use]
pub fn circle_vs_capsule(circle: &Circle, capsule: &Capsule) -> Detection {
    let (closest, distance_sq) = closest_point_on_segment(circle.center, capsule.p1, capsule.p2);
    let radii = circle.radius + capsule.radius;
    if distance_sq == 0.0 || distance_sq >= radii * radii {
        return Detection::NONE;
    }
    let distance = distance_sq.sqrt();
    let normal = (closest - circle.center) / distance;
    Detection::hit(normal, (radii - distance) * 0.5)
}

/// Rectangle vs rectangle SAT over both edge-normal sets.
#[must_use]
pub fn rectangle_vs_rectangle(a: &Rectangle, b: &Rectangle) -> Detection {
    let mut sat = SatAccumulator::new();
    for axis in edge_axes(&a.vertices).into_iter().chain(edge_axes(&b.vertices)) {
        if !sat.feed(
            axis,
            project_vertices(&a.vertices, axis),
            project_vertices(&b.vertices, axis),
        ) {
            return Detection::NONE;
        }
    }
    sat.finish(b.centroid() - a.centroid())
}

/// Rectangle vs capsule SAT: the rectangle's edge normals plus the
/// capsule's segment direction and its perpendicular.
#[must_use]
pub fn rectangle_vs_capsule(rect: &Rectangle, capsule: &Capsule) -> Detection {
    let mut sat = SatAccumulator::new();
    let segment_axis = (capsule.p1 - capsule.p2).normalize();
    let rect_axes = edge_axes(&rect.vertices);
    let axes = [
        rect_axes[0],
        rect_axes[1],
        rect_axes[2],
        rect_axes[3],
        segment_axis,
        segment_axis.perpendicular(),
    ];
    for axis in axes {
        if !sat.feed(
            axis,
            project_vertices(&rect.vertices, axis),
            project_capsule(capsule, axis),
        ) {
            return Detection::NONE;
        }
    }
    sat.finish(capsule.centroid() - rect.centroid())
}

/// Capsule vs capsule SAT over the closest-points axis and both segment
/// perpendiculars.
#[must_use]
pub fn capsule_vs_capsule(a: &Capsule, b: &Capsule) -> Detection {
    let mut sat = SatAccumulator::new();
    let (point_a, _) = closest_point_on_segment(b.centroid(), a.p1, a.p2);
    let (point_b, _) = closest_point_on_segment(a.centroid(), b.p1, b.p2);
    let axes = [
        (point_b - point_a).normalize(),
        (a.p1 - a.p2).perpendicular().normalize(),
        (b.p1 - b.p2).perpendicular().normalize(),
    ];
    for axis in axes {
        if !sat.feed(axis, project_capsule(a, axis), project_capsule(b, axis)) {
            return Detection::NONE;
        }
    }
    sat.finish(b.centroid() - a.centroid())
}

/// Narrow-phase test for an ordered body pair. Mirrored shape orders reuse
/// the canonical routine with the normal flipped back to point `a -> b`.
#[must_use]
pub fn detect(a: &RigidBody, b: &RigidBody) -> Detection {
    match (&a.shape, &b.shape) {
        (Shape::Circle(ca), Shape::Circle(cb)) => circle_vs_circle(ca, cb),
        (Shape::Circle(c), Shape::Rectangle(r)) => circle_vs_rectangle(c, r),
        (Shape::Rectangle(r), Shape::Circle(c)) => flipped(circle_vs_rectangle(c, r)),
        (Shape::Circle(c), Shape::Capsule(p)) => circle_vs_capsule(c, p),
        (Shape::Capsule(p), Shape::Circle(c)) => flipped(circle_vs_capsule(c, p)),
        (Shape::Rectangle(ra), Shape::Rectangle(rb)) => rectangle_vs_rectangle(ra, rb),
        (Shape::Rectangle(r), Shape::Capsule(p)) => rectangle_vs_capsule(r, p),
        (Shape::Capsule(p), Shape::Rectangle(r)) => flipped(rectangle_vs_capsule(r, p)),
        (Shape::Capsule(pa), Shape::Capsule(pb)) => capsule_vs_capsule(pa, pb),
    }
}

#[inline]
fn flipped(mut detection: Detection) -> Detection {
    detection.normal = -detection.normal;
    detection
}

// ============================================================================
// Contact extraction
// ============================================================================

/// Closest-feature accumulator shared across scan passes.
///
/// `point2` joins the manifold when a candidate lands within the merge
/// tolerance of the current minimum but at a different location; later
/// ties keep overwriting it while `point1` only moves on a strictly
/// closer candidate.
struct SupportFinder {
    point1: Vector2,
    point2: Vector2,
    count: usize,
    min_distance_sq: f64,
}

impl SupportFinder {
    fn new() -> Self {
        Self {
            point1: Vector2::new(f64::INFINITY, f64::INFINITY),
            point2: Vector2::new(f64::INFINITY, f64::INFINITY),
            count: 0,
            min_distance_sq: f64::INFINITY,
        }
    }

    fn offer(&mut self, contact: Vector2, distance_sq: f64) {
        if (distance_sq - self.min_distance_sq).abs() <= CONTACT_MERGE_TOLERANCE {
            if contact != self.point1 && contact != self.point2 {
                self.min_distance_sq = distance_sq;
                self.point2 = contact;
                self.count = 2;
            }
        } else if distance_sq < self.min_distance_sq {
            self.min_distance_sq = distance_sq;
            self.point1 = contact;
            self.count = 1;
        }
    }

    /// Offer the closest point from every probe to every edge of the
    /// vertex loop. A two-vertex loop degenerates to the same segment in
    /// both orientations; the duplicate offers merge away.
    fn scan(&mut self, probes: &[Vector2], loop_vertices: &[Vector2]) {
        let n = loop_vertices.len();
        for &probe in probes {
            for i in 0..n {
                let (contact, distance_sq) =
                    closest_point_on_segment(probe, loop_vertices[i], loop_vertices[(i + 1) % n]);
                self.offer(contact, distance_sq);
            }
        }
    }

    fn manifold(&self) -> ContactManifold {
        let mut manifold = ContactManifold::new();
        if self.count >= 1 {
            manifold.push(self.point1);
        }
        if self.count >= 2 {
            manifold.push(self.point2);
        }
        manifold
    }
}

/// Single contact on the first circle's rim along the collision normal.
#[must_use]
pub fn contacts_circle_circle(circle: &Circle, normal: Vector2) -> ContactManifold {
    let mut manifold = ContactManifold::new();
    manifold.push(circle.center + normal * circle.radius);
    manifold
}

/// Single contact: the closest point on the rectangle's perimeter to the
/// circle center.
#[must_use]
pub fn contacts_circle_rectangle(circle: &Circle, rect: &Rectangle) -> ContactManifold {
    let mut manifold = ContactManifold::new();
    manifold.push(closest_point_on_perimeter(circle.center, &rect.vertices));
    manifold
}

/// Single contact on the circle's rim along the collision normal.
#[must_use]
pub fn contacts_circle_capsule(circle: &Circle, normal: Vector2) -> ContactManifold {
    let mut manifold = ContactManifold::new();
    manifold.push(circle.center + normal * circle.radius);
    manifold
}

/// Support points between two rectangles: each body's vertices against the
/// other's edge loop, sharing one minimum across both passes.
#[must_use]
pub fn contacts_rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> ContactManifold {
    let mut finder = SupportFinder::new();
    finder.scan(&a.vertices, &b.vertices);
    finder.scan(&b.vertices, &a.vertices);
    finder.manifold()
}

/// Support points between a rectangle and a capsule. Points found on the
/// capsule's skeleton are pushed out to the surface facing the rectangle
/// before the second pass runs against the rectangle's edges.
#[must_use]
pub fn contacts_rectangle_capsule(
    rect: &Rectangle,
    capsule: &Capsule,
    normal: Vector2,
) -> ContactManifold {
    let mut finder = SupportFinder::new();
    let segment = [capsule.p1, capsule.p2];
    finder.scan(&rect.vertices, &segment);
    let rect_centroid = rect.centroid();
    if finder.count >= 1 {
        finder.point1 = offset_to_surface(finder.point1, rect_centroid, normal, capsule.radius);
    }
    if finder.count >= 2 {
        finder.point2 = offset_to_surface(finder.point2, rect_centroid, normal, capsule.radius);
    }
    finder.scan(&segment, &rect.vertices);
    finder.manifold()
}

// Skeleton points sit on the capsule's segment; move them along the
// normal to the cap surface on the side facing the rectangle.
fn offset_to_surface(point: Vector2, toward: Vector2, normal: Vector2, radius: f64) -> Vector2 {
    if (toward - point).dot(normal) < 0.0 {
        point - normal * radius
    } else {
        point + normal * radius
    }
}

/// Support points between two capsules. Both passes run endpoint-vs-
/// segment, so the reported points stay on the skeleton segments.
#[must_use]
pub fn contacts_capsule_capsule(a: &Capsule, b: &Capsule) -> ContactManifold {
    let mut finder = SupportFinder::new();
    let segment_a = [a.p1, a.p2];
    let segment_b = [b.p1, b.p2];
    finder.scan(&segment_a, &segment_b);
    finder.scan(&segment_b, &segment_a);
    finder.manifold()
}

/// Contact points for an ordered body pair whose detection produced
/// `normal` (pointing `a -> b`). Mirrored shape orders hand the canonical
/// routine the flipped normal so its surface offsets stay on the right
/// side.
#[must_use]
pub fn contact_points(a: &RigidBody, b: &RigidBody, normal: Vector2) -> ContactManifold {
    match (&a.shape, &b.shape) {
        (Shape::Circle(ca), Shape::Circle(_)) => contacts_circle_circle(ca, normal),
        (Shape::Circle(c), Shape::Rectangle(r)) => contacts_circle_rectangle(c, r),
        (Shape::Rectangle(r), Shape::Circle(c)) => contacts_circle_rectangle(c, r),
        (Shape::Circle(c), Shape::Capsule(_)) => contacts_circle_capsule(c, normal),
        (Shape::Capsule(_), Shape::Circle(c)) => contacts_circle_capsule(c, -normal),
        (Shape::Rectangle(ra), Shape::Rectangle(rb)) => contacts_rectangle_rectangle(ra, rb),
        (Shape::Rectangle(r), Shape::Capsule(p)) => contacts_rectangle_capsule(r, p, normal),
        (Shape::Capsule(p), Shape::Rectangle(r)) => contacts_rectangle_capsule(r, p, -normal),
        (Shape::Capsule(pa), Shape::Capsule(pb)) => contacts_capsule_capsule(pa, pb),
    }
}

// ============================================================================
// Tests
// ============================================================================
