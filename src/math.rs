//! 2D Vector Mathematics
//!
//! Float64 vector primitive shared by every stage of the pipeline: shape
//! transforms, separating-axis projections, broad-phase ranges, impulse
//! application.
//!
//! # Conventions
//!
//! - Screen coordinates: `x` grows right, `y` grows down, so a gravity of
//!   `(0, 9.81)` pulls bodies toward larger `y`.
//! - Angles are radians; `rotate` follows the handedness implied by the
//!   axes above.
//! - The 2D cross product is the scalar `a.x * b.y - a.y * b.x`, used for
//!   the lever-arm terms in impulse resolution.
//!
//! All operations are pure and return new values, with one exception:
//! [`Vector2::add_scaled`] mutates in place and is the integrator's
//! hot-path update (`velocity += gravity * dt`).
//!
//! Author: Moroya Sakamoto

use core::ops::{Add, Div, Mul, Neg, Sub};

// ============================================================================
// Vector2
// ============================================================================

/// 2D vector with float64 components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Zero vector
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    /// Unit X axis
    pub const UNIT_X: Vector2 = Vector2 { x: 1.0, y: 0.0 };
    /// Unit Y axis
    pub const UNIT_Y: Vector2 = Vector2 { x: 0.0, y: 1.0 };

    /// Create a vector from components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared length. Cheaper than [`Vector2::length`]; prefer it for
    /// comparisons.
    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Returns [`Vector2::ZERO`] for a zero-length input. Callers that
    /// need a defined direction must guard zero-length inputs themselves
    /// (coincident circle centers are reported as "no collision" for this
    /// reason); do not rely on the zero fallback.
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        let length_sq = self.length_squared();
        if length_sq == 0.0 {
            return Self::ZERO;
        }
        let inv = 1.0 / length_sq.sqrt();
        Self::new(self.x * inv, self.y * inv)
    }

    /// Dot product.
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar 2D cross product: `self.x * other.y - self.y * other.x`.
    #[inline]
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Perpendicular vector `(-y, x)`.
    ///
    /// Either perpendicular works as a separating-axis candidate; the
    /// detector re-orients the winning axis afterwards.
    #[inline]
    #[must_use]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotate about the origin by `angle` radians.
    #[inline]
    #[must_use]
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotate about `pivot` by `angle` radians: translate into pivot
    /// space, rotate, translate back.
    #[inline]
    #[must_use]
    pub fn rotate_about(self, pivot: Self, angle: f64) -> Self {
        (self - pivot).rotate(angle) + pivot
    }

    /// Distance to another point.
    #[inline]
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Squared distance to another point.
    #[inline]
    #[must_use]
    pub fn distance_squared_to(self, other: Self) -> f64 {
        (other - self).length_squared()
    }

    /// Linear interpolation: `self + (other - self) * t`.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// In-place `self += other * scale`. Hot-path update used by the
    /// integrator and the positional corrector.
    #[inline]
    pub fn add_scaled(&mut self, other: Self, scale: f64) {
        self.x += other.x * scale;
        self.y += other.y * scale;
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    #[inline]
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    #[inline]
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

// ============================================================================
// Tests
// ============================================================================
