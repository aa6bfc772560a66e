//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::Vec3A;

/// Ray in 3D space defined by origin and unit direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,

    /// Direction of the ray, always unit length.
    ///
    /// Every constructor normalizes, so downstream intersection code can treat
    /// the parameter t as a world-space distance.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction. The direction is normalized.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray from its origin aimed through a second point.
    pub fn between(origin: Vec3A, target: Vec3A) -> Self {
        Self::new(origin, target - origin)
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
