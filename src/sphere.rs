//! Sphere primitive and its ray intersection.

use glam::Vec3A;

use crate::ray::Ray;

/// Sphere defined by center and radius.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,
    /// Radius of the sphere, assumed positive.
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3A, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec3A) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Ray-sphere intersection via the closest-approach form.
    ///
    /// Projects the center onto the ray, rejects when the perpendicular
    /// distance exceeds the radius, then takes the near root. A ray starting
    /// inside the sphere has a negative near root and reports `None` even
    /// though the far surface would be hit; see `scene::Scene` for how that
    /// plays out in practice.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3A> {
        let a = (self.center - ray.origin).dot(ray.direction);
        let closest_dist_sq = (ray.at(a) - self.center).length_squared();
        if closest_dist_sq > self.radius * self.radius {
            return None;
        }
        let b = a - (self.radius * self.radius - closest_dist_sq).sqrt();
        if b < 0.0 {
            return None;
        }
        Some(ray.at(b))
    }
}
