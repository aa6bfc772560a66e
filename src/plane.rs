//! Infinite plane primitive and its ray intersection.

use glam::Vec3A;

use crate::ray::Ray;

/// Plane defined by a point on it and a unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Any point lying on the plane.
    pub point: Vec3A,
    /// Plane normal, normalized at construction.
    pub normal: Vec3A,
}

impl Plane {
    /// Create a plane from a point and a normal. The normal is normalized.
    pub fn new(point: Vec3A, normal: Vec3A) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Signed distance from the world origin to the plane along the normal.
    pub fn signed_distance_to_origin(&self) -> f32 {
        self.point.dot(self.normal)
    }

    /// Ray-plane intersection.
    ///
    /// Returns `None` when the ray is exactly parallel to the plane or the
    /// intersection lies behind the ray origin.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3A> {
        let denom = ray.direction.dot(self.normal);
        if denom == 0.0 {
            return None;
        }
        let t = (self.signed_distance_to_origin() - ray.origin.dot(self.normal)) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ray.at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_on_hit() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::Y);
        let ray = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        assert_eq!(plane.intersect(&ray), Some(Vec3A::ZERO));
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::Y);
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::X);
        assert_eq!(plane.intersect(&ray), None);
    }

    #[test]
    fn behind_origin_misses() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::Y);
        let ray = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::Y);
        assert_eq!(plane.intersect(&ray), None);
    }

    #[test]
    fn oblique_hit_lies_on_plane() {
        let plane = Plane::new(Vec3A::new(0.0, 2.0, 0.0), Vec3A::new(0.0, 1.0, 0.0));
        let ray = Ray::new(Vec3A::new(1.0, 6.0, 3.0), Vec3A::new(1.0, -1.0, 0.0));
        let hit = plane.intersect(&ray).unwrap();
        assert!((hit.y - 2.0).abs() < 1e-5);
    }
}
