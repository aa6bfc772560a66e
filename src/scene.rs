//! Immutable scene model and its nearest-hit query.
//!
//! A scene owns the primitive list, the camera basis, the sky gradient and at
//! most one directional light. Everything is built once by the loader and read
//! concurrently by the render workers, so nothing here is ever mutated.

use glam::Vec3A;

use crate::primitive::Primitive;
use crate::ray::Ray;

/// Camera position and orthonormal-ish basis, supplied by the scene file.
///
/// The basis is used as given; the core never re-orthogonalizes it.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3A,
    /// Basis vector pointing to the right of the view.
    pub right: Vec3A,
    /// Basis vector pointing up in the view.
    pub up: Vec3A,
    /// Basis vector pointing along the view direction.
    pub forward: Vec3A,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3A::ZERO,
            right: Vec3A::X,
            up: Vec3A::Y,
            forward: Vec3A::Z,
        }
    }
}

/// Vertical sky gradient between a horizon and a zenith color.
#[derive(Debug, Clone, Copy)]
pub struct Sky {
    /// Color at vertical direction component 0.
    pub horizon: Vec3A,
    /// Color at vertical direction component 1.
    pub zenith: Vec3A,
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            horizon: Vec3A::ONE,
            zenith: Vec3A::new(0.5, 0.7, 1.0),
        }
    }
}

/// Single infinitely-distant directional light.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    /// Unit direction the light travels in (from the light toward the scene).
    pub direction: Vec3A,
    /// Light color.
    pub color: Vec3A,
}

/// Nearest intersection found by [`Scene::hit`].
#[derive(Debug, Clone, Copy)]
pub struct SceneHit {
    /// Index of the hit primitive in the scene's list, used to compare
    /// primitive identity (shadow rays exclude self-occlusion by it).
    pub index: usize,
    /// World-space hit point.
    pub point: Vec3A,
    /// Outward surface normal at the hit point.
    pub normal: Vec3A,
}

/// Immutable collection of primitives plus camera, sky and optional light.
#[derive(Debug)]
pub struct Scene {
    /// All primitives, scanned linearly by the nearest-hit query.
    pub primitives: Vec<Primitive>,
    /// Camera the render loop generates rays from.
    pub camera: Camera,
    /// Sky gradient returned on ray misses.
    pub sky: Sky,
    /// Optional directional light for direct diffuse lighting.
    pub light: Option<Light>,
}

impl Scene {
    /// Nearest-hit query over all primitives.
    ///
    /// Selects the hit at minimum squared distance from the ray origin; the
    /// strict comparison keeps the earlier primitive on exact ties.
    pub fn hit(&self, ray: &Ray) -> Option<SceneHit> {
        let mut nearest: Option<SceneHit> = None;
        let mut nearest_dist_sq = f32::INFINITY;

        for (index, primitive) in self.primitives.iter().enumerate() {
            if let Some((point, normal)) = primitive.hit(ray) {
                let dist_sq = (point - ray.origin).length_squared();
                if dist_sq < nearest_dist_sq {
                    nearest_dist_sq = dist_sq;
                    nearest = Some(SceneHit {
                        index,
                        point,
                        normal,
                    });
                }
            }
        }

        nearest
    }

    /// Sky gradient sampled at a ray direction's vertical component.
    ///
    /// 0 yields the horizon color, 1 the zenith color; values outside [0, 1]
    /// extrapolate rather than clamp.
    pub fn sky_color(&self, y: f32) -> Vec3A {
        (1.0 - y) * self.sky.horizon + y * self.sky.zenith
    }
}
