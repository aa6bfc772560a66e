//! Scene primitives: a tagged shape plus the surface fields shared by all
//! shapes (albedo, material kind, refractive index).

use glam::Vec3A;

use crate::aabb::Aabb;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Surface material kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Matte surface scattering into the normal-oriented hemisphere.
    Diffuse,
    /// Perfect specular reflector.
    Mirror,
    /// Light source returning its albedo directly.
    Emissive,
    /// Transparent surface mixing reflection and refraction.
    Glass,
}

/// Geometric variant of a primitive.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Sphere given by center and radius.
    Sphere(Sphere),
    /// Axis-aligned box given by min and max corners.
    Aabb(Aabb),
}

/// A material-tagged shape in the scene.
#[derive(Debug, Clone, Copy)]
pub struct Primitive {
    /// Geometry of the primitive.
    pub shape: Shape,
    /// Base reflectance color.
    pub albedo: Vec3A,
    /// How the surface scatters light.
    pub material: Material,
    /// Refractive index, meaningful only for [`Material::Glass`].
    pub refractive_index: f32,
}

impl Primitive {
    /// Create a primitive; the refractive index defaults to 1.0.
    pub fn new(shape: Shape, albedo: Vec3A, material: Material) -> Self {
        Self {
            shape,
            albedo,
            material,
            refractive_index: 1.0,
        }
    }

    /// Create a primitive with an explicit refractive index.
    pub fn with_refractive_index(mut self, index: f32) -> Self {
        self.refractive_index = index;
        self
    }

    /// Ray intersection dispatching on the shape tag.
    ///
    /// Returns the hit point and the outward surface normal at it.
    pub fn hit(&self, ray: &Ray) -> Option<(Vec3A, Vec3A)> {
        match self.shape {
            Shape::Sphere(sphere) => {
                let point = sphere.intersect(ray)?;
                let normal = (point - sphere.center).normalize();
                Some((point, normal))
            }
            Shape::Aabb(aabb) => aabb.intersect_with_normal(ray),
        }
    }
}
