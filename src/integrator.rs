//! Recursive path-tracing integrator.
//!
//! Maps a ray and a remaining bounce budget to a radiance value by dispatching
//! on the material of the nearest hit. Recursion is plain and synchronous; the
//! bounce budget is the only thing bounding its depth.

use glam::Vec3A;
use rand::Rng;

use crate::primitive::Material;
use crate::random;
use crate::ray::Ray;
use crate::scene::Scene;

/// Offset applied to every spawned ray origin, along its own direction or the
/// surface normal, to avoid immediate re-intersection with the surface that
/// spawned it.
pub const SURFACE_EPSILON: f32 = 1e-3;

/// Evaluate the radiance arriving along `ray`.
///
/// Terminal cases: exhausted budget returns black, a miss returns the sky
/// gradient, an emissive hit returns its albedo. Mirror, glass and diffuse
/// surfaces recurse with one bounce fewer.
pub fn radiance<R: Rng>(scene: &Scene, ray: &Ray, remaining_bounces: u32, rng: &mut R) -> Vec3A {
    if remaining_bounces == 0 {
        return Vec3A::ZERO;
    }

    let Some(hit) = scene.hit(ray) else {
        return scene.sky_color(ray.direction.y);
    };

    let bounces = remaining_bounces - 1;
    let primitive = &scene.primitives[hit.index];

    match primitive.material {
        Material::Emissive => primitive.albedo,
        Material::Mirror => {
            let reflected = reflect(ray.direction, hit.normal);
            let next = Ray::new(hit.point + reflected * SURFACE_EPSILON, reflected);
            primitive.albedo * radiance(scene, &next, bounces, rng)
        }
        Material::Glass => {
            let next = fresnel_ray(ray, hit.point, hit.normal, primitive.refractive_index, rng);
            // No albedo tint on glass, only the continuation radiance.
            radiance(scene, &next, bounces, rng)
        }
        Material::Diffuse => {
            let scatter_dir = (hit.normal + random::unit_vector(rng)).normalize();
            let next = Ray::new(hit.point + hit.normal * SURFACE_EPSILON, scatter_dir);
            let mut color = primitive.albedo * radiance(scene, &next, bounces, rng);

            if let Some(light) = scene.light {
                let shadow = Ray::between(
                    hit.point + hit.normal * SURFACE_EPSILON,
                    hit.point - light.direction,
                );
                // Occlusion by the hit primitive itself does not count; that
                // is an identity comparison, not a material one.
                let occluded = matches!(scene.hit(&shadow), Some(o) if o.index != hit.index);
                if !occluded {
                    let lambert = hit.normal.dot(-light.direction).max(0.0);
                    color += primitive.albedo * light.color * lambert;
                }
            }

            color
        }
    }
}

/// Specular reflection of `v` about the unit normal `n`.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Choose the continuation ray at a glass boundary.
///
/// The cosine between the inverted incoming direction and the normal decides
/// whether the ray enters or exits, which fixes the index ratio. Total internal
/// reflection and a stochastic Schlick draw both fall back to the mirror ray;
/// otherwise the ray refracts by Snell's law.
fn fresnel_ray<R: Rng>(ray: &Ray, point: Vec3A, normal: Vec3A, index: f32, rng: &mut R) -> Ray {
    let cos = normal.dot(-ray.direction);
    let ratio = if cos > 0.0 { 1.0 / index } else { index };
    let cos = cos.abs();
    let radicand = 1.0 - ratio * ratio * (1.0 - cos * cos);

    if radicand < 0.0 || random::uniform(rng) < schlick(index, cos) {
        let reflected = reflect(ray.direction, normal);
        Ray::new(point + reflected * SURFACE_EPSILON, reflected)
    } else {
        let refracted = refracted(ray.direction, normal, ratio, cos, radicand);
        Ray::new(point + refracted * SURFACE_EPSILON, refracted)
    }
}

/// Snell refraction of the incoming direction given the precomputed ratio,
/// incidence cosine and radicand.
fn refracted(dir: Vec3A, normal: Vec3A, ratio: f32, cos: f32, radicand: f32) -> Vec3A {
    ratio * dir + (ratio * cos - radicand.sqrt()) * normal
}

/// Schlick approximation of the Fresnel reflectance.
fn schlick(index: f32, cos: f32) -> f32 {
    let r0_sqrt = (1.0 - index) / (1.0 + index);
    let r0 = r0_sqrt * r0_sqrt;
    r0 + (1.0 - r0) * (1.0 - cos).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Primitive, Shape};
    use crate::scene::{Camera, Light, Scene, Sky};
    use crate::sphere::Sphere;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_scene(primitives: Vec<Primitive>, light: Option<Light>) -> Scene {
        Scene {
            primitives,
            camera: Camera::default(),
            sky: Sky {
                horizon: Vec3A::new(0.2, 0.3, 0.4),
                zenith: Vec3A::new(0.0, 0.0, 1.0),
            },
            light,
        }
    }

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(1)
    }

    #[test]
    fn reflection_law_holds() {
        let cases = [
            (Vec3A::new(1.0, -1.0, 0.0).normalize(), Vec3A::Y),
            (Vec3A::new(0.3, -0.8, 0.5).normalize(), Vec3A::Y),
            (Vec3A::Z, Vec3A::new(0.0, 0.0, -1.0)),
        ];
        for (incoming, normal) in cases {
            let reflected = reflect(incoming, normal);
            assert!((reflected.dot(normal) + incoming.dot(normal)).abs() < 1e-5);
            assert!((reflected.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn refraction_at_unit_index_is_identity() {
        let dir = Vec3A::new(0.6, -0.8, 0.0);
        let normal = Vec3A::Y;
        let cos = normal.dot(-dir);
        let ratio = 1.0;
        let radicand = 1.0 - ratio * ratio * (1.0 - cos * cos);
        let out = refracted(dir, normal, ratio, cos, radicand);
        assert!((out - dir).length() < 1e-6);
    }

    #[test]
    fn refraction_bends_toward_normal_when_entering() {
        // Entering a denser medium the direction tilts toward -normal.
        let dir = Vec3A::new(0.6, -0.8, 0.0);
        let normal = Vec3A::Y;
        let cos = normal.dot(-dir);
        let ratio = 1.0 / 1.5;
        let radicand = 1.0 - ratio * ratio * (1.0 - cos * cos);
        let out = refracted(dir, normal, ratio, cos, radicand);
        assert!(out.x.abs() < dir.x.abs());
        assert!((out.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn exhausted_budget_is_black() {
        let scene = test_scene(vec![], None);
        let ray = Ray::new(Vec3A::ZERO, Vec3A::Z);
        assert_eq!(radiance(&scene, &ray, 0, &mut rng()), Vec3A::ZERO);
    }

    #[test]
    fn miss_returns_sky_gradient() {
        let scene = test_scene(vec![], None);
        let ray = Ray::new(Vec3A::ZERO, Vec3A::X);
        assert_eq!(radiance(&scene, &ray, 2, &mut rng()), scene.sky_color(0.0));

        let up = Ray::new(Vec3A::ZERO, Vec3A::Y);
        assert_eq!(radiance(&scene, &up, 2, &mut rng()), scene.sky_color(1.0));
    }

    #[test]
    fn emissive_returns_albedo() {
        let albedo = Vec3A::new(3.0, 2.0, 1.0);
        let scene = test_scene(
            vec![Primitive::new(
                Shape::Sphere(Sphere::new(Vec3A::ZERO, 1.0)),
                albedo,
                Material::Emissive,
            )],
            None,
        );
        let ray = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::Z);
        assert_eq!(radiance(&scene, &ray, 2, &mut rng()), albedo);
    }

    #[test]
    fn diffuse_direct_light_with_single_bounce() {
        // With one bounce the scatter recursion contributes nothing, leaving
        // only the direct term: albedo * light color * lambert.
        let albedo = Vec3A::new(0.5, 0.5, 0.5);
        let scene = test_scene(
            vec![Primitive::new(
                Shape::Sphere(Sphere::new(Vec3A::ZERO, 1.0)),
                albedo,
                Material::Diffuse,
            )],
            Some(Light {
                direction: Vec3A::new(0.0, 0.0, 1.0),
                color: Vec3A::new(2.0, 2.0, 2.0),
            }),
        );
        // Hit the sphere head on: normal (0,0,-1), lambert = 1.
        let ray = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::Z);
        let out = radiance(&scene, &ray, 1, &mut rng());
        assert!((out - albedo * Vec3A::splat(2.0)).length() < 1e-5);
    }

    #[test]
    fn diffuse_direct_light_blocked_by_occluder() {
        // Camera ray hits the sphere at (0,0,-1); the light travels along
        // (1,0,1)/sqrt(2), so the shadow ray leaves toward (-1,0,-1)/sqrt(2).
        // A small blocker sits on that shadow path, off the camera axis.
        let albedo = Vec3A::new(0.5, 0.5, 0.5);
        let light = Light {
            direction: Vec3A::new(1.0, 0.0, 1.0).normalize(),
            color: Vec3A::new(2.0, 2.0, 2.0),
        };
        let subject = Primitive::new(
            Shape::Sphere(Sphere::new(Vec3A::ZERO, 1.0)),
            albedo,
            Material::Diffuse,
        );
        let blocker = Primitive::new(
            Shape::Sphere(Sphere::new(Vec3A::new(-1.414, 0.0, -2.414), 0.5)),
            Vec3A::ONE,
            Material::Diffuse,
        );
        let ray = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::Z);
        let lambert = Vec3A::new(0.0, 0.0, -1.0).dot(-light.direction);

        // Unoccluded: only the direct term survives at one bounce.
        let open = test_scene(vec![subject], Some(light));
        let out = radiance(&open, &ray, 1, &mut rng());
        assert!((out - albedo * light.color * lambert).length() < 1e-5);

        // Occluded: the direct term is dropped and one bounce yields black.
        let shadowed = test_scene(vec![subject, blocker], Some(light));
        let out = radiance(&shadowed, &ray, 1, &mut rng());
        assert!(out.length() < 1e-5);
    }

    #[test]
    fn mirror_tints_recursive_radiance() {
        // Mirror floor reflecting straight up into the sky zenith.
        let scene = test_scene(
            vec![Primitive::new(
                Shape::Aabb(crate::aabb::Aabb::new(
                    Vec3A::new(-10.0, -2.0, -10.0),
                    Vec3A::new(10.0, 0.0, 10.0),
                )),
                Vec3A::new(0.5, 1.0, 1.0),
                Material::Mirror,
            )],
            None,
        );
        let ray = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let out = radiance(&scene, &ray, 2, &mut rng());
        // Reflected ray points straight up: sky_color(1.0) = zenith.
        let expected = Vec3A::new(0.5, 1.0, 1.0) * scene.sky_color(1.0);
        assert!((out - expected).length() < 1e-4);
    }
}
