//! Per-pixel sampler and parallel render loop.
//!
//! Each pixel is a pure function of the immutable scene, its coordinates and a
//! private random stream, so the pixel loop parallelizes with rayon without any
//! locking. Every worker owns its own ChaCha20 stream.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::Rng;
use rayon::prelude::*;

use crate::integrator::radiance;
use crate::random;
use crate::ray::Ray;
use crate::scene::Scene;

/// Knobs of one render invocation.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    /// Jittered samples averaged per pixel.
    pub samples_per_pixel: u32,
    /// Bounce budget handed to the integrator per sample.
    pub max_bounces: u32,
    /// Distance from the camera to the plane of perfect focus.
    pub focal_distance: f32,
    /// Radius of the thin-lens aperture; 0 disables depth of field.
    pub lens_radius: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 100,
            max_bounces: 2,
            focal_distance: 3.0,
            lens_radius: 0.04,
        }
    }
}

/// Render the scene into a linear-space f32 RGB image.
///
/// Parallel over pixels; tone mapping and encoding happen downstream in
/// `output`.
pub fn render(scene: &Scene, settings: &RenderSettings) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
    let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
        ImageBuffer::new(settings.width, settings.height);

    info!(
        "Rendering {}x{} at {} samples/pixel using {} CPU cores...",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        rayon::current_num_threads()
    );
    let start = std::time::Instant::now();
    let pb = ProgressBar::new((settings.width * settings.height) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .unwrap(),
    );

    image.enumerate_pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
        let mut rng = random::worker_rng();
        // Image rows run top-down; the view plane's y axis points up.
        let color = sample_pixel(scene, settings, x, settings.height - 1 - y, &mut rng);
        *pixel = Rgb([color.x, color.y, color.z]);
        pb.inc(1);
    });

    pb.finish();
    info!("Image generated in {:.2?}", start.elapsed());

    image
}

/// Average radiance over all jittered samples of one pixel.
///
/// `y` counts up from the bottom of the view plane.
pub fn sample_pixel<R: Rng>(
    scene: &Scene,
    settings: &RenderSettings,
    x: u32,
    y: u32,
    rng: &mut R,
) -> Vec3A {
    let mut sum = Vec3A::ZERO;
    for _ in 0..settings.samples_per_pixel {
        let ray = pixel_ray(scene, settings, x, y, rng);
        sum += radiance(scene, &ray, settings.max_bounces, rng);
    }
    sum / settings.samples_per_pixel as f32
}

/// Build one jittered, lens-perturbed camera ray through a pixel.
fn pixel_ray<R: Rng>(
    scene: &Scene,
    settings: &RenderSettings,
    x: u32,
    y: u32,
    rng: &mut R,
) -> Ray {
    let camera = &scene.camera;

    // Anti-aliasing jitter within the pixel, then normalized aspect-corrected
    // view-plane coordinates in roughly [-1, 1].
    let jittered_x = x as f32 + random::uniform(rng);
    let jittered_y = y as f32 + random::uniform(rng);
    let sx = 2.0 * (jittered_x / settings.width as f32 - 0.5);
    let sy = 2.0 * (jittered_y / settings.height as f32 - 0.5) * settings.height as f32
        / settings.width as f32;

    let direction = camera.forward + sx * camera.right + sy * camera.up;
    let focal_point = camera.position + direction * settings.focal_distance;

    // Thin lens: perturb the origin on the aperture disc, keep aiming at the
    // shared focal point.
    let lens = random::on_unit_disc(rng) * settings.lens_radius;
    let origin = camera.position + lens.x * camera.right + lens.y * camera.up;

    Ray::between(origin, focal_point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Camera, Sky};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn empty_scene(sky: Sky) -> Scene {
        Scene {
            primitives: vec![],
            camera: Camera::default(),
            sky,
            light: None,
        }
    }

    fn small_settings() -> RenderSettings {
        RenderSettings {
            width: 8,
            height: 8,
            samples_per_pixel: 16,
            ..RenderSettings::default()
        }
    }

    #[test]
    fn empty_scene_with_flat_sky_has_zero_variance() {
        let color = Vec3A::new(0.3, 0.5, 0.7);
        let scene = empty_scene(Sky {
            horizon: color,
            zenith: color,
        });
        let settings = small_settings();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        for x in 0..settings.width {
            let out = sample_pixel(&scene, &settings, x, 3, &mut rng);
            // The gradient is constant, so jitter cannot move the result.
            assert!((out - color).length() < 1e-6);
        }
    }

    #[test]
    fn empty_scene_stays_within_gradient_bounds() {
        let scene = empty_scene(Sky {
            horizon: Vec3A::ZERO,
            zenith: Vec3A::ONE,
        });
        let settings = small_settings();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let out = sample_pixel(&scene, &settings, 4, 4, &mut rng);
        // Pixel rays near the view center have a small |y| component, so the
        // averaged sky value sits strictly inside the gradient range.
        assert!(out.x > -0.5 && out.x < 0.5);
        assert_eq!(out.x, out.y);
        assert_eq!(out.y, out.z);
    }

    #[test]
    fn lens_radius_zero_fixes_the_ray_origin() {
        let scene = empty_scene(Sky::default());
        let settings = RenderSettings {
            lens_radius: 0.0,
            ..small_settings()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..10 {
            let ray = pixel_ray(&scene, &settings, 3, 3, &mut rng);
            assert_eq!(ray.origin, scene.camera.position);
        }
    }
}
