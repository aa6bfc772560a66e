//! Image writers.
//!
//! The render loop produces linear f32 RGB; PNG export applies the sRGB
//! transfer curve and quantizes to 8 bits, EXR export keeps the full linear
//! values.

use exr::prelude::*;
use image::{ImageBuffer, Rgb};
use log::{info, warn};

/// Save a linear f32 RGB image as an 8-bit PNG.
///
/// Values are clamped to [0, 1] and pushed through the sRGB transfer curve
/// (linear segment below 0.0031308, power curve above) before quantization.
pub fn save_image_as_png(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let linear_to_srgb = |linear: f32| -> f32 {
        if linear <= 0.0 {
            0.0
        } else if linear <= 0.0031308 {
            12.92 * linear
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    };

    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb([
                (linear_to_srgb(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
                (linear_to_srgb(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
                (linear_to_srgb(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
            ])
        });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save a linear f32 RGB image as EXR with full HDR precision.
///
/// No tone mapping or gamma is applied; downstream viewers handle the display
/// transform.
pub fn save_image_as_exr(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let width = image.width() as usize;
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    let result = write_rgb_file(
        output_path,
        width,
        image.height() as usize,
        |x, y| pixels[y * width + x],
    );

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}
