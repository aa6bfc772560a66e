use clap::Parser;
use log::info;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use lumapath::loader::load_scene;
use lumapath::output::{save_image_as_exr, save_image_as_png};
use lumapath::render::{render, RenderSettings};

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("Lumapath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let scene = match load_scene(&args.scene) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to load scene \"{}\": {}", args.scene, e);
            std::process::exit(1);
        }
    };

    let settings = RenderSettings {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples_per_pixel,
        max_bounces: args.max_bounces,
        focal_distance: args.focal_distance,
        lens_radius: args.lens_radius,
    };

    let image = render(&scene, &settings);

    // Default output: scene file name with a .png extension.
    let output = args.output.unwrap_or_else(|| {
        let stem = args.scene.rsplit_once('.').map_or(args.scene.as_str(), |(s, _)| s);
        format!("{stem}.png")
    });

    // Save image based on file extension
    if output.ends_with(".exr") {
        save_image_as_exr(&image, &output);
    } else if output.ends_with(".png") {
        save_image_as_png(&image, &output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
