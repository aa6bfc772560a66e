use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumapath")]
#[command(about = "A simple path tracer in Rust")]
pub struct Args {
    /// Scene description file to render
    #[arg(default_value = "scene.txt")]
    pub scene: String,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600", help = "Image height in pixels")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces per sample
    #[arg(long, default_value = "2", help = "Maximum number of ray bounces per sample")]
    pub max_bounces: u32,

    /// Distance to the plane of perfect focus
    #[arg(long, default_value = "3.0", help = "Distance to the plane of perfect focus")]
    pub focal_distance: f32,

    /// Thin-lens aperture radius (0 disables depth of field)
    #[arg(long, default_value = "0.04", help = "Thin-lens aperture radius (0 disables depth of field)")]
    pub lens_radius: f32,

    /// Output file path (.png for 8-bit sRGB, .exr for HDR linear); defaults
    /// to the scene file name with a .png extension
    #[arg(short, long, help = "Output file path (.png for 8-bit sRGB, .exr for HDR linear)")]
    pub output: Option<String>,
}
