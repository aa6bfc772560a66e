//! Lumapath path tracer
//!
//! Renders a textual scene description of spheres and axis-aligned boxes with
//! a recursive CPU path tracer. Outputs PNG (sRGB) and EXR (linear) formats.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aabb;
pub mod integrator;
pub mod loader;
pub mod output;
pub mod plane;
pub mod primitive;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod sphere;
