//! Textual scene-description parser.
//!
//! Line-oriented format, one record per line:
//!
//! ```text
//! // comment
//! camera            px py pz  rx ry rz  ux uy uz  fx fy fz
//! directional_light dx dy dz  cr cg cb
//! sky               hr hg hb  zr zg zb
//! sphere <material> cx cy cz  radius   r g b  [ior]
//! aabb   <material> cx cy cz  sx sy sz r g b  [ior]
//! ```
//!
//! Boxes are given by center and full size. Material keywords are `normal`,
//! `mirror`, `emissive` and `glass`; anything else falls back to `normal`.
//! The optional trailing index of refraction defaults to 1.0. Lines whose
//! first token is not a known record type are skipped.

use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use glam::Vec3A;
use log::{debug, info};
use thiserror::Error;

use crate::aabb::Aabb;
use crate::primitive::{Material, Primitive, Shape};
use crate::scene::{Camera, Light, Scene, Sky};
use crate::sphere::Sphere;

/// Errors produced while reading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file could not be read.
    #[error("could not read scene file: {0}")]
    Io(#[from] std::io::Error),

    /// A record ended before all of its numeric fields.
    #[error("line {line}: expected a number for {field}")]
    MissingField {
        /// 1-based line number of the record.
        line: usize,
        /// Name of the field that was expected.
        field: &'static str,
    },

    /// A field was present but did not parse as a number.
    #[error("line {line}: could not parse {field}: {value:?}")]
    BadNumber {
        /// 1-based line number of the record.
        line: usize,
        /// Name of the field being parsed.
        field: &'static str,
        /// The offending token.
        value: String,
    },
}

/// Cursor over one record's whitespace-separated fields.
struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Fields<'a> {
    fn f32(&mut self, field: &'static str) -> Result<f32, SceneError> {
        let token = self.tokens.next().ok_or(SceneError::MissingField {
            line: self.line,
            field,
        })?;
        token.parse().map_err(|_| SceneError::BadNumber {
            line: self.line,
            field,
            value: token.to_string(),
        })
    }

    fn vec3(&mut self, field: &'static str) -> Result<Vec3A, SceneError> {
        Ok(Vec3A::new(
            self.f32(field)?,
            self.f32(field)?,
            self.f32(field)?,
        ))
    }

    /// Optional trailing refractive index, default 1.0.
    fn ior(&mut self) -> Result<f32, SceneError> {
        match self.tokens.next() {
            None => Ok(1.0),
            Some(token) => token.parse().map_err(|_| SceneError::BadNumber {
                line: self.line,
                field: "refractive index",
                value: token.to_string(),
            }),
        }
    }
}

/// Load a scene description from a file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
    let text = fs::read_to_string(path.as_ref())?;
    let scene = parse_scene(&text)?;
    info!(
        "Loaded scene \"{}\": {} primitives, directional light: {}",
        path.as_ref().display(),
        scene.primitives.len(),
        scene.light.is_some()
    );
    Ok(scene)
}

/// Parse a scene description from text.
pub fn parse_scene(text: &str) -> Result<Scene, SceneError> {
    let mut camera = Camera::default();
    let mut sky = Sky::default();
    let mut light = None;
    let mut primitives = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.len() < 2 || trimmed.starts_with("//") {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let record = tokens.next().unwrap_or_default();
        let mut fields = Fields { tokens, line };

        match record {
            "camera" => {
                camera = Camera {
                    position: fields.vec3("camera position")?,
                    right: fields.vec3("camera right")?,
                    up: fields.vec3("camera up")?,
                    forward: fields.vec3("camera forward")?,
                };
                debug!("camera at {:?}", camera.position);
            }
            "directional_light" => {
                let parsed = Light {
                    direction: fields.vec3("light direction")?.normalize(),
                    color: fields.vec3("light color")?,
                };
                debug!("light direction {:?}", parsed.direction);
                light = Some(parsed);
            }
            "sky" => {
                sky = Sky {
                    horizon: fields.vec3("sky horizon")?,
                    zenith: fields.vec3("sky zenith")?,
                };
            }
            "sphere" => {
                let material = material_keyword(fields.tokens.next());
                let center = fields.vec3("sphere center")?;
                let radius = fields.f32("sphere radius")?;
                let albedo = fields.vec3("sphere color")?;
                let ior = fields.ior()?;
                debug!("sphere at {center:?} radius {radius} ({material:?})");
                primitives.push(
                    Primitive::new(Shape::Sphere(Sphere::new(center, radius)), albedo, material)
                        .with_refractive_index(ior),
                );
            }
            "aabb" => {
                let material = material_keyword(fields.tokens.next());
                let center = fields.vec3("aabb center")?;
                let size = fields.vec3("aabb size")?;
                let albedo = fields.vec3("aabb color")?;
                let ior = fields.ior()?;
                debug!("aabb at {center:?} size {size:?} ({material:?})");
                primitives.push(
                    Primitive::new(
                        Shape::Aabb(Aabb::from_center_size(center, size)),
                        albedo,
                        material,
                    )
                    .with_refractive_index(ior),
                );
            }
            // Unknown record types are skipped, not rejected.
            _ => {}
        }
    }

    Ok(Scene {
        primitives,
        camera,
        sky,
        light,
    })
}

fn material_keyword(token: Option<&str>) -> Material {
    match token {
        Some("mirror") => Material::Mirror,
        Some("emissive") => Material::Emissive,
        Some("glass") => Material::Glass,
        // "normal" and anything unrecognized.
        _ => Material::Diffuse,
    }
}
