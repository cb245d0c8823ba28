//! Declarative scene description, loadable from JSON.
//!
//! A `SceneConfig` carries everything a render needs: camera placement,
//! tracer settings, and the primitive list with materials. Geometry
//! invariants (positive radii, non-degenerate polygons) are enforced here
//! at load time; the render core assumes them.

use std::fs;
use std::path::Path;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Material;

/// Errors that can occur while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Primitive {index}: {reason}")]
    InvalidPrimitive { index: usize, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Camera placement and image-plane settings.
///
/// The camera looks down -z from `eye`; the image plane is a
/// `plane_width` x `plane_height` world-unit rectangle at `plane_dist`
/// in front of the eye, divided into `image_width` x `image_height` cells.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub plane_width: f32,
    pub plane_height: f32,
    pub plane_dist: f32,
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            plane_width: 20.0,
            plane_height: 20.0,
            plane_dist: 40.0,
            image_width: 500,
            image_height: 500,
        }
    }
}

/// Tracer and driver settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Recursion bound for secondary rays
    pub max_depth: u32,

    /// Average four subsample rays per pixel instead of one
    pub antialias: bool,

    /// Color returned when a ray leaves the scene
    pub background: Vec3,

    /// Ambient intensity applied to the base color
    pub ambient: f32,

    /// Point light position
    pub light: Vec3,

    /// Depth (z) at which fog starts
    pub fog_near: f32,

    /// Depth (z) at which fog is fully white
    pub fog_far: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_depth: 5,
            antialias: true,
            background: Vec3::ONE,
            ambient: 0.2,
            light: Vec3::new(10.0, 40.0, -3.0),
            fog_near: -75.0,
            fog_far: -150.0,
        }
    }
}

/// Geometry of one primitive.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeConfig {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// A bounded polygon: three vertices for a triangle, four for a quad,
    /// in winding order.
    Plane {
        vertices: Vec<Vec3>,
    },
    /// A finite open cylinder standing on `center`, lateral surface only.
    Cylinder {
        center: Vec3,
        radius: f32,
        height: f32,
    },
}

/// One primitive: its geometry plus its material.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrimitiveConfig {
    #[serde(flatten)]
    pub shape: ShapeConfig,

    #[serde(default)]
    pub material: Material,
}

/// A complete scene description.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub render: RenderSettings,
    pub primitives: Vec<PrimitiveConfig>,
}

/// Coplanarity/area tolerance for polygon validation.
const PLANE_TOLERANCE: f32 = 1e-4;

impl SceneConfig {
    /// Parse and validate a scene from JSON text.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Check the geometry invariants the render core assumes.
    pub fn validate(&self) -> ConfigResult<()> {
        for (index, primitive) in self.primitives.iter().enumerate() {
            if let Err(reason) = validate_shape(&primitive.shape) {
                return Err(ConfigError::InvalidPrimitive { index, reason });
            }
        }
        Ok(())
    }
}

fn validate_shape(shape: &ShapeConfig) -> Result<(), String> {
    match shape {
        ShapeConfig::Sphere { radius, .. } => {
            if *radius <= 0.0 {
                return Err(format!("sphere radius must be positive, got {radius}"));
            }
        }
        ShapeConfig::Cylinder { radius, height, .. } => {
            if *radius <= 0.0 {
                return Err(format!("cylinder radius must be positive, got {radius}"));
            }
            if *height <= 0.0 {
                return Err(format!("cylinder height must be positive, got {height}"));
            }
        }
        ShapeConfig::Plane { vertices } => {
            if vertices.len() < 3 || vertices.len() > 4 {
                return Err(format!(
                    "plane needs 3 or 4 vertices, got {}",
                    vertices.len()
                ));
            }
            let a = vertices[0];
            let normal = (vertices[1] - a).cross(vertices[vertices.len() - 1] - a);
            if normal.length() < PLANE_TOLERANCE {
                return Err("plane vertices are degenerate (zero area)".to_string());
            }
            if vertices.len() == 4 {
                let offset = (vertices[2] - a).dot(normal.normalize());
                if offset.abs() > PLANE_TOLERANCE {
                    return Err(format!(
                        "plane vertices are not coplanar (offset {offset})"
                    ));
                }
            }
        }
    }
    Ok(())
}
