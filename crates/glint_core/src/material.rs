//! Surface attributes for scene primitives.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Material attributes shared by every primitive.
///
/// The optional coefficients double as enable flags: a primitive is
/// reflective exactly when `reflectivity` is set, and so on.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base reflectance (RGB, 0-1)
    pub color: Vec3,

    /// Whether the specular highlight term is applied
    pub specular: bool,

    /// Phong exponent for the specular highlight
    pub shininess: f32,

    /// Mirror reflection coefficient
    pub reflectivity: Option<f32>,

    /// Index of refraction
    pub refraction: Option<f32>,

    /// Transparency coefficient
    pub transparency: Option<f32>,

    /// Procedural banding that overrides `color` where present
    pub pattern: Option<StripePattern>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            specular: true,
            shininess: 50.0,
            reflectivity: None,
            refraction: None,
            transparency: None,
            pattern: None,
        }
    }
}

impl Material {
    /// Create a material with the given base color and default attributes.
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Enable or disable the specular highlight.
    pub fn with_specular(mut self, specular: bool) -> Self {
        self.specular = specular;
        self
    }

    /// Set the Phong exponent.
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Make the surface reflective with the given coefficient.
    pub fn with_reflectivity(mut self, coeff: f32) -> Self {
        self.reflectivity = Some(coeff);
        self
    }

    /// Make the surface refractive with the given index of refraction.
    pub fn with_refraction(mut self, ior: f32) -> Self {
        self.refraction = Some(ior);
        self
    }

    /// Make the surface transparent with the given coefficient.
    pub fn with_transparency(mut self, coeff: f32) -> Self {
        self.transparency = Some(coeff);
        self
    }

    /// Attach a stripe pattern.
    pub fn with_pattern(mut self, pattern: StripePattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Base color at a hit point: the pattern color when a pattern is
    /// attached, the stored color otherwise.
    ///
    /// Keeping this a pure function of the hit point means tracing never
    /// mutates shared material state, so rays can be shaded in parallel.
    pub fn base_color(&self, hit: Vec3) -> Vec3 {
        match &self.pattern {
            Some(pattern) => pattern.color_at(hit.x, hit.z),
            None => self.color,
        }
    }
}

/// Checkerboard-like banding over the two horizontal axes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StripePattern {
    /// Width of one band in world units
    pub width: f32,
    /// Color of even bands
    pub primary: Vec3,
    /// Color of odd bands
    pub secondary: Vec3,
}

impl StripePattern {
    /// Create a new stripe pattern.
    pub fn new(width: f32, primary: Vec3, secondary: Vec3) -> Self {
        Self {
            width,
            primary,
            secondary,
        }
    }

    /// Band color at horizontal coordinates (x, z).
    ///
    /// Integer-divide-then-mod banding. Truncating division collapses the
    /// two bands either side of x = 0 into one; bumping the x band index
    /// for negative x restores the alternation there.
    pub fn color_at(&self, x: f32, z: f32) -> Vec3 {
        let ix = (x / self.width) as i32;
        let iz = (z / self.width) as i32;
        let mut kx = ix % 2;
        let kz = iz % 2;
        if x < 0.0 {
            kx += 1;
        }
        if (kx + kz) % 2 == 0 {
            self.primary
        } else {
            self.secondary
        }
    }
}
