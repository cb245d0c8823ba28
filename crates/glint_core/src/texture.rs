//! Image-backed texture sampling.
//!
//! Textures expose the `sample(u, v)` contract consumed by texture-mapped
//! materials. Decoding goes through the `image` crate, so any format it
//! understands (BMP, PNG, ...) can be used.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture with float RGB pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, row-major, 0-1 range
    pixels: Vec<[f32; 3]>,
}

impl Texture {
    /// Create a texture from pixel data.
    ///
    /// `pixels` must hold `width * height` entries in row-major order.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x, color.y, color.z]],
        }
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| TextureError::Load(format!("{}: {}", path.display(), e)))?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                ]
            })
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Ok(Self::new(width, height, pixels))
    }

    /// Sample the texture at coordinates u, v in [0, 1].
    ///
    /// Nearest-pixel lookup, with (0, 0) at the bottom-left of the image.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = (u * (self.width - 1) as f32) as u32;
        let y = ((1.0 - v) * (self.height - 1) as f32) as u32;

        let p = self.pixels[(y * self.width + x) as usize];
        Vec3::new(p[0], p[1], p[2])
    }
}
