//! Frame assembly: per-pixel tracing, image buffer, PNG output.

use std::path::Path;

use glint_math::Vec3;

use crate::camera::Camera;
use crate::scene::Scene;
use crate::tracer::Tracer;
use glint_core::RenderSettings;

/// Trace one pixel, averaging the anti-aliasing subsamples when enabled.
pub fn render_pixel(tracer: &Tracer, camera: &Camera, i: u32, j: u32) -> Vec3 {
    if tracer.settings().antialias {
        let rays = camera.subsample_rays(i, j);
        let sum = rays
            .iter()
            .fold(Vec3::ZERO, |acc, ray| acc + tracer.trace(ray, 1));
        sum / rays.len() as f32
    } else {
        tracer.trace(&camera.primary_ray(i, j), 1)
    }
}

/// Render the whole frame single-threaded.
pub fn render(scene: &Scene, camera: &Camera, settings: &RenderSettings) -> ImageBuffer {
    let tracer = Tracer::new(scene, settings);
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for j in 0..camera.image_height {
        for i in 0..camera.image_width {
            image.set(i, j, render_pixel(&tracer, camera, i, j));
        }
    }

    image
}

/// Convert a traced color to 8-bit RGBA, clamping to [0, 1].
///
/// No gamma is applied: traced values are already display-referred.
pub fn color_to_rgba(color: Vec3) -> [u8; 4] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Vec3>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the buffer to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path.as_ref(),
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use glint_core::{CameraConfig, Material};

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(2, 1, Vec3::new(0.5, 0.25, 1.0));

        assert_eq!(image.get(2, 1), Vec3::new(0.5, 0.25, 1.0));
        assert_eq!(image.get(0, 0), Vec3::ZERO);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Vec3::new(2.0, -1.0, 0.5)), [255, 0, 127, 255]);
        assert_eq!(color_to_rgba(Vec3::ONE), [255, 255, 255, 255]);
    }

    #[test]
    fn test_render_hits_centered_sphere() {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -60.0),
            10.0,
            Material::new(Vec3::new(1.0, 0.0, 0.0)).with_specular(false),
        )));

        let camera = Camera::new(&CameraConfig {
            image_width: 9,
            image_height: 9,
            ..Default::default()
        });
        let settings = RenderSettings {
            background: Vec3::ZERO,
            fog_near: 0.0,
            fog_far: -1.0e9,
            ..Default::default()
        };

        let image = render(&scene, &camera, &settings);

        // Center pixel sees the red sphere, the corner sees background
        assert!(image.get(4, 4).x > 0.0);
        assert_eq!(image.get(0, 0), Vec3::ZERO);
    }
}
