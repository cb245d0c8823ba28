//! Bucketed parallel rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! across the rayon pool and blitted back into one buffer. Tracing is a
//! pure function of the ray, so workers share the scene with no locking.

use rayon::prelude::*;

use glint_core::RenderSettings;
use glint_math::Vec3;

use crate::camera::Camera;
use crate::renderer::{render_pixel, ImageBuffer};
use crate::scene::Scene;
use crate::tracer::Tracer;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of the bucket's top-left corner
    pub x: u32,
    /// Y coordinate of the bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate the grid of buckets covering an image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh));
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, tracer: &Tracer, camera: &Camera) -> Vec<Vec3> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(tracer, camera, bucket.x + local_x, bucket.y + local_y);
            pixels.push(color);
        }
    }

    pixels
}

/// Render the frame with buckets distributed across the rayon pool.
///
/// Produces the same image as `render`, bucket by bucket.
pub fn render_parallel(scene: &Scene, camera: &Camera, settings: &RenderSettings) -> ImageBuffer {
    let tracer = Tracer::new(scene, settings);
    let buckets = generate_buckets(camera.image_width, camera.image_height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "Rendering {}x{} in {} buckets",
        camera.image_width,
        camera.image_height,
        buckets.len()
    );

    let results: Vec<(Bucket, Vec<Vec3>)> = buckets
        .par_iter()
        .map(|bucket| (*bucket, render_bucket(bucket, &tracer, camera)))
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for (bucket, pixels) in results {
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = pixels[(local_y * bucket.width + local_x) as usize];
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    image
}
