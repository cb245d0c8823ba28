//! Primary-ray generation over the image plane.

use glint_core::CameraConfig;
use glint_math::{Ray, Vec3};

/// Pinhole camera looking down -z.
///
/// The image plane is a rectangle of world units at `plane_dist` in front
/// of the eye, divided into image_width x image_height cells; one ray (or
/// four anti-aliasing subsample rays) leaves the eye through each cell.
#[derive(Clone, Debug)]
pub struct Camera {
    eye: Vec3,
    x_min: f32,
    y_min: f32,
    cell_x: f32,
    cell_y: f32,
    plane_dist: f32,
    pub image_width: u32,
    pub image_height: u32,
}

impl Camera {
    /// Create a camera from its configuration.
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            eye: config.eye,
            x_min: -config.plane_width * 0.5,
            y_min: -config.plane_height * 0.5,
            cell_x: config.plane_width / config.image_width as f32,
            cell_y: config.plane_height / config.image_height as f32,
            plane_dist: config.plane_dist,
            image_width: config.image_width,
            image_height: config.image_height,
        }
    }

    /// Ray through the center of pixel (i, j). Row 0 is the top of the
    /// frame.
    pub fn primary_ray(&self, i: u32, j: u32) -> Ray {
        let (xp, yp) = self.cell_origin(i, j);
        self.ray_through(xp + 0.5 * self.cell_x, yp + 0.5 * self.cell_y)
    }

    /// The four anti-aliasing subsample rays for pixel (i, j): the cell
    /// center shifted a quarter cell toward each corner.
    pub fn subsample_rays(&self, i: u32, j: u32) -> [Ray; 4] {
        let (xp, yp) = self.cell_origin(i, j);
        let offsets = [(-0.25, -0.25), (0.25, -0.25), (0.25, 0.25), (-0.25, 0.25)];

        offsets.map(|(ox, oy)| {
            self.ray_through(
                xp + (0.5 + ox) * self.cell_x,
                yp + (0.5 + oy) * self.cell_y,
            )
        })
    }

    /// Plane coordinates of the lower-left corner of pixel (i, j).
    fn cell_origin(&self, i: u32, j: u32) -> (f32, f32) {
        // Flip rows: image row 0 maps to the top row of the plane
        let row = self.image_height - 1 - j;
        (
            self.x_min + i as f32 * self.cell_x,
            self.y_min + row as f32 * self.cell_y,
        )
    }

    fn ray_through(&self, x: f32, y: f32) -> Ray {
        Ray::new(self.eye, Vec3::new(x, y, -self.plane_dist))
    }
}
