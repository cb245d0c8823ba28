//! Finite open cylinder primitive.

use glint_core::Material;
use glint_math::{Ray, Vec3};

use crate::primitive::{Primitive, SELF_INTERSECT_EPS, TANGENT_EPS};

/// A vertical cylinder standing on `center`, extending `height` upward.
///
/// Only the lateral surface is intersectable; the caps are open.
pub struct Cylinder {
    center: Vec3,
    radius: f32,
    height: f32,
    material: Material,
}

impl Cylinder {
    /// Create a new cylinder. `radius` and `height` must be positive.
    pub fn new(center: Vec3, radius: f32, height: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            height,
            material,
        }
    }

    fn in_band(&self, y: f32) -> bool {
        y >= self.center.y && y <= self.center.y + self.height
    }
}

impl Primitive for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        // Quadratic of the infinite cylinder, restricted to x/z
        let dx = ray.direction.x;
        let dz = ray.direction.z;
        let ox = ray.origin.x - self.center.x;
        let oz = ray.origin.z - self.center.z;

        let a = dx * dx + dz * dz;
        let b = 2.0 * (dx * ox + dz * oz);
        let c = ox * ox + oz * oz - self.radius * self.radius;

        let delta = b * b - 4.0 * a * c;
        // Near-tangent intersections are counted as non-existent
        if delta.abs() < TANGENT_EPS || delta < 0.0 {
            return None;
        }

        let sqrt_d = delta.sqrt();
        let t1 = (-b - sqrt_d) / (2.0 * a);
        let t2 = (-b + sqrt_d) / (2.0 * a);
        if t1.abs() < SELF_INTERSECT_EPS || t2.abs() < SELF_INTERSECT_EPS {
            return None;
        }

        // Clip both roots against the band; the near root wins when valid
        if !self.in_band(ray.at(t1).y) {
            if self.in_band(ray.at(t2).y) {
                Some(t2)
            } else {
                None
            }
        } else {
            Some(t1)
        }
    }

    /// The lateral normal has no component along the axis.
    fn normal(&self, point: Vec3) -> Vec3 {
        Vec3::new(point.x - self.center.x, 0.0, point.z - self.center.z).normalize()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
