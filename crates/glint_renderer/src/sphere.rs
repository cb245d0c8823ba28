//! Sphere primitive.

use glint_core::Material;
use glint_math::{Ray, Vec3};

use crate::primitive::{Primitive, SELF_INTERSECT_EPS, TANGENT_EPS};

/// A sphere with a center and radius.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        // Covers both no-root and near-tangent discriminants
        let delta = b * b - 4.0 * a * c;
        if delta < TANGENT_EPS {
            return None;
        }

        let sqrt_d = delta.sqrt();
        let t1 = (-b - sqrt_d) / (2.0 * a);
        let t2 = (-b + sqrt_d) / (2.0 * a);

        if t1 > SELF_INTERSECT_EPS {
            Some(t1)
        } else if t2 > SELF_INTERSECT_EPS {
            Some(t2)
        } else {
            None
        }
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
