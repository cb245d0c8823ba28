//! Bounded planar polygon primitive (quad or triangle).

use glint_core::Material;
use glint_math::{Ray, Vec3};

use crate::primitive::{Primitive, PLANE_EPS};

/// A bounded convex polygon: a quadrilateral or triangle in 3D.
///
/// The surface normal is fixed by the vertex winding (counter-clockwise
/// seen from the front) and is the same at every point.
pub struct Plane {
    vertices: Vec<Vec3>,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Quadrilateral from four coplanar vertices in winding order.
    pub fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3, material: Material) -> Self {
        Self::from_vertices(vec![a, b, c, d], material)
    }

    /// Triangle from three vertices in winding order.
    pub fn triangle(a: Vec3, b: Vec3, c: Vec3, material: Material) -> Self {
        Self::from_vertices(vec![a, b, c], material)
    }

    fn from_vertices(vertices: Vec<Vec3>, material: Material) -> Self {
        let a = vertices[0];
        let normal = (vertices[1] - a)
            .cross(vertices[vertices.len() - 1] - a)
            .normalize();
        Self {
            vertices,
            normal,
            material,
        }
    }

    /// Whether a point on the carrier plane lies inside the polygon.
    ///
    /// Walks the edges and requires the point to sit on the inner side of
    /// each one; points exactly on an edge are excluded.
    fn contains(&self, point: Vec3) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let edge = self.vertices[(i + 1) % n] - self.vertices[i];
            let to_point = point - self.vertices[i];
            if edge.cross(to_point).dot(self.normal) <= 0.0 {
                return false;
            }
        }
        true
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < PLANE_EPS {
            return None;
        }

        let t = (self.vertices[0] - ray.origin).dot(self.normal) / denom;
        if t.abs() < PLANE_EPS {
            return None;
        }

        if self.contains(ray.at(t)) {
            Some(t)
        } else {
            None
        }
    }

    fn normal(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The floor quad from the demo scene: y = -15, x in [-50, 50],
    /// z in [-200, -40].
    fn floor() -> Plane {
        Plane::quad(
            Vec3::new(-50.0, -15.0, -40.0),
            Vec3::new(50.0, -15.0, -40.0),
            Vec3::new(50.0, -15.0, -200.0),
            Vec3::new(-50.0, -15.0, -200.0),
            Material::default(),
        )
    }

    #[test]
    fn test_hit_inside_quad() {
        let plane = floor();
        // Straight down from above the middle of the floor
        let ray = Ray::new(Vec3::new(0.0, 0.0, -100.0), Vec3::new(0.0, -1.0, 0.0));

        let t = plane.intersect(&ray).unwrap();
        assert!((t - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_constant_normal() {
        let plane = floor();

        let n = plane.normal(Vec3::new(10.0, -15.0, -60.0));
        assert!((n - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);
        assert_eq!(n, plane.normal(Vec3::new(-30.0, -15.0, -190.0)));
    }

    #[test]
    fn test_miss_outside_quad() {
        let plane = floor();
        // Hits the carrier plane at x = 80, outside the quad
        let ray = Ray::new(Vec3::new(80.0, 0.0, -100.0), Vec3::new(0.0, -1.0, 0.0));

        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_miss_parallel_ray() {
        let plane = floor();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -100.0), Vec3::new(1.0, 0.0, 0.0));

        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_containment() {
        let triangle = Plane::triangle(
            Vec3::new(-10.0, 0.0, -60.0),
            Vec3::new(0.0, 0.0, -60.0),
            Vec3::new(-5.0, 10.0, -65.0),
            Material::default(),
        );

        // Through the centroid
        let centroid = Vec3::new(-5.0, 10.0 / 3.0, -185.0 / 3.0);
        let toward = Ray::new(Vec3::ZERO, centroid);
        assert!(triangle.intersect(&toward).is_some());

        // Through a point clearly outside the triangle but on its plane
        let outside = Ray::new(Vec3::ZERO, Vec3::new(-20.0, 0.5, -60.25));
        assert!(triangle.intersect(&outside).is_none());
    }

    #[test]
    fn test_plane_behind_origin_reports_negative_t() {
        let plane = floor();
        // Pointing up, away from the floor: the carrier plane is behind
        let ray = Ray::new(Vec3::new(0.0, 0.0, -100.0), Vec3::new(0.0, 1.0, 0.0));

        let t = plane.intersect(&ray).unwrap();
        assert!(t < 0.0);
    }
}
