//! Recursive shading: local illumination, shadows, reflection,
//! refraction, transparency, and depth fog.

use glint_core::RenderSettings;
use glint_math::{Ray, Vec3};

use crate::primitive::Primitive;
use crate::scene::{Hit, Scene};
use crate::shading::{phong, reflect, refract};

/// Recursive ray shader over a scene.
///
/// Holds no state beyond borrows of the scene and settings; tracing is a
/// pure function of the ray, so a single tracer can shade rays from many
/// threads at once.
pub struct Tracer<'a> {
    scene: &'a Scene,
    settings: &'a RenderSettings,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, settings: &'a RenderSettings) -> Self {
        Self { scene, settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        self.settings
    }

    /// Color seen along a ray.
    ///
    /// `depth` is 1 for primary rays and increases with every recursive
    /// cast; secondary effects stop once it reaches the configured
    /// maximum, which bounds the recursion even between facing mirrors.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Vec3 {
        let s = self.settings;

        let hit = match self.scene.closest_hit(ray) {
            Some(hit) => hit,
            None => return s.background,
        };
        let object = self.scene.get(hit.index);
        let material = object.material();
        let base = material.base_color(hit.point);
        let normal = object.normal(hit.point);

        let mut color = phong(
            material,
            base,
            normal,
            s.light,
            -ray.direction,
            hit.point,
            s.ambient,
        );

        // Any occluder strictly closer than the light puts the point in
        // shadow: ambient only.
        let light_vec = s.light - hit.point;
        let shadow_ray = Ray::new(hit.point, light_vec);
        if let Some(shadow_hit) = self.scene.closest_hit(&shadow_ray) {
            if shadow_hit.t < light_vec.length() {
                color = s.ambient * base;
            }
        }

        if depth < s.max_depth {
            if let Some(rho) = material.reflectivity {
                let reflected = Ray::new(hit.point, reflect(ray.direction, normal));
                color += rho * self.trace(&reflected, depth + 1);
            }

            if let Some(ior) = material.refraction {
                // The refracted branch replaces everything accumulated so
                // far, fog included.
                return self.refracted(ray, object, &hit, normal, ior, depth);
            }

            if let Some(coeff) = material.transparency {
                color += coeff * self.trace(ray, depth + 1);
            }
        }

        // Depth fog toward white; the blend factor is deliberately left
        // unclamped outside the fog range.
        let t = (hit.point.z - s.fog_near) / (s.fog_far - s.fog_near);
        (1.0 - t) * color + t * Vec3::ONE
    }

    /// Two-surface refraction: bend into the primitive at the entry point,
    /// bend back out at the interior ray's next hit, and trace onward from
    /// there.
    fn refracted(
        &self,
        ray: &Ray,
        object: &dyn Primitive,
        entry: &Hit,
        normal: Vec3,
        ior: f32,
        depth: u32,
    ) -> Vec3 {
        let eta = 1.0 / ior;
        let interior = Ray::new(entry.point, refract(ray.direction, normal, eta));

        match self.scene.closest_hit(&interior) {
            Some(exit) => {
                // The exit surface of the primitive that was entered; its
                // normal is inverted to face the interior ray.
                let exit_normal = object.normal(exit.point);
                let out = refract(interior.direction, -exit_normal, ior);
                self.trace(&Ray::new(exit.point, out), depth + 1)
            }
            // The interior ray left the scene without finding an exit
            // surface; trace it as-is.
            None => self.trace(&interior, depth + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::Plane;
    use crate::scene::Scene;
    use crate::sphere::Sphere;
    use glint_core::Material;

    /// Settings with a fog range so deep the blend factor is effectively
    /// zero where the tests hit. Fog-specific tests override the range.
    fn settings() -> RenderSettings {
        RenderSettings {
            fog_near: 0.0,
            fog_far: -1.0e9,
            ..Default::default()
        }
    }

    fn floor_quad(material: Material) -> Box<Plane> {
        Box::new(Plane::quad(
            Vec3::new(-50.0, -15.0, -40.0),
            Vec3::new(50.0, -15.0, -40.0),
            Vec3::new(50.0, -15.0, -200.0),
            Vec3::new(-50.0, -15.0, -200.0),
            material,
        ))
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::new();
        let s = settings();
        let tracer = Tracer::new(&scene, &s);

        let color = tracer.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)), 1);
        assert_eq!(color, s.background);
    }

    #[test]
    fn test_occluder_forces_ambient_shadow() {
        let mut scene = Scene::new();
        let material = Material::new(Vec3::new(0.8, 0.2, 0.2)).with_specular(false);
        scene.add(floor_quad(material.clone()));
        // A sphere sitting between the floor point and the light
        scene.add(Box::new(Sphere::new(
            Vec3::new(2.0, -4.0, -80.6),
            5.0,
            Material::default(),
        )));

        let s = settings();
        let tracer = Tracer::new(&scene, &s);

        // Straight down at the floor point beneath the occluder
        let ray = Ray::new(Vec3::new(0.0, 20.0, -100.0), Vec3::new(0.0, -1.0, 0.0));
        let lit_ray = Ray::new(Vec3::new(-40.0, 20.0, -100.0), Vec3::new(0.0, -1.0, 0.0));

        let shadowed = tracer.trace(&ray, 1);
        let lit = tracer.trace(&lit_ray, 1);

        // The shadowed point collapses to ambient x base
        assert!((shadowed - s.ambient * material.color).length() < 1e-4);
        // An unoccluded point on the same floor is strictly brighter
        assert!(lit.x > shadowed.x);
    }

    #[test]
    fn test_facing_mirrors_terminate_at_depth_bound() {
        let mut scene = Scene::new();
        let mirror = Material::new(Vec3::new(0.1, 0.1, 0.1))
            .with_specular(false)
            .with_reflectivity(1.0);
        // Two parallel mirrors facing each other across z
        scene.add(Box::new(Plane::quad(
            Vec3::new(-50.0, -50.0, -100.0),
            Vec3::new(50.0, -50.0, -100.0),
            Vec3::new(50.0, 50.0, -100.0),
            Vec3::new(-50.0, 50.0, -100.0),
            mirror.clone(),
        )));
        scene.add(Box::new(Plane::quad(
            Vec3::new(50.0, -50.0, -20.0),
            Vec3::new(-50.0, -50.0, -20.0),
            Vec3::new(-50.0, 50.0, -20.0),
            Vec3::new(50.0, 50.0, -20.0),
            mirror,
        )));

        let s = settings();
        let tracer = Tracer::new(&scene, &s);

        let ray = Ray::new(Vec3::new(0.0, 0.0, -60.0), Vec3::new(0.01, 0.0, -1.0));
        let color = tracer.trace(&ray, 1);

        assert!(color.is_finite());

        // Each allowed bounce adds a contribution: deeper limits give
        // strictly more accumulated color
        let shallow = RenderSettings {
            max_depth: 1,
            ..settings()
        };
        let shallow_color = Tracer::new(&scene, &shallow).trace(&ray, 1);
        assert!(color.x > shallow_color.x);
    }

    #[test]
    fn test_fog_identity_at_near_bound_and_white_at_far_bound() {
        let mut scene = Scene::new();
        let material = Material::new(Vec3::new(0.3, 0.6, 0.1)).with_specular(false);
        // Two small spheres, one at each fog bound
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -77.0),
            2.0,
            material.clone(),
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(40.0, 0.0, -152.0),
            2.0,
            material.clone(),
        )));

        let s = RenderSettings {
            fog_near: -75.0,
            fog_far: -150.0,
            ..Default::default()
        };
        let unfogged = settings();

        let near_ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let far_ray = Ray::new(Vec3::new(40.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));

        // Hit points land exactly on z = -75 and z = -150
        let near = Tracer::new(&scene, &s).trace(&near_ray, 1);
        let near_reference = Tracer::new(&scene, &unfogged).trace(&near_ray, 1);
        assert!((near - near_reference).length() < 1e-4);

        let far = Tracer::new(&scene, &s).trace(&far_ray, 1);
        assert!((far - Vec3::ONE).length() < 1e-3);
    }

    #[test]
    fn test_lit_reflective_sphere_outshines_ambient() {
        let mut scene = Scene::new();
        let blue = Material::new(Vec3::new(0.0, 0.0, 1.0)).with_reflectivity(0.8);
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -130.0),
            15.0,
            blue.clone(),
        )));

        let s = settings();
        let tracer = Tracer::new(&scene, &s);

        // Through the sphere's center
        let color = tracer.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)), 1);

        // Lit blue plus the reflected background: strictly brighter in
        // blue than the ambient-only value
        let ambient_only = s.ambient * blue.color;
        assert!(color.z > ambient_only.z);
        // The reflection of the white background contributes to red/green
        assert!(color.x > 0.0);
    }

    #[test]
    fn test_transparency_adds_recursive_contribution() {
        let mut scene = Scene::new();
        let glass = Material::new(Vec3::new(0.0, 0.3, 0.3))
            .with_specular(false)
            .with_transparency(1.0);
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -70.0),
            4.0,
            glass,
        )));

        let s = settings();
        let opaque = RenderSettings {
            max_depth: 1,
            ..settings()
        };

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let with_transparency = Tracer::new(&scene, &s).trace(&ray, 1);
        let without = Tracer::new(&scene, &opaque).trace(&ray, 1);

        assert!(with_transparency.x >= without.x);
        assert!(with_transparency.length() > without.length());
    }

    #[test]
    fn test_refraction_overrides_local_color() {
        // A unity-index sphere bends nothing, so the traced color must
        // equal the view past it, not a blend with the sphere's own color.
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -70.0),
            4.0,
            Material::new(Vec3::new(1.0, 0.0, 0.0)).with_refraction(1.0),
        )));
        let wall = Material::new(Vec3::new(0.0, 0.7, 0.0)).with_specular(false);
        scene.add(Box::new(Plane::quad(
            Vec3::new(-50.0, -50.0, -120.0),
            Vec3::new(50.0, -50.0, -120.0),
            Vec3::new(50.0, 50.0, -120.0),
            Vec3::new(-50.0, 50.0, -120.0),
            wall.clone(),
        )));

        let mut reference_scene = Scene::new();
        reference_scene.add(Box::new(Plane::quad(
            Vec3::new(-50.0, -50.0, -120.0),
            Vec3::new(50.0, -50.0, -120.0),
            Vec3::new(50.0, 50.0, -120.0),
            Vec3::new(-50.0, 50.0, -120.0),
            wall,
        )));

        let s = settings();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let through_sphere = Tracer::new(&scene, &s).trace(&ray, 1);
        let direct = Tracer::new(&reference_scene, &s).trace(&ray, 1);

        // No red from the sphere's own material leaks in
        assert!((through_sphere - direct).length() < 1e-3);
    }
}
