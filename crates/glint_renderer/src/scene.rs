//! Scene: the primitive collection and closest-hit resolution.

use glint_core::{SceneConfig, ShapeConfig};
use glint_math::{Ray, Vec3};

use crate::cylinder::Cylinder;
use crate::plane::Plane;
use crate::primitive::Primitive;
use crate::sphere::Sphere;

/// Record of the closest ray-primitive intersection.
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    /// Index of the hit primitive in the scene
    pub index: usize,
    /// Point of intersection
    pub point: Vec3,
    /// Distance from the ray origin to the intersection
    pub t: f32,
}

/// An insertion-ordered collection of primitives.
///
/// Indices are stable: the value returned by `add` identifies the same
/// primitive for the lifetime of the scene, and is the index reported in
/// `Hit`.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Primitive>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Build a scene from a validated description.
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut scene = Scene::new();
        for primitive in &config.primitives {
            let material = primitive.material.clone();
            match &primitive.shape {
                ShapeConfig::Sphere { center, radius } => {
                    scene.add(Box::new(Sphere::new(*center, *radius, material)));
                }
                ShapeConfig::Plane { vertices } => {
                    if vertices.len() == 3 {
                        scene.add(Box::new(Plane::triangle(
                            vertices[0],
                            vertices[1],
                            vertices[2],
                            material,
                        )));
                    } else {
                        scene.add(Box::new(Plane::quad(
                            vertices[0],
                            vertices[1],
                            vertices[2],
                            vertices[3],
                            material,
                        )));
                    }
                }
                ShapeConfig::Cylinder {
                    center,
                    radius,
                    height,
                } => {
                    scene.add(Box::new(Cylinder::new(*center, *radius, *height, material)));
                }
            }
        }
        log::debug!("Built scene with {} primitives", scene.len());
        scene
    }

    /// Add a primitive and return its stable index.
    pub fn add(&mut self, object: Box<dyn Primitive>) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Get the primitive at an index.
    pub fn get(&self, index: usize) -> &dyn Primitive {
        self.objects[index].as_ref()
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Resolve the closest hit of a ray against every primitive.
    ///
    /// A linear scan keeping the smallest strictly positive distance;
    /// negative distances (surfaces behind the origin) are discarded.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut best: Option<Hit> = None;

        for (index, object) in self.objects.iter().enumerate() {
            if let Some(t) = object.intersect(ray) {
                if t > 0.0 && best.map_or(true, |hit| t < hit.t) {
                    best = Some(Hit {
                        index,
                        point: ray.at(t),
                        t,
                    });
                }
            }
        }

        best
    }
}
