use crate::Vec3;

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalized at construction, so the parameter t of a
/// point along the ray is its Euclidean distance from the origin. Shadow
/// tests rely on this when comparing a hit distance against the distance
/// to the light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` need not be unit length.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}
