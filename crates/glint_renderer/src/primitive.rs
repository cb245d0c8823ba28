//! Primitive trait for ray-object intersection.

use glint_core::Material;
use glint_math::{Ray, Vec3};

/// Roots closer to the ray origin than this are treated as the ray
/// re-hitting the surface it was spawned from, and rejected.
pub(crate) const SELF_INTERSECT_EPS: f32 = 1e-3;

/// Discriminants smaller than this mean a grazing hit; counted as a miss.
pub(crate) const TANGENT_EPS: f32 = 1e-3;

/// Threshold for the plane denominator (ray parallel to the plane) and
/// for plane roots at the ray origin.
pub(crate) const PLANE_EPS: f32 = 1e-4;

/// Trait for shapes that can be intersected by rays.
pub trait Primitive: Send + Sync {
    /// Distance along the ray to the surface, if the ray meets it.
    ///
    /// A returned distance may be negative (surface behind the origin);
    /// the closest-hit scan discards those. `None` covers every kind of
    /// miss: no real root, grazing hit, out-of-bounds hit point, or a
    /// root within the self-intersection guard.
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// Unit surface normal at a point assumed to lie on the surface.
    fn normal(&self, point: Vec3) -> Vec3;

    /// Surface attributes.
    fn material(&self) -> &Material;
}
