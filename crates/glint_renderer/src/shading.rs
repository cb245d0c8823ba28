//! Phong local illumination and secondary-ray direction helpers.

use glint_core::Material;
use glint_math::Vec3;

/// Phong lighting at a hit point.
///
/// Ambient plus diffuse plus an optional specular highlight, clamped to
/// [0, 1] per channel. `base` is the material color already resolved
/// through any procedural pattern, `view_dir` points back toward the ray
/// origin, and `normal` must be unit length.
pub fn phong(
    material: &Material,
    base: Vec3,
    normal: Vec3,
    light_pos: Vec3,
    view_dir: Vec3,
    hit: Vec3,
    ambient: f32,
) -> Vec3 {
    let light_dir = (light_pos - hit).normalize();
    let l_dot_n = light_dir.dot(normal).max(0.0);

    let mut color = ambient * base + l_dot_n * base;

    if material.specular {
        let refl = reflect(-light_dir, normal);
        let r_dot_v = refl.dot(view_dir);
        if r_dot_v > 0.0 {
            color += r_dot_v.powf(material.shininess) * Vec3::ONE;
        }
    }

    color.clamp(Vec3::ZERO, Vec3::ONE)
}

/// Mirror-reflect a vector about a unit normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `eta` is the ratio of refractive indices across the interface.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
