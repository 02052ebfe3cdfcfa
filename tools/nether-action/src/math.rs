//! Matrix and quaternion helpers on top of glam
//!
//! Matrices use glam's column-vector convention: a child's world matrix is
//! `parent_world * child_local`.

use glam::{Mat4, Quat, Vec3};

/// Tolerance for general float comparisons
pub const EPSILON: f32 = 1.0e-4;

/// Translation, rotation and scale of an affine matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// Compare two floats with an absolute tolerance
#[inline]
pub fn floats_eq(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// Every component of `v` equals `value` within `tolerance`
pub fn all_eq(v: Vec3, value: f32, tolerance: f32) -> bool {
    v.to_array().iter().all(|&c| floats_eq(c, value, tolerance))
}

/// Vector is zero within `tolerance`
pub fn is_zero(v: Vec3, tolerance: f32) -> bool {
    all_eq(v, 0.0, tolerance)
}

/// Matrix equals identity within [`EPSILON`]
pub fn is_identity(m: &Mat4) -> bool {
    m.abs_diff_eq(Mat4::IDENTITY, EPSILON)
}

/// Quaternion is the identity rotation
///
/// x/y/z must be within `tolerance` of zero and w must round to 1. A
/// quaternion with w near -1 is treated as a rotation.
pub fn is_identity_rotation(q: Quat, tolerance: f32) -> bool {
    q.x.abs() <= tolerance
        && q.y.abs() <= tolerance
        && q.z.abs() <= tolerance
        && q.w.round() == 1.0
}

/// Split an affine matrix into translation, rotation and scale
pub fn decompose(m: &Mat4) -> Decomposed {
    let (scale, rotation, translation) = m.to_scale_rotation_translation();
    Decomposed {
        translation,
        rotation,
        scale,
    }
}
