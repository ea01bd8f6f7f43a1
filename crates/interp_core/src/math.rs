//! Unclamped interpolation primitives.
//!
//! Everything here deliberately accepts `t` outside `[0, 1]`: the kernel
//! extrapolates past the newest snapshot when the buffer runs dry, and a
//! clamped blend would visibly freeze motion instead.

use glam::{Quat, Vec3};

/// `a + (b - a) * t` without clamping `t`.
#[must_use]
pub fn lerp_unclamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `f64` variant used for timestamp blending.
#[must_use]
pub fn lerp_unclamped_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Component-wise unclamped lerp.
#[must_use]
pub fn lerp_unclamped_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        lerp_unclamped(a.x, b.x, t),
        lerp_unclamped(a.y, b.y, t),
        lerp_unclamped(a.z, b.z, t),
    )
}

/// Inverse of [`lerp_unclamped_f64`]: the parameter `t` at which `v` sits
/// between `a` and `b`. Callers guarantee `a < b`.
#[must_use]
pub fn inverse_lerp_unclamped(a: f64, b: f64, v: f64) -> f64 {
    debug_assert!(a < b, "inverse lerp needs a strictly increasing interval");
    (v - a) / (b - a)
}

/// Threshold below which the sin-based slerp weights degenerate.
const SLERP_PARALLEL_EPS: f32 = 1e-6;

/// Shortest-arc spherical interpolation that extrapolates for `t` outside
/// `[0, 1]`.
///
/// A linear quaternion blend skews angles once `t` leaves the unit interval
/// (0° to 60° at `t = 1.5` lands near 86°); the spherical form yields the
/// expected 90°. For nearly parallel inputs the arc is tiny and a normalized
/// linear blend is exact to within float precision, so we fall back to it
/// there.
#[must_use]
pub fn slerp_unclamped(from: Quat, to: Quat, t: f32) -> Quat {
    let mut cos_theta = from.dot(to);
    let mut to = to;
    // Take the short way around: q and -q are the same rotation.
    if cos_theta < 0.0 {
        to = -to;
        cos_theta = -cos_theta;
    }
    if cos_theta > 1.0 - SLERP_PARALLEL_EPS {
        return (from + (to - from) * t).normalize();
    }
    let theta = cos_theta.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let w_from = ((1.0 - t) * theta).sin() / sin_theta;
    let w_to = (t * theta).sin() / sin_theta;
    (from * w_from + to * w_to).normalize()
}
