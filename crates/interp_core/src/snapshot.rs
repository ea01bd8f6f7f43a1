//! Timestamped pose snapshots and pose-level interpolation.

use crate::math::{lerp_unclamped_f64, lerp_unclamped_vec3, slerp_unclamped};
use glam::{Quat, Vec3};

/// A pose captured on the sending peer, stamped with the *sender's* clock in
/// seconds. Producers normalize `rotation` before constructing one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSnapshot {
    pub timestamp: f64,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl TransformSnapshot {
    #[must_use]
    pub fn new(timestamp: f64, position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            timestamp,
            position,
            rotation,
            scale,
        }
    }
}

/// Blend two snapshots at parameter `t`, which may exceed `[0, 1]`.
///
/// Position and scale blend component-wise; rotation blends spherically so
/// that extrapolation keeps sweeping the arc at a constant angular rate
/// instead of skewing the way a linear quaternion blend would.
#[must_use]
pub fn interpolate(from: &TransformSnapshot, to: &TransformSnapshot, t: f64) -> TransformSnapshot {
    #[allow(clippy::cast_possible_truncation)]
    let ts = t as f32;
    TransformSnapshot {
        timestamp: lerp_unclamped_f64(from.timestamp, to.timestamp, t),
        position: lerp_unclamped_vec3(from.position, to.position, ts),
        rotation: slerp_unclamped(from.rotation, to.rotation, ts),
        scale: lerp_unclamped_vec3(from.scale, to.scale, ts),
    }
}
