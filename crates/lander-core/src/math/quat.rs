// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::{deg_to_rad, Vec3, EPSILON};

/// Quaternion stored as `(x, y, z, w)`.
///
/// * Angles passed to [`Quat::from_axis_angle`] are radians; [`Quat::yaw`]
///   takes degrees because the lander tracks its heading in degrees.
/// * Only the rotation surface the simulation needs is provided: build from
///   axis/angle, compose, and rotate vectors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// Creates a quaternion from components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity quaternion when the axis length is ≤ `EPSILON`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len_sq = axis.length_squared();
        if len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        let norm_axis = axis.scale(1.0 / len_sq.sqrt());
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let scaled = norm_axis.scale(sin_half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), cos_half)
    }

    /// Rotation of `degrees` about the vertical (`+Y`) axis.
    pub fn yaw(degrees: f32) -> Self {
        Self::from_axis_angle(Vec3::UNIT_Y, deg_to_rad(degrees))
    }

    /// Hamilton product (`self * other`): applies `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;
        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Rotates `v` by this quaternion.
    ///
    /// Assumes a unit quaternion; uses `v' = v + w·t + q×t` with `t = 2·(q×v)`.
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        let [x, y, z, w] = self.data;
        let q = Vec3::new(x, y, z);
        let t = q.cross(v).scale(2.0);
        v.add(&t.scale(w)).add(&q.cross(&t))
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}
