// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Math helpers covering scalar utilities, vectors, yaw rotations, and
//! seeded pseudo-random numbers.
//!
//! All operations use `f32` to match the simulation's float32 state.

use std::f32::consts::TAU;

mod prng;
mod quat;
mod vec3;

pub use prng::Prng;
pub use quat::Quat;
pub use vec3::Vec3;

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;

/// Clamps `value` to the inclusive `[min, max]` range.
///
/// Swapped bounds are reordered rather than rejected.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    value.max(lo).min(hi)
}

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees with float32 precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_reorders_swapped_bounds() {
        assert_eq!(clamp(5.0, 2.0, 1.0), 2.0);
        assert_eq!(clamp(-5.0, 2.0, 1.0), 1.0);
        assert_eq!(clamp(1.5, 1.0, 2.0), 1.5);
    }
}
