// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use lander_core::math::Vec3;

/// Ray in parametric form `p(t) = origin + t·direction`.
///
/// `direction` need not be unit length; `t` is then measured in multiples of
/// the direction vector rather than world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Creates a ray from an origin and a direction.
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray pointing straight down (`-Y`) from `origin`.
    pub const fn downward(origin: Vec3) -> Self {
        Self::new(origin, Vec3::new(0.0, -1.0, 0.0))
    }

    /// Returns the origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Evaluates the ray at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin.add(&self.direction.scale(t))
    }
}
