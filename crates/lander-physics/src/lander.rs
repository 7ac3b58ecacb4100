// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The lander rigid body.

use lander_core::math::{Quat, Vec3};
use lander_geom::Aabb;

use crate::body::{usable_dt, Kinematics, PhysicsObject, StepOutcome};
use crate::error::PhysicsError;

/// Default lander mass.
pub const DEFAULT_MASS: f32 = 10.0;
/// Default lander radius.
pub const DEFAULT_RADIUS: f32 = 3.0;
/// Default damping shared by every body.
pub const DEFAULT_DAMPING: f32 = 0.99;

/// Validates the parameters every body shares.
pub(crate) fn check_body_params(mass: f32, radius: f32, damping: f32) -> Result<(), PhysicsError> {
    if mass.is_nan() || mass <= 0.0 {
        return Err(PhysicsError::NonPositiveMass(mass));
    }
    if radius.is_nan() || radius <= 0.0 {
        return Err(PhysicsError::NonPositiveRadius(radius));
    }
    if !(0.0..=1.0).contains(&damping) || damping == 0.0 {
        return Err(PhysicsError::DampingOutOfRange(damping));
    }
    Ok(())
}

/// Rigid body with linear motion and yaw about `+Y`.
///
/// The collision volume is an axis-aligned box of `half_extents` around the
/// position; yaw does not rotate it.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    kinematics: Kinematics,
    half_extents: Vec3,
}

impl RigidBody {
    /// Lander at rest at `position` with default mass, radius, and damping.
    pub fn new(position: Vec3) -> Self {
        Self {
            kinematics: Kinematics::at_rest(position, DEFAULT_MASS, DEFAULT_RADIUS, DEFAULT_DAMPING),
            half_extents: Vec3::splat(1.0),
        }
    }

    /// Lander with explicit physical parameters.
    ///
    /// # Errors
    /// Rejects non-positive mass or radius and damping outside `(0, 1]`.
    pub fn with_params(
        position: Vec3,
        mass: f32,
        radius: f32,
        damping: f32,
        half_extents: Vec3,
    ) -> Result<Self, PhysicsError> {
        check_body_params(mass, radius, damping)?;
        Ok(Self {
            kinematics: Kinematics::at_rest(position, mass, radius, damping),
            half_extents,
        })
    }

    /// Moves the body without touching its velocity.
    pub fn set_position(&mut self, position: Vec3) {
        self.kinematics.position = position;
    }

    /// Yaw in degrees.
    pub fn rotation(&self) -> f32 {
        self.kinematics.rotation
    }

    /// Sets the yaw in degrees.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.kinematics.rotation = degrees;
    }

    /// Overwrites the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.kinematics.velocity = velocity;
    }

    /// Linear speed.
    pub fn speed(&self) -> f32 {
        self.kinematics.speed()
    }

    /// Collision half-extents.
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Axis-aligned collision box around the current position.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.kinematics.position, self.half_extents)
    }

    fn heading(&self, local: Vec3) -> Vec3 {
        Quat::yaw(self.kinematics.rotation).rotate(&local)
    }

    /// Local `+Z` rotated by the current yaw.
    pub fn forward(&self) -> Vec3 {
        self.heading(Vec3::UNIT_Z)
    }

    /// Opposite of [`RigidBody::forward`].
    pub fn backward(&self) -> Vec3 {
        self.heading(Vec3::new(0.0, 0.0, -1.0))
    }

    /// Local `+X` rotated by the current yaw.
    pub fn left(&self) -> Vec3 {
        self.heading(Vec3::UNIT_X)
    }

    /// Opposite of [`RigidBody::left`].
    pub fn right(&self) -> Vec3 {
        self.heading(Vec3::new(-1.0, 0.0, 0.0))
    }
}

impl PhysicsObject for RigidBody {
    fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.kinematics
    }

    fn integrate(&mut self, dt: f32) -> StepOutcome {
        if !usable_dt(dt) {
            return StepOutcome::Skipped;
        }
        self.kinematics.integrate_linear(dt);
        self.kinematics.integrate_angular(dt);
        self.kinematics.clear_forces();
        StepOutcome::Advanced
    }
}
