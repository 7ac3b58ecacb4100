// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared kinematic state and the semi-implicit Euler integrator.
//!
//! Both simulated object kinds (the lander and exhaust particles) carry a
//! [`Kinematics`] record. Forces write into its accumulators between steps;
//! [`PhysicsObject::integrate`] consumes them and clears them again.

use lander_core::math::Vec3;

/// Result of one integration call.
///
/// Marked `#[must_use]` so callers cannot silently ignore a skipped step.
#[must_use]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// State advanced and accumulators were cleared.
    Advanced,
    /// `dt` was zero, negative, NaN, or infinite; nothing changed.
    Skipped,
}

impl StepOutcome {
    /// Returns `true` for [`StepOutcome::Advanced`].
    pub fn advanced(self) -> bool {
        matches!(self, Self::Advanced)
    }
}

/// Position, velocity, and force accumulators for a single body.
///
/// Rotation is a yaw angle about `+Y` in degrees; angular velocity is in
/// degrees per second. Fields are public so forces and the world can update
/// them directly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Kinematics {
    /// World-space position.
    pub position: Vec3,
    /// Linear velocity in units per second.
    pub velocity: Vec3,
    /// Yaw about `+Y`, in degrees.
    pub rotation: f32,
    /// Yaw rate, in degrees per second.
    pub angular_velocity: f32,
    /// Multiplicative damping applied to both velocities every step.
    pub damping: f32,
    /// Mass; must be positive.
    pub mass: f32,
    /// Radius used to convert torque into tangential force.
    pub radius: f32,
    /// Linear force accumulated since the last step.
    pub force: Vec3,
    /// Tangential force accumulated since the last step.
    pub tangential_force: Vec3,
}

impl Kinematics {
    /// At rest at `position` with the given mass, radius, and damping.
    pub fn at_rest(position: Vec3, mass: f32, radius: f32, damping: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            damping,
            mass,
            radius,
            force: Vec3::ZERO,
            tangential_force: Vec3::ZERO,
        }
    }

    /// Adds a linear force to the accumulator.
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Adds a tangential force to the accumulator.
    pub fn add_tangential_force(&mut self, force: Vec3) {
        self.tangential_force += force;
    }

    /// Clears both accumulators.
    pub fn clear_forces(&mut self) {
        self.force = Vec3::ZERO;
        self.tangential_force = Vec3::ZERO;
    }

    /// Linear speed.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Linear step: position from the old velocity, then velocity from the
    /// accumulated force, then damping.
    pub(crate) fn integrate_linear(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        let acceleration = self.force * (1.0 / self.mass);
        self.velocity += acceleration * dt;
        self.velocity *= self.damping;
    }

    /// Angular step. The tangential accumulator is turned into an angular
    /// acceleration whose magnitude drives the yaw rate; a positive `y`
    /// component turns clockwise (negative yaw rate).
    pub(crate) fn integrate_angular(&mut self, dt: f32) {
        self.rotation += self.angular_velocity * dt;
        let angular_acceleration = self.tangential_force * (1.0 / (self.mass * self.radius));
        let direction = if angular_acceleration.y() > 0.0 {
            -1.0
        } else {
            1.0
        };
        self.angular_velocity += direction * angular_acceleration.length() * dt;
        self.angular_velocity *= self.damping;
    }
}

/// Returns `true` when `dt` can advance a simulation.
pub(crate) fn usable_dt(dt: f32) -> bool {
    dt.is_finite() && dt > 0.0
}

mod sealed {
    /// Restricts [`super::PhysicsObject`] to the body kinds defined here.
    pub trait Sealed {}
    impl Sealed for crate::lander::RigidBody {}
    impl Sealed for crate::particle::Particle {}
}

/// A body that forces can act on and the integrator can advance.
///
/// Sealed: the only implementors are [`crate::RigidBody`] and
/// [`crate::Particle`].
pub trait PhysicsObject: sealed::Sealed {
    /// Read access to the kinematic state.
    fn kinematics(&self) -> &Kinematics;

    /// Write access to the kinematic state.
    fn kinematics_mut(&mut self) -> &mut Kinematics;

    /// Advances the body by `dt` seconds and clears its accumulators.
    ///
    /// Non-finite or non-positive `dt` leaves the body, accumulators
    /// included, untouched and returns [`StepOutcome::Skipped`].
    fn integrate(&mut self, dt: f32) -> StepOutcome;

    /// World-space position.
    fn position(&self) -> Vec3 {
        self.kinematics().position
    }

    /// Linear velocity.
    fn velocity(&self) -> Vec3 {
        self.kinematics().velocity
    }
}
