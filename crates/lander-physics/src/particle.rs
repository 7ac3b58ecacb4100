// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Exhaust particles.

use lander_core::math::Vec3;

use crate::body::{usable_dt, Kinematics, PhysicsObject, StepOutcome};

/// Default particle lifespan in seconds.
pub const DEFAULT_LIFESPAN: f32 = 5.0;
/// Default particle radius.
pub const DEFAULT_RADIUS: f32 = 0.1;
/// Default particle mass.
pub const DEFAULT_MASS: f32 = 1.0;

/// Short-lived point mass. Age is measured against the simulation clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    /// Kinematic state; particles ignore the angular fields.
    pub kinematics: Kinematics,
    /// Seconds the particle survives after `birthtime`.
    pub lifespan: f32,
    /// Simulation time the particle was spawned at.
    pub birthtime: f32,
}

impl Particle {
    /// Particle with default mass, radius, damping, and lifespan, born at `0`.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        let mut kinematics = Kinematics::at_rest(
            position,
            DEFAULT_MASS,
            DEFAULT_RADIUS,
            crate::lander::DEFAULT_DAMPING,
        );
        kinematics.velocity = velocity;
        Self {
            kinematics,
            lifespan: DEFAULT_LIFESPAN,
            birthtime: 0.0,
        }
    }

    /// Seconds elapsed since `birthtime`.
    pub fn age(&self, now: f32) -> f32 {
        now - self.birthtime
    }

    /// A particle expires once its age strictly exceeds its lifespan.
    pub fn is_expired(&self, now: f32) -> bool {
        self.age(now) > self.lifespan
    }
}

impl PhysicsObject for Particle {
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
        self.kinematics.clear_forces();
        StepOutcome::Advanced
    }
}
