// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Force generators.
//!
//! A [`Force`] is one of a closed set of [`ForceKind`]s plus one-shot
//! bookkeeping. Applying a force only adds into the target's accumulators;
//! the integrator is what turns them into motion.
//!
//! The same force may be registered with several particle systems (and with
//! the lander), so forces are handed around as [`SharedForce`] handles and
//! tuned in place between frames.

use std::cell::RefCell;
use std::rc::Rc;

use lander_core::math::{Prng, Vec3};
use serde::{Deserialize, Serialize};

use crate::body::{Kinematics, PhysicsObject};
use crate::error::PhysicsError;

/// Shared, mutable handle to a force.
pub type SharedForce = Rc<RefCell<Force>>;

/// What happens to a one-shot force after it has fired.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OneShotPolicy {
    /// The force keeps applying every step; the one-shot flag is advisory.
    Reapply,
    /// The force applies on its first step only, until re-armed.
    #[default]
    FireOnce,
}

/// Force parameters, one variant per generator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ForceKind {
    /// Constant linear push.
    Thrust {
        /// Force vector added every application.
        thrust: Vec3,
    },
    /// Yaw torque, converted to a tangential force `torque / radius`.
    Torque {
        /// Torque vector.
        torque: Vec3,
    },
    /// Random linear force drawn per component from `[min, max]`.
    Turbulence {
        /// Lower bound per axis.
        min: Vec3,
        /// Upper bound per axis.
        max: Vec3,
    },
    /// Weight `-mass · gravity` along `Y`.
    Gravity {
        /// Gravitational acceleration magnitude.
        gravity: f32,
    },
    /// Kick in a random direction with strength `magnitude · U(0.8, 1)`.
    RadialImpulse {
        /// Nominal impulse strength.
        magnitude: f32,
    },
}

impl ForceKind {
    /// Short kind name, used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Thrust { .. } => "thrust",
            Self::Torque { .. } => "torque",
            Self::Turbulence { .. } => "turbulence",
            Self::Gravity { .. } => "gravity",
            Self::RadialImpulse { .. } => "radial_impulse",
        }
    }
}

/// A force generator with optional one-shot behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct Force {
    kind: ForceKind,
    apply_once: bool,
    applied: bool,
    policy: OneShotPolicy,
}

impl Force {
    /// Wraps a kind as a continuous force.
    pub fn new(kind: ForceKind) -> Self {
        Self {
            kind,
            apply_once: false,
            applied: false,
            policy: OneShotPolicy::default(),
        }
    }

    /// Constant thrust.
    pub fn thrust(thrust: Vec3) -> Self {
        Self::new(ForceKind::Thrust { thrust })
    }

    /// Yaw torque.
    pub fn torque(torque: Vec3) -> Self {
        Self::new(ForceKind::Torque { torque })
    }

    /// Bounded random turbulence.
    pub fn turbulence(min: Vec3, max: Vec3) -> Self {
        Self::new(ForceKind::Turbulence { min, max })
    }

    /// Constant gravity.
    pub fn gravity(gravity: f32) -> Self {
        Self::new(ForceKind::Gravity { gravity })
    }

    /// Random radial impulse.
    pub fn radial_impulse(magnitude: f32) -> Self {
        Self::new(ForceKind::RadialImpulse { magnitude })
    }

    /// Marks the force as one-shot.
    pub fn once(mut self) -> Self {
        self.apply_once = true;
        self
    }

    /// Sets the one-shot policy.
    pub fn with_policy(mut self, policy: OneShotPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Moves the force into a [`SharedForce`] handle.
    pub fn shared(self) -> SharedForce {
        Rc::new(RefCell::new(self))
    }

    /// Current parameters.
    pub fn kind(&self) -> &ForceKind {
        &self.kind
    }

    /// Whether the force is one-shot.
    pub fn apply_once(&self) -> bool {
        self.apply_once
    }

    /// Whether a one-shot force has fired.
    pub fn applied(&self) -> bool {
        self.applied
    }

    /// One-shot policy in effect.
    pub fn policy(&self) -> OneShotPolicy {
        self.policy
    }

    /// Clears the fired flag so a one-shot force can fire again.
    pub fn rearm(&mut self) {
        self.applied = false;
    }

    /// Returns `true` when applying the force would do nothing.
    pub fn is_spent(&self) -> bool {
        self.apply_once && self.applied && self.policy == OneShotPolicy::FireOnce
    }

    /// Updates a thrust force.
    pub fn set_thrust(&mut self, value: Vec3) -> Result<(), PhysicsError> {
        match &mut self.kind {
            ForceKind::Thrust { thrust } => {
                *thrust = value;
                Ok(())
            }
            other => Err(mismatch("thrust", other)),
        }
    }

    /// Updates a torque force.
    pub fn set_torque(&mut self, value: Vec3) -> Result<(), PhysicsError> {
        match &mut self.kind {
            ForceKind::Torque { torque } => {
                *torque = value;
                Ok(())
            }
            other => Err(mismatch("torque", other)),
        }
    }

    /// Updates turbulence bounds.
    pub fn set_turbulence(&mut self, lo: Vec3, hi: Vec3) -> Result<(), PhysicsError> {
        match &mut self.kind {
            ForceKind::Turbulence { min, max } => {
                *min = lo;
                *max = hi;
                Ok(())
            }
            other => Err(mismatch("turbulence", other)),
        }
    }

    /// Updates the gravitational acceleration.
    pub fn set_gravity(&mut self, value: f32) -> Result<(), PhysicsError> {
        match &mut self.kind {
            ForceKind::Gravity { gravity } => {
                *gravity = value;
                Ok(())
            }
            other => Err(mismatch("gravity", other)),
        }
    }

    /// Updates the radial impulse magnitude.
    pub fn set_magnitude(&mut self, value: f32) -> Result<(), PhysicsError> {
        match &mut self.kind {
            ForceKind::RadialImpulse { magnitude } => {
                *magnitude = value;
                Ok(())
            }
            other => Err(mismatch("radial_impulse", other)),
        }
    }

    /// Adds this force's contribution to `target` and records the firing of
    /// a one-shot force. Returns `false` when the force is spent.
    pub fn apply<O: PhysicsObject + ?Sized>(&mut self, target: &mut O, rng: &mut Prng) -> bool {
        if self.is_spent() {
            return false;
        }
        self.contribute(target.kinematics_mut(), rng);
        self.mark_fired();
        true
    }

    /// Adds the contribution without touching one-shot state. Used when one
    /// firing covers a whole particle pool.
    pub(crate) fn contribute(&self, target: &mut Kinematics, rng: &mut Prng) {
        match self.kind {
            ForceKind::Thrust { thrust } => target.add_force(thrust),
            ForceKind::Torque { torque } => {
                target.add_tangential_force(torque * (1.0 / target.radius));
            }
            ForceKind::Turbulence { min, max } => {
                target.add_force(rng.next_vec3_between(&min, &max));
            }
            ForceKind::Gravity { gravity } => {
                target.add_force(Vec3::new(0.0, -(target.mass * gravity), 0.0));
            }
            ForceKind::RadialImpulse { magnitude } => {
                let direction = rng.next_unit_vector();
                let strength = magnitude * rng.next_range(0.8, 1.0);
                target.add_force(direction * strength);
            }
        }
    }

    pub(crate) fn mark_fired(&mut self) {
        if self.apply_once {
            self.applied = true;
        }
    }
}

fn mismatch(expected: &'static str, actual: &ForceKind) -> PhysicsError {
    PhysicsError::ForceKindMismatch {
        expected,
        actual: actual.name(),
    }
}
