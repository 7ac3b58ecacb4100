// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rate-limited particle emitter.
//!
//! An active emitter spawns `group_size` particles at once whenever at least
//! `1 / rate` seconds have passed since its previous burst, then advances
//! the particle system it owns.

use core::f32::consts::TAU;

use lander_core::math::{Prng, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::particle::Particle;
use crate::particle_system::{ParticleSystem, SystemStep};

/// Vertical offset band above the emitter for disk spawns.
const DISK_LIFT: (f32, f32) = (0.20, 0.25);

/// Where new particles start and which way they head.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPattern {
    /// Uniform over a horizontal disk of `radius`, lifted slightly above the
    /// emitter, moving with the template velocity.
    #[default]
    Disk,
    /// At the emitter, moving in a random direction at the template speed.
    Radial,
    /// At the emitter, moving with the template velocity.
    Point,
}

/// Outcome of one [`Emitter::update`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EmitterStep {
    /// Particles spawned this update.
    pub spawned: usize,
    /// Result of advancing the owned system.
    pub system: SystemStep,
}

/// Particle source that owns the [`ParticleSystem`] it feeds.
#[derive(Debug)]
pub struct Emitter {
    system: ParticleSystem,
    active: bool,
    last_spawned: f32,
    /// Emitter position.
    pub position: Vec3,
    /// Template velocity for new particles.
    pub velocity: Vec3,
    /// Bursts per second.
    pub rate: f32,
    /// Lifespan given to new particles, in seconds.
    pub lifespan: f32,
    /// Radius given to new particles.
    pub particle_radius: f32,
    /// Disk radius for [`SpawnPattern::Disk`].
    pub radius: f32,
    /// Particles per burst.
    pub group_size: usize,
    /// Spawn layout.
    pub pattern: SpawnPattern,
    /// Deactivate after the first burst.
    pub one_shot: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(ParticleSystem::new())
    }
}

impl Emitter {
    /// Inactive emitter at the origin feeding `system`.
    pub fn new(system: ParticleSystem) -> Self {
        Self {
            system,
            active: false,
            last_spawned: 0.0,
            position: Vec3::ZERO,
            velocity: Vec3::new(0.0, -0.5, 0.0),
            rate: 1.0,
            lifespan: 3.0,
            particle_radius: 0.1,
            radius: 0.5,
            group_size: 20,
            pattern: SpawnPattern::Disk,
            one_shot: false,
        }
    }

    /// Enables spawning.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Disables spawning; live particles keep simulating.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Whether the emitter is spawning.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Time of the most recent burst.
    pub fn last_spawned(&self) -> f32 {
        self.last_spawned
    }

    /// Owned particle system.
    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Mutable access to the owned system, e.g. to register forces.
    pub fn system_mut(&mut self) -> &mut ParticleSystem {
        &mut self.system
    }

    /// Spawns a burst if one is due, then updates the owned system.
    ///
    /// A non-positive `rate` never spawns.
    pub fn update(&mut self, now: f32, dt: f32, rng: &mut Prng) -> EmitterStep {
        let mut spawned = 0;
        if self.active && self.rate > 0.0 && now - self.last_spawned >= 1.0 / self.rate {
            for _ in 0..self.group_size {
                let particle = self.spawn(now, rng);
                self.system.add(particle);
            }
            spawned = self.group_size;
            self.last_spawned = now;
            if self.one_shot {
                self.active = false;
            }
            debug!(now, spawned, pattern = ?self.pattern, "emitter burst");
        }
        EmitterStep {
            spawned,
            system: self.system.update(now, dt, rng),
        }
    }

    fn spawn(&self, now: f32, rng: &mut Prng) -> Particle {
        let (position, velocity) = match self.pattern {
            SpawnPattern::Disk => {
                let r = self.radius * rng.next_f32().sqrt();
                let theta = rng.next_f32() * TAU;
                let lift = rng.next_range(DISK_LIFT.0, DISK_LIFT.1);
                let offset = Vec3::new(r * theta.cos(), lift, r * theta.sin());
                (self.position + offset, self.velocity)
            }
            SpawnPattern::Radial => (
                self.position,
                rng.next_unit_vector() * self.velocity.length(),
            ),
            SpawnPattern::Point => (self.position, self.velocity),
        };
        let mut particle = Particle::new(position, velocity);
        particle.lifespan = self.lifespan;
        particle.birthtime = now;
        particle.kinematics.radius = self.particle_radius;
        particle
    }
}
