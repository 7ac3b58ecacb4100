// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Particle pool with shared forces.

use lander_core::math::Prng;
use tracing::trace;

use crate::body::{usable_dt, PhysicsObject};
use crate::error::PhysicsError;
use crate::force::SharedForce;
use crate::particle::Particle;

/// Summary of one [`ParticleSystem::update`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SystemStep {
    /// Particles dropped because they outlived their lifespan.
    pub expired: usize,
    /// Particles alive after the update.
    pub live: usize,
    /// Whether `dt` was usable; when `false` no particle moved.
    pub advanced: bool,
}

/// Ordered particle pool plus the forces acting on every particle.
///
/// Particle order is insertion order, minus removals. Forces are shared
/// handles, so the caller may keep retuning them between updates.
#[derive(Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    forces: Vec<SharedForce>,
}

impl ParticleSystem {
    /// Empty system with no forces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a particle.
    pub fn add(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Registers a force; forces apply in registration order.
    pub fn add_force(&mut self, force: SharedForce) {
        self.forces.push(force);
    }

    /// Removes and returns the particle at `index`, preserving the order of
    /// the rest.
    pub fn remove(&mut self, index: usize) -> Result<Particle, PhysicsError> {
        if index >= self.particles.len() {
            return Err(PhysicsError::ParticleIndexOutOfRange {
                index,
                len: self.particles.len(),
            });
        }
        Ok(self.particles.remove(index))
    }

    /// Sets the lifespan of every current particle.
    pub fn set_lifespan(&mut self, lifespan: f32) {
        for p in &mut self.particles {
            p.lifespan = lifespan;
        }
    }

    /// Drops expired particles, applies every force to each survivor, then
    /// integrates the survivors by `dt`.
    ///
    /// A one-shot force fires across the whole pool on the update it first
    /// acts in, then counts as spent. An unusable `dt` still expires old
    /// particles but applies no forces.
    pub fn update(&mut self, now: f32, dt: f32, rng: &mut Prng) -> SystemStep {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired(now));
        let expired = before - self.particles.len();
        if self.particles.is_empty() || !usable_dt(dt) {
            return SystemStep {
                expired,
                live: self.particles.len(),
                advanced: usable_dt(dt),
            };
        }

        let active: Vec<bool> = self.forces.iter().map(|f| !f.borrow().is_spent()).collect();
        for particle in &mut self.particles {
            for (force, _) in self.forces.iter().zip(&active).filter(|(_, on)| **on) {
                force.borrow().contribute(&mut particle.kinematics, rng);
            }
        }
        for (force, _) in self.forces.iter().zip(&active).filter(|(_, on)| **on) {
            force.borrow_mut().mark_fired();
        }

        for particle in &mut self.particles {
            let _ = particle.integrate(dt);
        }
        trace!(expired, live = self.particles.len(), "particle system updated");
        SystemStep {
            expired,
            live: self.particles.len(),
            advanced: true,
        }
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` when no particles are alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Live particles in order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Drops every particle; forces stay registered.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Number of registered forces.
    pub fn force_count(&self) -> usize {
        self.forces.len()
    }
}
