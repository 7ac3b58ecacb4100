// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Frame-stepping lander world.
//!
//! One [`LanderWorld::step`] runs, in order: control forces, lander force
//! application, integration, fuel drain, exhaust and debris emitters, the
//! terrain overlap query, and collision response.

use lander_core::math::{Prng, Vec3};
use lander_geom::{Octree, Ray, TerrainMesh};
use tracing::{debug, info, trace, warn};

use crate::body::{usable_dt, PhysicsObject, StepOutcome};
use crate::config::SimConfig;
use crate::emitter::{Emitter, SpawnPattern};
use crate::error::PhysicsError;
use crate::force::{Force, SharedForce};
use crate::lander::RigidBody;
use crate::particle_system::ParticleSystem;

/// Pilot input for one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Thrust along `+Y`.
    pub ascend: bool,
    /// Thrust along `-Y`.
    pub descend: bool,
    /// Thrust along the lander's forward axis.
    pub forward: bool,
    /// Thrust along the lander's backward axis.
    pub backward: bool,
    /// Thrust along the lander's left axis.
    pub left: bool,
    /// Thrust along the lander's right axis.
    pub right: bool,
    /// Negative yaw torque.
    pub yaw_left: bool,
    /// Positive yaw torque.
    pub yaw_right: bool,
}

impl ControlInput {
    /// Returns `true` when no control is engaged.
    pub fn is_idle(self) -> bool {
        self == Self::default()
    }
}

/// Ground contact classification for a frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LandingOutcome {
    /// Fewer overlapping leaves than the contact threshold.
    Airborne,
    /// Touching ground at a speed between safe and crash.
    Contact,
    /// Touching ground slower than the safe landing speed.
    Landed,
    /// Hit the ground at or above the crash speed.
    Crashed,
}

/// What happened during one [`LanderWorld::step`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    /// Lander integration result.
    pub step: StepOutcome,
    /// Terrain leaves overlapping the lander bounds.
    pub overlaps: usize,
    /// Contact classification.
    pub outcome: LandingOutcome,
    /// Height above the terrain vertex below, if any.
    pub altitude: Option<f32>,
    /// Fuel left, in seconds of burn.
    pub fuel: f32,
    /// Live exhaust particles.
    pub particles: usize,
    /// Exhaust particles spawned this frame.
    pub spawned: usize,
    /// Live crash debris particles.
    pub debris: usize,
}

/// Lander, terrain index, exhaust, and debris, stepped together.
#[derive(Debug)]
pub struct LanderWorld {
    config: SimConfig,
    octree: Octree,
    lander: RigidBody,
    thrust: SharedForce,
    torque: SharedForce,
    turbulence: SharedForce,
    gravity: SharedForce,
    exhaust: Emitter,
    explosion: Emitter,
    rng: Prng,
    fuel: f32,
    crashed: bool,
}

impl LanderWorld {
    /// Validates `config`, indexes `mesh`, and places the lander at its start
    /// position.
    pub fn new(config: SimConfig, mesh: &TerrainMesh) -> Result<Self, PhysicsError> {
        config.validate()?;
        let octree = Octree::build(mesh, config.terrain.octree_depth)?;
        Self::with_octree(config, octree)
    }

    /// Like [`LanderWorld::new`] with a prebuilt terrain index.
    pub fn with_octree(config: SimConfig, octree: Octree) -> Result<Self, PhysicsError> {
        config.validate()?;
        let lc = &config.lander;
        let lander = RigidBody::with_params(
            lc.start_position,
            lc.mass,
            lc.radius,
            lc.damping,
            lc.half_extents,
        )?;
        let policy = config.one_shot_policy;

        let thrust = Force::thrust(Vec3::ZERO).with_policy(policy).shared();
        let torque = Force::torque(Vec3::ZERO).with_policy(policy).shared();
        let turbulence = Force::turbulence(lc.turbulence_min, lc.turbulence_max)
            .with_policy(policy)
            .shared();
        let gravity = Force::gravity(config.gravity).with_policy(policy).shared();

        let ex = &config.exhaust;
        let mut plume = ParticleSystem::new();
        plume.add_force(Force::thrust(Vec3::new(0.0, -ex.thrust, 0.0)).shared());
        plume.add_force(Force::turbulence(ex.turbulence_min, ex.turbulence_max).shared());
        let mut exhaust = Emitter::new(plume);
        exhaust.position = lander.position();
        exhaust.velocity = ex.velocity;
        exhaust.rate = ex.rate;
        exhaust.lifespan = ex.lifespan;
        exhaust.particle_radius = ex.particle_radius;
        exhaust.radius = ex.radius;
        exhaust.group_size = ex.group_size;
        exhaust.pattern = ex.pattern;

        let bc = &config.explosion;
        let mut debris = ParticleSystem::new();
        debris.add_force(
            Force::radial_impulse(bc.impulse)
                .once()
                .with_policy(policy)
                .shared(),
        );
        debris.add_force(gravity.clone());
        let mut explosion = Emitter::new(debris);
        explosion.velocity = Vec3::new(0.0, bc.speed, 0.0);
        explosion.rate = bc.rate;
        explosion.lifespan = bc.lifespan;
        explosion.particle_radius = bc.particle_radius;
        explosion.group_size = bc.group_size;
        explosion.pattern = SpawnPattern::Radial;
        explosion.one_shot = true;

        let rng = Prng::from_seed_u64(config.seed);
        let fuel = config.controls.fuel;
        Ok(Self {
            config,
            octree,
            lander,
            thrust,
            torque,
            turbulence,
            gravity,
            exhaust,
            explosion,
            rng,
            fuel,
            crashed: false,
        })
    }

    /// Advances the world by `dt` seconds ending at simulation time `now`.
    ///
    /// A non-finite or non-positive `dt` skips all motion (and fuel drain)
    /// but still reports contact and altitude for the current state.
    pub fn step(&mut self, now: f32, dt: f32, input: ControlInput) -> FrameReport {
        let mut spawned = 0;
        let step = if usable_dt(dt) {
            let input = if self.fuel > 0.0 && !self.crashed {
                input
            } else {
                ControlInput::default()
            };
            let (thrust, torque) = self.control_forces(input);
            let tuned = self
                .thrust
                .borrow_mut()
                .set_thrust(thrust)
                .and(self.torque.borrow_mut().set_torque(torque));
            if let Err(err) = tuned {
                warn!(%err, "control force has unexpected kind");
            }
            if input.is_idle() {
                self.exhaust.stop();
            } else {
                self.exhaust.start();
            }

            for force in [&self.thrust, &self.torque, &self.turbulence, &self.gravity] {
                force.borrow_mut().apply(&mut self.lander, &mut self.rng);
            }
            let step = self.lander.integrate(dt);

            if !thrust.is_zero() || !torque.is_zero() {
                self.fuel = (self.fuel - dt).max(0.0);
                if self.fuel == 0.0 {
                    warn!(now, "fuel exhausted");
                }
            }

            self.exhaust.position = self.lander.position();
            spawned = self.exhaust.update(now, dt, &mut self.rng).spawned;
            let _ = self.explosion.update(now, dt, &mut self.rng);
            step
        } else {
            warn!(now, dt, "skipping frame with unusable dt");
            StepOutcome::Skipped
        };

        let overlaps = self.octree.query_overlap(&self.lander.bounds()).len();
        let outcome = if overlaps >= self.config.collision.overlap_threshold {
            self.resolve_contact(now, overlaps)
        } else {
            LandingOutcome::Airborne
        };

        let report = FrameReport {
            step,
            overlaps,
            outcome,
            altitude: self.altitude(),
            fuel: self.fuel,
            particles: self.exhaust.system().len(),
            spawned,
            debris: self.explosion.system().len(),
        };
        trace!(now, ?report, "frame stepped");
        report
    }

    fn control_forces(&self, input: ControlInput) -> (Vec3, Vec3) {
        let t = self.config.controls.thrust;
        let axes = [
            (input.ascend, Vec3::UNIT_Y),
            (input.descend, Vec3::new(0.0, -1.0, 0.0)),
            (input.forward, self.lander.forward()),
            (input.backward, self.lander.backward()),
            (input.left, self.lander.left()),
            (input.right, self.lander.right()),
        ];
        let thrust = axes
            .iter()
            .filter(|(on, _)| *on)
            .fold(Vec3::ZERO, |acc, (_, dir)| acc + *dir * t);

        let q = self.config.controls.torque;
        let mut torque = Vec3::ZERO;
        if input.yaw_left {
            torque += Vec3::new(0.0, -q, 0.0);
        }
        if input.yaw_right {
            torque += Vec3::new(0.0, q, 0.0);
        }
        (thrust, torque)
    }

    fn resolve_contact(&mut self, now: f32, overlaps: usize) -> LandingOutcome {
        let cc = &self.config.collision;
        let up = Vec3::UNIT_Y;
        let v = self.lander.velocity();
        let bounced = up * (up.dot(&-v) * cc.restitution);
        self.lander.set_velocity(bounced);
        let speed = bounced.length();
        let outcome = if speed >= cc.crash_speed {
            LandingOutcome::Crashed
        } else if speed < cc.safe_speed {
            LandingOutcome::Landed
        } else {
            LandingOutcome::Contact
        };
        debug!(now, overlaps, speed, ?outcome, "ground contact");

        if outcome == LandingOutcome::Crashed && !self.crashed {
            self.crashed = true;
            self.explosion.position = self.lander.position();
            self.explosion.start();
            info!(now, speed, "lander crashed");
        }
        outcome
    }

    /// Height of the lander above the first terrain vertex found straight
    /// below it, or `None` when nothing is below.
    pub fn altitude(&self) -> Option<f32> {
        let position = self.lander.position();
        let leaf = self.octree.query_ray(&Ray::downward(position))?;
        let first = *leaf.points().first()?;
        Some(position.y() - self.octree.vertex(first)?.y())
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Terrain index.
    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    /// The lander.
    pub fn lander(&self) -> &RigidBody {
        &self.lander
    }

    /// Mutable lander access, e.g. to reposition it.
    pub fn lander_mut(&mut self) -> &mut RigidBody {
        &mut self.lander
    }

    /// Exhaust emitter.
    pub fn exhaust(&self) -> &Emitter {
        &self.exhaust
    }

    /// Crash debris emitter.
    pub fn explosion(&self) -> &Emitter {
        &self.explosion
    }

    /// Fuel left, in seconds of burn.
    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    /// Whether the lander has crashed. A wrecked lander ignores input.
    pub fn is_crashed(&self) -> bool {
        self.crashed
    }
}
