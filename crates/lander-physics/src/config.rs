// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Simulation tuning.
//!
//! [`SimConfig::default`] holds the stock lunar tuning. Persistence goes
//! through the [`lander_app_core::config`] port; [`SimConfig::load`] adds
//! defaults and validation on top of it.

use lander_app_core::config::{ConfigError, ConfigService, ConfigStore};
use lander_core::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::emitter::SpawnPattern;
use crate::error::PhysicsError;
use crate::force::OneShotPolicy;
use crate::lander::check_body_params;

/// Full simulation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational acceleration (lunar surface by default).
    pub gravity: f32,
    /// Lander body parameters.
    pub lander: LanderConfig,
    /// Control authority and fuel.
    pub controls: ControlConfig,
    /// Exhaust plume emitter.
    pub exhaust: ExhaustConfig,
    /// Crash debris burst.
    pub explosion: ExplosionConfig,
    /// Terrain index tuning.
    pub terrain: TerrainConfig,
    /// Contact detection and response.
    pub collision: CollisionConfig,
    /// How one-shot forces behave after firing.
    pub one_shot_policy: OneShotPolicy,
    /// Seed for the simulation's random source.
    pub seed: u64,
}

impl SimConfig {
    /// Store key the simulation config lives under.
    pub const KEY: &'static str = "sim";

    /// Checks every parameter the physics divides by or damps with.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        check_body_params(self.lander.mass, self.lander.radius, self.lander.damping)?;
        for rate in [self.exhaust.rate, self.explosion.rate] {
            if rate.is_nan() || rate <= 0.0 {
                return Err(PhysicsError::NonPositiveRate(rate));
            }
        }
        for radius in [self.exhaust.particle_radius, self.explosion.particle_radius] {
            if radius.is_nan() || radius <= 0.0 {
                return Err(PhysicsError::NonPositiveRadius(radius));
            }
        }
        Ok(())
    }

    /// Loads the config stored under [`SimConfig::KEY`], falling back to
    /// defaults when none is stored, and validates it.
    pub fn load<S: ConfigStore>(service: &ConfigService<S>) -> Result<Self, ConfigError> {
        service.load_validated(Self::KEY, Self::validate)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 1.64,
            lander: LanderConfig::default(),
            controls: ControlConfig::default(),
            exhaust: ExhaustConfig::default(),
            explosion: ExplosionConfig::default(),
            terrain: TerrainConfig::default(),
            collision: CollisionConfig::default(),
            one_shot_policy: OneShotPolicy::default(),
            seed: 0x1a2b_3c4d_5e6f_7081,
        }
    }
}

/// Lander body parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    /// Mass.
    pub mass: f32,
    /// Radius used for torque.
    pub radius: f32,
    /// Velocity damping per step.
    pub damping: f32,
    /// Collision box half extents.
    pub half_extents: Vec3,
    /// Spawn position.
    pub start_position: Vec3,
    /// Lower turbulence bound.
    pub turbulence_min: Vec3,
    /// Upper turbulence bound.
    pub turbulence_max: Vec3,
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            mass: 10.0,
            radius: 3.0,
            damping: 0.99,
            half_extents: Vec3::splat(1.0),
            start_position: Vec3::new(0.0, 20.0, 0.0),
            turbulence_min: Vec3::splat(-0.5),
            turbulence_max: Vec3::splat(0.5),
        }
    }
}

/// Control authority and fuel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Thrust magnitude per active direction.
    pub thrust: f32,
    /// Yaw torque magnitude.
    pub torque: f32,
    /// Seconds of burn available.
    pub fuel: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            thrust: 40.0,
            torque: 7000.0,
            fuel: 120.0,
        }
    }
}

/// Exhaust emitter and the forces on its particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhaustConfig {
    /// Downward push on exhaust particles.
    pub thrust: f32,
    /// Lower turbulence bound.
    pub turbulence_min: Vec3,
    /// Upper turbulence bound.
    pub turbulence_max: Vec3,
    /// Bursts per second.
    pub rate: f32,
    /// Particles per burst.
    pub group_size: usize,
    /// Particle lifespan in seconds.
    pub lifespan: f32,
    /// Particle radius.
    pub particle_radius: f32,
    /// Spawn disk radius.
    pub radius: f32,
    /// Template particle velocity.
    pub velocity: Vec3,
    /// Spawn layout.
    pub pattern: SpawnPattern,
}

impl Default for ExhaustConfig {
    fn default() -> Self {
        Self {
            thrust: 20.0,
            turbulence_min: Vec3::splat(-1.0),
            turbulence_max: Vec3::splat(1.0),
            rate: 20.0,
            group_size: 20,
            lifespan: 0.5,
            particle_radius: 0.02,
            radius: 0.2,
            velocity: Vec3::new(0.0, -0.5, 0.0),
            pattern: SpawnPattern::Disk,
        }
    }
}

/// Debris burst released once when the lander crashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Radial impulse magnitude applied once to the debris.
    pub impulse: f32,
    /// Debris count.
    pub group_size: usize,
    /// Debris lifespan in seconds.
    pub lifespan: f32,
    /// Debris launch speed.
    pub speed: f32,
    /// Debris radius.
    pub particle_radius: f32,
    /// Burst rate; high enough that the burst fires on the crash frame.
    pub rate: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            impulse: 500.0,
            group_size: 200,
            lifespan: 2.0,
            speed: 5.0,
            particle_radius: 0.05,
            rate: 1000.0,
        }
    }
}

/// Terrain index tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Maximum octree depth below the root.
    pub octree_depth: usize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self { octree_depth: 20 }
    }
}

/// Contact detection and response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Overlapping leaves needed to count as ground contact.
    pub overlap_threshold: usize,
    /// Bounce factor on the reflected vertical velocity.
    pub restitution: f32,
    /// Post-impulse speed at or above which the lander is wrecked.
    pub crash_speed: f32,
    /// Post-impulse speed below which the lander counts as landed.
    pub safe_speed: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: 5,
            restitution: 1.25,
            crash_speed: 2.0,
            safe_speed: 1.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use lander_app_core::config::MemoryConfigStore;

    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = SimConfig::default();
        cfg.lander.mass = 0.0;
        assert_eq!(cfg.validate(), Err(PhysicsError::NonPositiveMass(0.0)));

        let mut cfg = SimConfig::default();
        cfg.exhaust.rate = -1.0;
        assert_eq!(cfg.validate(), Err(PhysicsError::NonPositiveRate(-1.0)));

        let mut cfg = SimConfig::default();
        cfg.lander.damping = 0.0;
        assert_eq!(cfg.validate(), Err(PhysicsError::DampingOutOfRange(0.0)));
    }

    #[test]
    fn service_round_trips_through_memory_store() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        assert_eq!(SimConfig::load(&svc).expect("defaults"), SimConfig::default());

        let mut cfg = SimConfig {
            gravity: 9.81,
            ..SimConfig::default()
        };
        cfg.exhaust.pattern = SpawnPattern::Radial;
        svc.save(SimConfig::KEY, &cfg).expect("save");
        assert_eq!(SimConfig::load(&svc).expect("load"), cfg);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let store = MemoryConfigStore::new();
        store
            .save_raw(SimConfig::KEY, br#"{"gravity": 3.0, "controls": {"fuel": 5.0}}"#)
            .expect("save");
        let cfg = SimConfig::load(&ConfigService::new(store)).expect("load");
        assert_eq!(cfg.gravity, 3.0);
        assert_eq!(cfg.controls.fuel, 5.0);
        assert_eq!(cfg.controls.thrust, 40.0);
        assert_eq!(cfg.lander, LanderConfig::default());
    }

    #[test]
    fn invalid_stored_config_is_reported() {
        let store = MemoryConfigStore::new();
        store
            .save_raw(SimConfig::KEY, br#"{"lander": {"radius": 0.0}}"#)
            .expect("save");
        let err = SimConfig::load(&ConfigService::new(store));
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }
}
