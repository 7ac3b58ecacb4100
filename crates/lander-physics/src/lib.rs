// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! lander-physics: force accumulation and integration for the lander and its
//! exhaust particles, plus the world that steps them against the terrain.
//!
//! Per frame, forces add into each object's accumulators, the integrator
//! consumes and clears them, and the terrain octree is queried with the
//! lander's bounds to drive collision response. Everything is single-threaded
//! and step-driven; randomness comes from an explicit [`lander_core::Prng`].
#![forbid(unsafe_code)]

pub mod body;
pub mod config;
pub mod emitter;
pub mod error;
pub mod force;
pub mod lander;
pub mod particle;
pub mod particle_system;
pub mod world;

pub use body::{Kinematics, PhysicsObject, StepOutcome};
pub use config::SimConfig;
pub use emitter::{Emitter, EmitterStep, SpawnPattern};
pub use error::PhysicsError;
pub use force::{Force, ForceKind, OneShotPolicy, SharedForce};
pub use lander::RigidBody;
pub use particle::Particle;
pub use particle_system::{ParticleSystem, SystemStep};
pub use world::{ControlInput, FrameReport, LanderWorld, LandingOutcome};
