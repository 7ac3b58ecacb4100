// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! lander-core: math primitives shared by the terrain index and the physics
//! integrator.
//!
//! Everything here is a plain value type. There is no ambient RNG: callers
//! thread a [`math::Prng`] explicitly so that every random draw in a
//! simulation is reproducible from its seed.
#![forbid(unsafe_code)]

pub mod math;

pub use math::{Prng, Quat, Vec3};
