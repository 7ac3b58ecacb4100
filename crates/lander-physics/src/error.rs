// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type for the physics layer.

use lander_geom::GeomError;
use thiserror::Error;

/// Errors emitted by particle bookkeeping, force configuration, and world
/// construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// `remove` was called with an index past the end of the particle pool.
    #[error("particle index {index} out of range for pool of {len}")]
    ParticleIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Pool length at the time of the call.
        len: usize,
    },
    /// A mass must be strictly positive (acceleration divides by it).
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f32),
    /// A radius must be strictly positive (torque divides by it).
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    /// An emitter rate must be strictly positive.
    #[error("emitter rate must be positive, got {0}")]
    NonPositiveRate(f32),
    /// Damping must lie in `(0, 1]`.
    #[error("damping must lie in (0, 1], got {0}")]
    DampingOutOfRange(f32),
    /// A parameter setter was called on a force of a different kind.
    #[error("force is {actual}, not {expected}")]
    ForceKindMismatch {
        /// Kind the setter targets.
        expected: &'static str,
        /// Kind of the force it was called on.
        actual: &'static str,
    },
    /// Terrain geometry could not be indexed.
    #[error(transparent)]
    Geom(#[from] GeomError),
}
