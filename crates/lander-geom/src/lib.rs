// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry for the lander simulation.

This crate provides:
- Axis-aligned bounding boxes (`Aabb`) and rays (`Ray`).
- An in-memory terrain mesh (`TerrainMesh`) fed by an external loader or
  generated procedurally.
- A static octree (`Octree`) built once over the terrain vertices and queried
  every step for ray hits and box overlap.

Design notes:
- Build-then-read-only: queries take `&self`, so a built tree can be shared
  across threads and queried reentrantly.
- Overlap is inclusive on faces; point membership during subdivision is
  half-open so every vertex lands in exactly one leaf.
"]
#![forbid(unsafe_code)]

/// Error type shared by mesh validation and octree construction.
pub mod error;
/// Terrain mesh container.
pub mod mesh;
/// Spatial index over terrain vertices.
pub mod spatial;
/// Foundational geometric value types.
pub mod types;

pub use error::GeomError;
pub use mesh::TerrainMesh;
pub use spatial::octree::{Leaves, Octree, TreeNode};
pub use types::aabb::Aabb;
pub use types::ray::Ray;
