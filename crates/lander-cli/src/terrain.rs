// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Procedural terrain for headless runs.

use lander_geom::{GeomError, TerrainMesh};

/// Gently rolling square patch of `grid × grid` vertices, `spacing` apart,
/// with hills up to `amplitude` high.
pub fn rolling(grid: usize, spacing: f32, amplitude: f32) -> Result<TerrainMesh, GeomError> {
    TerrainMesh::heightfield(grid, grid, spacing, |x, z| {
        amplitude * 0.5 * ((x * 0.15).sin() + (z * 0.11).cos())
    })
}
