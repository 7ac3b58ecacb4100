// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory terrain mesh: a vertex list plus triangle index triples.
//!
//! Meshes arrive from an external loader or from [`TerrainMesh::heightfield`].
//! Construction validates indices and finiteness once so the octree can index
//! vertices without re-checking.

use lander_core::math::Vec3;

use crate::error::GeomError;
use crate::types::aabb::Aabb;

/// Triangulated terrain surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[usize; 3]>,
}

impl TerrainMesh {
    /// Creates a mesh after validating that every vertex is finite and every
    /// triangle index refers to an existing vertex.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[usize; 3]>) -> Result<Self, GeomError> {
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GeomError::NonFiniteVertex { index });
        }
        let vertex_count = vertices.len();
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i >= vertex_count) {
                return Err(GeomError::TriangleIndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Builds a regular grid of `cols × rows` vertices spaced `spacing` apart
    /// in the XZ plane and centred on the origin, with heights from
    /// `height(x, z)`. Each grid cell contributes two triangles.
    ///
    /// Non-finite heights are flattened to `0`. Fails when `spacing` is not a
    /// finite positive number or the grid is so large that a coordinate
    /// overflows.
    pub fn heightfield<F>(
        cols: usize,
        rows: usize,
        spacing: f32,
        height: F,
    ) -> Result<Self, GeomError>
    where
        F: Fn(f32, f32) -> f32,
    {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(GeomError::InvalidSpacing { spacing });
        }
        let half_w = (cols.saturating_sub(1)) as f32 * spacing * 0.5;
        let half_d = (rows.saturating_sub(1)) as f32 * spacing * 0.5;
        let mut vertices = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            for c in 0..cols {
                let x = c as f32 * spacing - half_w;
                let z = r as f32 * spacing - half_d;
                let y = height(x, z);
                vertices.push(Vec3::new(x, if y.is_finite() { y } else { 0.0 }, z));
            }
        }
        let mut triangles = Vec::with_capacity(cols.saturating_sub(1) * rows.saturating_sub(1) * 2);
        for r in 1..rows {
            for c in 1..cols {
                let i00 = (r - 1) * cols + (c - 1);
                let i01 = i00 + 1;
                let i10 = r * cols + (c - 1);
                let i11 = i10 + 1;
                triangles.push([i00, i10, i01]);
                triangles.push([i01, i10, i11]);
            }
        }
        Self::new(vertices, triangles)
    }

    /// Returns the vertex list.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Returns the triangle index triples.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` when the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounds of all vertices, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.vertices)
    }
}
