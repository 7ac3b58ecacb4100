// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Errors emitted while validating geometry or building the octree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeomError {
    /// The mesh has no vertices, so there is nothing to bound or index.
    #[error("mesh has no vertices")]
    EmptyMesh,
    /// A box corner pair has `min > max` on some axis.
    #[error("inverted bounds on axis {axis}: min {min} > max {max}")]
    InvertedBounds {
        /// Offending axis (`0 = x`, `1 = y`, `2 = z`).
        axis: usize,
        /// Minimum coordinate supplied on that axis.
        min: f32,
        /// Maximum coordinate supplied on that axis.
        max: f32,
    },
    /// A vertex carries NaN or an infinite component.
    #[error("vertex {index} is not finite")]
    NonFiniteVertex {
        /// Index of the offending vertex.
        index: usize,
    },
    /// Grid spacing is zero, negative, NaN, or infinite.
    #[error("grid spacing must be finite and positive, got {spacing}")]
    InvalidSpacing {
        /// Spacing supplied by the caller.
        spacing: f32,
    },
    /// A triangle refers to a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} but the mesh has {vertex_count} vertices")]
    TriangleIndexOutOfRange {
        /// Index of the offending triangle.
        triangle: usize,
        /// Out-of-range vertex index.
        index: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}
