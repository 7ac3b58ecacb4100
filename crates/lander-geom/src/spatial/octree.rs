// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use lander_core::math::Vec3;
use tracing::debug;

use crate::error::GeomError;
use crate::mesh::TerrainMesh;
use crate::types::aabb::{octant_high_sides, Aabb};
use crate::types::ray::Ray;

/// Level number of the root node.
const ROOT_LEVEL: usize = 1;

/// One node of the octree.
///
/// A node owns its children exclusively (no parent links). A node with no
/// children is a leaf; interior nodes keep their point list so callers can
/// inspect coarse levels through [`Octree::query_ray_at_depth`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    bounds: Aabb,
    points: Vec<usize>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(bounds: Aabb, points: Vec<usize>) -> Self {
        Self {
            bounds,
            points,
            children: Vec::new(),
        }
    }

    /// Region covered by this node.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Indices of the mesh vertices inside this node.
    pub fn points(&self) -> &[usize] {
        &self.points
    }

    /// Child nodes in octant order (empty for leaves).
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Returns `true` when the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Static point octree over terrain vertices.
///
/// Levels are counted from the root at level `1`. A node on level `max_depth`
/// is never split, so `max_depth` bounds the number of levels in the tree and
/// a `max_depth` of `0` or `1` leaves the root as the only node. A child
/// holding a single vertex becomes a leaf early. Sub-boxes without vertices are dropped, so an interior node has
/// between one and eight children.
///
/// Vertex membership is half-open per axis (`[min, max)`), with the upper face
/// closed only where it coincides with the root's upper face. Every vertex
/// therefore ends up in exactly one leaf.
#[derive(Debug, Clone)]
pub struct Octree {
    root: TreeNode,
    vertices: Vec<Vec3>,
    max_depth: usize,
}

impl Octree {
    /// Builds the tree over the vertices of `mesh`.
    pub fn build(mesh: &TerrainMesh, max_depth: usize) -> Result<Self, GeomError> {
        Self::from_points(mesh.vertices().to_vec(), max_depth)
    }

    /// Builds the tree over a bare vertex list.
    ///
    /// Fails on an empty list or on the first vertex with a NaN or infinite
    /// component, since such a vertex fits in no octant.
    pub fn from_points(vertices: Vec<Vec3>, max_depth: usize) -> Result<Self, GeomError> {
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GeomError::NonFiniteVertex { index });
        }
        let bounds = Aabb::from_points(&vertices).ok_or(GeomError::EmptyMesh)?;
        let mut root = TreeNode::new(bounds, (0..vertices.len()).collect());
        subdivide(&mut root, &vertices, [true; 3], max_depth, ROOT_LEVEL);
        let tree = Self {
            root,
            vertices,
            max_depth,
        };
        debug!(
            vertices = tree.vertices.len(),
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            max_depth,
            "octree built"
        );
        Ok(tree)
    }

    /// Root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Indexed vertices.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Looks up an indexed vertex.
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }

    /// Depth limit the tree was built with.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the first leaf (in child insertion order) whose box the ray
    /// enters for `t ≥ 0`.
    pub fn query_ray(&self, ray: &Ray) -> Option<&TreeNode> {
        ray_descend(&self.root, ray, usize::MAX, ROOT_LEVEL)
    }

    /// Like [`Octree::query_ray`], but stops descending at level `depth` (the
    /// root being level `1`) and returns the intersecting node on that level
    /// even if it has children. A `depth` of `0` or `1` yields the root.
    pub fn query_ray_at_depth(&self, ray: &Ray, depth: usize) -> Option<&TreeNode> {
        ray_descend(&self.root, ray, depth, ROOT_LEVEL)
    }

    /// Returns the boxes of every leaf overlapping `query`.
    ///
    /// The traversal visits every overlapping branch; the result length is
    /// used as a contact-strength signal by collision response.
    pub fn query_overlap(&self, query: &Aabb) -> Vec<Aabb> {
        let mut out = Vec::new();
        collect_overlaps(&self.root, query, &mut out);
        out
    }

    /// Iterates over every leaf in depth-first, insertion order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![&self.root],
        }
    }

    /// Total number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Deepest level present in the tree (`1` when the root is a leaf).
    pub fn depth(&self) -> usize {
        fn deepest(node: &TreeNode) -> usize {
            1 + node.children.iter().map(deepest).max().unwrap_or(0)
        }
        deepest(&self.root)
    }
}

/// Depth-first iterator over leaves, produced by [`Octree::leaves`].
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}

fn subdivide(
    node: &mut TreeNode,
    vertices: &[Vec3],
    closed_upper: [bool; 3],
    max_depth: usize,
    level: usize,
) {
    if level >= max_depth {
        return;
    }

    for (octant, bounds) in node.bounds.subdivide8().into_iter().enumerate() {
        let high = octant_high_sides(octant);
        let child_closed = [
            closed_upper[0] && high[0],
            closed_upper[1] && high[1],
            closed_upper[2] && high[2],
        ];
        let points: Vec<usize> = node
            .points
            .iter()
            .copied()
            .filter(|&i| bounds.contains_half_open(&vertices[i], child_closed))
            .collect();
        if points.is_empty() {
            continue;
        }
        let mut child = TreeNode::new(bounds, points);
        if child.points.len() > 1 {
            subdivide(&mut child, vertices, child_closed, max_depth, level + 1);
        }
        node.children.push(child);
    }
}

fn ray_descend<'a>(
    node: &'a TreeNode,
    ray: &Ray,
    depth: usize,
    level: usize,
) -> Option<&'a TreeNode> {
    if !node.bounds.intersects_ray(ray, 0.0, f32::INFINITY) {
        return None;
    }
    if node.is_leaf() || level >= depth {
        return Some(node);
    }
    node.children
        .iter()
        .find_map(|child| ray_descend(child, ray, depth, level + 1))
}

fn collect_overlaps(node: &TreeNode, query: &Aabb, out: &mut Vec<Aabb>) {
    if !node.bounds.overlaps(query) {
        return;
    }
    if node.is_leaf() {
        out.push(node.bounds);
        return;
    }
    for child in &node.children {
        collect_overlaps(child, query, out);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cube_corners() -> Vec<Vec3> {
        let mut pts = Vec::new();
        for x in [0.0, 4.0] {
            for y in [0.0, 4.0] {
                for z in [0.0, 4.0] {
                    pts.push(Vec3::new(x, y, z));
                }
            }
        }
        pts
    }

    #[test]
    fn empty_point_set_is_rejected() {
        assert_eq!(
            Octree::from_points(Vec::new(), 4).err(),
            Some(GeomError::EmptyMesh)
        );
    }

    #[test]
    fn corners_split_into_eight_single_point_leaves() {
        let tree = Octree::from_points(cube_corners(), 8).expect("build octree");
        assert_eq!(tree.root().children().len(), 8);
        assert_eq!(tree.leaf_count(), 8);
        assert_eq!(tree.depth(), 2);
        assert!(tree.leaves().all(|leaf| leaf.points().len() == 1));
    }

    #[test]
    fn single_level_keeps_root_as_only_leaf() {
        for max_depth in [0, 1] {
            let tree = Octree::from_points(cube_corners(), max_depth).expect("build octree");
            assert!(tree.root().is_leaf());
            assert_eq!(tree.node_count(), 1);
            assert_eq!(tree.depth(), 1);
            assert_eq!(tree.root().points().len(), 8);
        }
    }

    #[test]
    fn two_levels_split_the_root_once() {
        let tree = Octree::from_points(cube_corners(), 2).expect("build octree");
        assert_eq!(tree.node_count(), 9);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let pts = vec![
            Vec3::ZERO,
            Vec3::new(f32::NAN, 0.5, 0.5),
            Vec3::splat(1.0),
        ];
        assert_eq!(
            Octree::from_points(pts, 4).err(),
            Some(GeomError::NonFiniteVertex { index: 1 })
        );
        let pts = vec![Vec3::ZERO, Vec3::new(0.0, f32::INFINITY, 0.0)];
        assert_eq!(
            Octree::from_points(pts, 4).err(),
            Some(GeomError::NonFiniteVertex { index: 1 })
        );
    }

    #[test]
    fn ray_at_root_level_returns_root() {
        let tree = Octree::from_points(cube_corners(), 8).expect("build octree");
        let ray = Ray::downward(Vec3::new(1.0, 10.0, 1.0));
        for depth in [0, 1] {
            let node = tree.query_ray_at_depth(&ray, depth);
            assert!(node.is_some_and(|n| std::ptr::eq(n, tree.root())));
        }
        let child = tree.query_ray_at_depth(&ray, 2);
        assert!(child.is_some_and(|n| n.is_leaf() && n.points().len() == 1));
        let leaf = tree.query_ray(&ray);
        assert!(leaf.is_some_and(TreeNode::is_leaf));
    }

    #[test]
    fn ray_missing_root_returns_none() {
        let tree = Octree::from_points(cube_corners(), 8).expect("build octree");
        let ray = Ray::downward(Vec3::new(50.0, 10.0, 1.0));
        assert!(tree.query_ray(&ray).is_none());
    }
}
