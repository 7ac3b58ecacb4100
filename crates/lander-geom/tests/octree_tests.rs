// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the terrain octree.

use lander_core::math::{Prng, Vec3};
use lander_geom::{Aabb, GeomError, Octree, Ray, TerrainMesh};
use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

fn rolling_terrain() -> TerrainMesh {
    TerrainMesh::heightfield(17, 17, 1.0, |x, z| (x * 0.5).sin() + (z * 0.3).cos())
        .expect("valid grid")
}

fn sorted_boxes(mut boxes: Vec<Aabb>) -> Vec<[f32; 6]> {
    let mut flat: Vec<[f32; 6]> = boxes
        .drain(..)
        .map(|b| {
            let [a, c, e] = b.min().to_array();
            let [bb, d, f] = b.max().to_array();
            [a, c, e, bb, d, f]
        })
        .collect();
    flat.sort_by(|l, r| {
        l.iter()
            .zip(r.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    flat
}

#[test]
fn empty_mesh_is_an_error() {
    let mesh = TerrainMesh::default();
    assert_eq!(Octree::build(&mesh, 10).err(), Some(GeomError::EmptyMesh));
}

#[test]
fn every_vertex_lands_in_exactly_one_leaf() {
    let mesh = rolling_terrain();
    let tree = Octree::build(&mesh, 12).expect("build octree");
    let mut seen = vec![0usize; mesh.vertex_count()];
    for leaf in tree.leaves() {
        for &i in leaf.points() {
            seen[i] += 1;
            assert!(leaf.bounds().contains(&mesh.vertices()[i]));
        }
    }
    assert!(seen.iter().all(|&n| n == 1), "partition violated: {seen:?}");
}

#[test]
fn leaf_volumes_never_exceed_root_volume() {
    let mesh = rolling_terrain();
    let tree = Octree::build(&mesh, 12).expect("build octree");
    let leaves: Vec<&Aabb> = tree.leaves().map(|l| l.bounds()).collect();
    let total: f32 = leaves.iter().map(|b| b.volume()).sum();
    assert!(total <= tree.root().bounds().volume() * (1.0 + 1e-4));
    for (i, a) in leaves.iter().enumerate() {
        for b in leaves.iter().skip(i + 1) {
            // Leaves may touch on faces but never share interior volume.
            let lo = a.min().max(&b.min());
            let hi = a.max().min(&b.max());
            let shared = (0..3)
                .map(|axis| (hi.axis(axis) - lo.axis(axis)).max(0.0))
                .product::<f32>();
            assert!(shared <= 1e-6, "leaves overlap by {shared}");
        }
    }
}

#[test]
fn downward_ray_through_vertex_finds_leaf_containing_a_vertex() {
    let mesh = rolling_terrain();
    let tree = Octree::build(&mesh, 12).expect("build octree");
    let target = mesh.vertices()[140];
    let ray = Ray::downward(target.add(&Vec3::new(0.0, 25.0, 0.0)));
    let leaf = tree.query_ray(&ray).expect("ray hits terrain");
    assert!(leaf.is_leaf());
    assert!(leaf
        .points()
        .iter()
        .any(|&i| leaf.bounds().contains(&mesh.vertices()[i])));
}

#[test]
fn depth_bounded_ray_stops_at_requested_level() {
    let mesh = rolling_terrain();
    let tree = Octree::build(&mesh, 12).expect("build octree");
    let ray = Ray::downward(Vec3::new(0.1, 30.0, 0.1));
    let node = tree.query_ray_at_depth(&ray, 2).expect("hit at depth 2");
    assert!(!node.is_leaf());
    assert!(node.points().len() > 1);
    let leaf = tree.query_ray(&ray).expect("hit leaf");
    assert!(leaf.is_leaf());
    assert!(leaf.bounds().intersects_ray(&ray, 0.0, f32::INFINITY));
}

#[test]
fn overlap_returns_every_touching_leaf() {
    let mesh = rolling_terrain();
    let tree = Octree::build(&mesh, 12).expect("build octree");
    let everything = tree.root().bounds().inflate(1.0);
    assert_eq!(tree.query_overlap(&everything).len(), tree.leaf_count());

    let far = Aabb::from_center_half_extents(Vec3::new(500.0, 0.0, 0.0), Vec3::splat(1.0));
    assert!(tree.query_overlap(&far).is_empty());

    let query_box = Aabb::from_center_half_extents(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(1.5));
    let hits = tree.query_overlap(&query_box);
    let expected = tree.leaves().filter(|l| l.bounds().overlaps(&query_box)).count();
    assert_eq!(hits.len(), expected);
    assert!(hits.len() > 1);
}

#[test]
fn octree_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Octree>();
}

#[test]
fn overlap_query_is_independent_of_vertex_order() {
    const SEED_BYTES: [u8; 32] = [
        0x1a, 0x2b, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0,
    ];
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(PropConfig::with_cases(32), rng);

    let coord = -20.0f32..20.0;
    let point = (coord.clone(), coord.clone(), coord).prop_map(|(x, y, z)| Vec3::new(x, y, z));
    let strategy = (prop::collection::vec(point, 1..64), any::<u64>());

    runner
        .run(&strategy, |(points, shuffle_seed)| {
            let mut shuffled = points.clone();
            let mut prng = Prng::from_seed_u64(shuffle_seed);
            for i in (1..shuffled.len()).rev() {
                let j = usize::try_from(prng.next_int(0, i32::try_from(i).unwrap_or(i32::MAX)))
                    .unwrap_or(0);
                shuffled.swap(i, j);
            }

            let a = Octree::from_points(points, 8).expect("build a");
            let b = Octree::from_points(shuffled, 8).expect("build b");
            let query_box = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(7.5));

            let first = sorted_boxes(a.query_overlap(&query_box));
            let again = sorted_boxes(a.query_overlap(&query_box));
            let permuted = sorted_boxes(b.query_overlap(&query_box));
            prop_assert_eq!(&first, &again);
            prop_assert_eq!(&first, &permuted);
            Ok(())
        })
        .expect("overlap property holds");
}

#[test]
fn depth_limit_counts_the_root_as_first_level() {
    let mesh = rolling_terrain();
    let flat = Octree::build(&mesh, 1).expect("build octree");
    assert_eq!(flat.node_count(), 1);
    assert_eq!(flat.leaf_count(), 1);

    let tree = Octree::build(&mesh, 3).expect("build octree");
    assert!(tree.depth() <= 3);
    let ray = Ray::downward(Vec3::new(0.1, 30.0, 0.1));
    let root_level = tree.query_ray_at_depth(&ray, 1).expect("hit root");
    assert!(core::ptr::eq(root_level, tree.root()));
}

#[test]
fn non_finite_points_never_vanish_from_the_tree() {
    let points = vec![
        Vec3::ZERO,
        Vec3::new(f32::NAN, 0.5, 0.5),
        Vec3::splat(1.0),
    ];
    assert_eq!(
        Octree::from_points(points, 4).err(),
        Some(GeomError::NonFiniteVertex { index: 1 })
    );
}

proptest! {
    #[test]
    fn partition_holds_for_random_point_clouds(
        coords in prop::collection::vec((-50.0f32..50.0, -5.0f32..5.0, -50.0f32..50.0), 1..128),
        depth in 0usize..10,
    ) {
        let points: Vec<Vec3> = coords.iter().map(|&(x, y, z)| Vec3::new(x, y, z)).collect();
        let tree = Octree::from_points(points.clone(), depth).expect("build");
        let mut seen = vec![0usize; points.len()];
        for leaf in tree.leaves() {
            for &i in leaf.points() {
                seen[i] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&n| n == 1));
        prop_assert!(tree.depth() <= depth.max(1));
    }
}
