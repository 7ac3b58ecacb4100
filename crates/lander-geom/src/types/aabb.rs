// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use lander_core::math::Vec3;

use crate::error::GeomError;
use crate::types::ray::Ray;

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Never carries a rotation; rotated shapes must be re-bounded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from two opposite corners.
    ///
    /// Corners are normalised component-wise, so swapped inputs still yield a
    /// valid box. Use [`Aabb::try_new`] to reject them instead.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    /// Constructs an AABB, failing if any `min` component exceeds `max`.
    pub fn try_new(min: Vec3, max: Vec3) -> Result<Self, GeomError> {
        for axis in 0..3 {
            let (lo, hi) = (min.axis(axis), max.axis(axis));
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(GeomError::InvertedBounds {
                    axis,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Returns the minimum corner.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Returns the box extent on each axis.
    pub fn size(&self) -> Vec3 {
        self.max.sub(&self.min)
    }

    /// Returns the box centre.
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.size().scale(0.5))
    }

    /// Returns the box volume.
    pub fn volume(&self) -> f32 {
        let s = self.size();
        s.x() * s.y() * s.z()
    }

    /// Builds an AABB centred at `center` with half-extents `he`.
    pub fn from_center_half_extents(center: Vec3, he: Vec3) -> Self {
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Builds the minimal AABB containing all `points` in a single linear
    /// scan. Returns `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Returns the box moved by `offset`.
    pub fn translated(&self, offset: &Vec3) -> Self {
        Self {
            min: self.min.add(offset),
            max: self.max.add(offset),
        }
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    ///
    /// All three axis intervals must intersect.
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|axis| {
            self.min.axis(axis) <= other.max.axis(axis)
                && other.min.axis(axis) <= self.max.axis(axis)
        })
    }

    /// Returns `true` if `p` lies inside the box or on its faces.
    pub fn contains(&self, p: &Vec3) -> bool {
        (0..3).all(|axis| {
            let v = p.axis(axis);
            self.min.axis(axis) <= v && v <= self.max.axis(axis)
        })
    }

    /// Half-open containment test used to partition points between siblings.
    ///
    /// Each axis is `[min, max)`, except axes flagged in `closed_upper`, which
    /// are `[min, max]`. Sibling boxes that share a face therefore never both
    /// claim a point on that face.
    pub fn contains_half_open(&self, p: &Vec3, closed_upper: [bool; 3]) -> bool {
        (0..3).all(|axis| {
            let v = p.axis(axis);
            let lo = self.min.axis(axis);
            let hi = self.max.axis(axis);
            lo <= v && (v < hi || (closed_upper[axis] && v <= hi))
        })
    }

    /// Returns the union of two AABBs.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    ///
    /// Negative margins shrink the box; the result is re-normalised.
    pub fn inflate(&self, m: f32) -> Self {
        let delta = Vec3::splat(m);
        Self::new(self.min.sub(&delta), self.max.add(&delta))
    }

    /// Splits the box into eight equal octants.
    ///
    /// Order is the "ground floor" first (`-Y` half): `(-x,-z)`, `(+x,-z)`,
    /// `(+x,+z)`, `(-x,+z)`, then the same four footprints on the `+Y` half.
    /// Coordinates are taken from `min`, `center`, and `max` directly so the
    /// octants tile the parent exactly.
    pub fn subdivide8(&self) -> [Self; 8] {
        let c = self.center();
        let xs = [(self.min.x(), c.x()), (c.x(), self.max.x())];
        let ys = [(self.min.y(), c.y()), (c.y(), self.max.y())];
        let zs = [(self.min.z(), c.z()), (c.z(), self.max.z())];
        let mut out = [*self; 8];
        for (i, slot) in out.iter_mut().enumerate() {
            let [hx, hy, hz] = octant_high_sides(i);
            let (x0, x1) = xs[usize::from(hx)];
            let (y0, y1) = ys[usize::from(hy)];
            let (z0, z1) = zs[usize::from(hz)];
            *slot = Self {
                min: Vec3::new(x0, y0, z0),
                max: Vec3::new(x1, y1, z1),
            };
        }
        out
    }

    /// Slab test: returns the parametric interval `[t_enter, t_exit]` where
    /// `ray` is inside the box, clipped to `[t0, t1]`.
    ///
    /// Axis-parallel rays are handled explicitly so an origin lying on a slab
    /// plane never produces `0 * inf = NaN`.
    pub fn ray_interval(&self, ray: &Ray, t0: f32, t1: f32) -> Option<(f32, f32)> {
        let origin = ray.origin();
        let dir = ray.direction();
        let mut t_min = t0;
        let mut t_max = t1;
        for axis in 0..3 {
            let o = origin.axis(axis);
            let d = dir.axis(axis);
            let lo = self.min.axis(axis);
            let hi = self.max.axis(axis);
            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (near, far) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b {
                    (a, b)
                } else {
                    (b, a)
                }
            };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }
        Some((t_min, t_max))
    }

    /// Returns `true` if `ray` enters the box for some `t` in `[t0, t1]`.
    pub fn intersects_ray(&self, ray: &Ray, t0: f32, t1: f32) -> bool {
        self.ray_interval(ray, t0, t1).is_some()
    }
}

/// Which half (`false` = low, `true` = high) octant `i` occupies on x, y, z.
pub(crate) const fn octant_high_sides(i: usize) -> [bool; 3] {
    let footprint = i % 4;
    [footprint == 1 || footprint == 2, i >= 4, footprint >= 2]
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::splat(2.0))
    }

    #[test]
    fn new_normalises_swapped_corners() {
        let b = Aabb::new(Vec3::new(1.0, -1.0, 3.0), Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(b.min().to_array(), [-1.0, -1.0, 0.0]);
        assert_eq!(b.max().to_array(), [1.0, 1.0, 3.0]);
    }

    #[test]
    fn try_new_rejects_inverted_axis() {
        let err = Aabb::try_new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(
            err,
            Err(GeomError::InvertedBounds {
                axis: 1,
                min: 2.0,
                max: 1.0
            })
        );
    }

    #[test]
    fn touching_faces_overlap() {
        let a = unit();
        let b = a.translated(&Vec3::new(2.0, 0.0, 0.0));
        let c = a.translated(&Vec3::new(2.5, 0.0, 0.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn octants_follow_ground_floor_then_second_story() {
        let parts = unit().subdivide8();
        assert_eq!(parts[0].min().to_array(), [0.0, 0.0, 0.0]);
        assert_eq!(parts[1].min().to_array(), [1.0, 0.0, 0.0]);
        assert_eq!(parts[2].min().to_array(), [1.0, 0.0, 1.0]);
        assert_eq!(parts[3].min().to_array(), [0.0, 0.0, 1.0]);
        for i in 0..4 {
            let lower = parts[i];
            let upper = parts[i + 4];
            assert_eq!(upper.min().to_array(), lower.min().add(&Vec3::UNIT_Y).to_array());
        }
        let total: f32 = parts.iter().map(Aabb::volume).sum();
        assert!((total - unit().volume()).abs() < 1e-6);
    }

    #[test]
    fn slab_test_hits_and_misses() {
        let b = unit();
        let down = Ray::downward(Vec3::new(1.0, 10.0, 1.0));
        let (enter, exit) = b.ray_interval(&down, 0.0, f32::MAX).expect("ray hits box");
        assert_eq!(enter, 8.0);
        assert_eq!(exit, 10.0);

        let beside = Ray::downward(Vec3::new(3.0, 10.0, 1.0));
        assert!(!b.intersects_ray(&beside, 0.0, f32::MAX));

        let away = Ray::new(Vec3::new(1.0, 10.0, 1.0), Vec3::UNIT_Y);
        assert!(!b.intersects_ray(&away, 0.0, f32::MAX));
    }

    #[test]
    fn ray_starting_on_slab_plane_is_not_nan() {
        let b = unit();
        let r = Ray::new(Vec3::new(0.0, 1.0, 1.0), Vec3::UNIT_X);
        assert!(b.intersects_ray(&r, 0.0, f32::MAX));
    }

    #[test]
    fn half_open_membership_assigns_shared_face_once() {
        let parts = unit().subdivide8();
        let p = Vec3::new(1.0, 0.5, 0.5);
        let claims = parts
            .iter()
            .enumerate()
            .filter(|(i, b)| {
                let closed = octant_high_sides(*i);
                b.contains_half_open(&p, closed)
            })
            .count();
        assert_eq!(claims, 1);
    }
}
