// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::{Vec3, EPSILON};

/// Stateful `xoroshiro128+` pseudo-random number generator.
///
/// * Not cryptographically secure; use only for simulation jitter.
/// * Matching seeds yield identical sequences, so a whole run (turbulence,
///   explosion kicks, emitter spawn positions) replays exactly when every
///   consumer draws from the same generator in the same order.
#[derive(Debug, Clone)]
pub struct Prng {
    state: [u64; 2],
}

impl Prng {
    /// Constructs a PRNG from two 64-bit seeds.
    pub fn from_seed(seed0: u64, seed1: u64) -> Self {
        let mut state = [seed0, seed1];
        if state[0] == 0 && state[1] == 0 {
            state[0] = 0x9e37_79b9_7f4a_7c15;
        }
        Self { state }
    }

    /// Constructs a PRNG from a single 64-bit seed via SplitMix64 expansion.
    pub fn from_seed_u64(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        let s0 = splitmix64(&mut sm_state);
        let s1 = splitmix64(&mut sm_state);
        Self::from_seed(s0, s1)
    }

    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
        self.state[1] = s1.rotate_left(36);

        result
    }

    /// Returns the next float in `[0, 1)`.
    ///
    /// Uses the high 23 bits of the state to fill the mantissa.
    pub fn next_f32(&mut self) -> f32 {
        let raw = self.next_u64();
        #[allow(clippy::cast_possible_truncation)]
        let bits = ((raw >> 41) as u32) | 0x3f80_0000;
        f32::from_bits(bits) - 1.0
    }

    /// Returns a float drawn uniformly between `min` and `max`.
    ///
    /// The upper bound is only reachable through `f32` rounding. Swapped
    /// bounds are accepted; equal bounds return `min`.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Returns a vector whose components are drawn independently between
    /// `min_i` and `max_i`.
    pub fn next_vec3_between(&mut self, min: &Vec3, max: &Vec3) -> Vec3 {
        let x = self.next_range(min.x(), max.x());
        let y = self.next_range(min.y(), max.y());
        let z = self.next_range(min.z(), max.z());
        Vec3::new(x, y, z)
    }

    /// Returns a point drawn uniformly from the cube `[-1, 1]^3`.
    pub fn next_in_unit_cube(&mut self) -> Vec3 {
        self.next_vec3_between(&Vec3::splat(-1.0), &Vec3::splat(1.0))
    }

    /// Returns a unit vector with a random direction.
    ///
    /// Samples the unit cube and normalises, redrawing the (vanishingly rare)
    /// samples that land on the origin.
    pub fn next_unit_vector(&mut self) -> Vec3 {
        for _ in 0..32 {
            let candidate = self.next_in_unit_cube();
            if candidate.length() > EPSILON {
                return candidate.normalize();
            }
        }
        Vec3::UNIT_Y
    }

    /// Returns the next integer in the inclusive range `[min, max]`.
    ///
    /// Uses rejection sampling to avoid modulo bias. Swapped bounds are
    /// reordered.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let span = (i64::from(max) - i64::from(min)) as u64 + 1;
        if span == 1 {
            return min;
        }

        let value = if span.is_power_of_two() {
            self.next_u64() & (span - 1)
        } else {
            let bound = u64::MAX - u64::MAX % span;
            loop {
                let candidate = self.next_u64();
                if candidate < bound {
                    break candidate % span;
                }
            }
        };

        (value as i64 + i64::from(min)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_int_returns_single_value_for_equal_bounds() {
        let mut prng = Prng::from_seed(42, 99);
        assert_eq!(prng.next_int(7, 7), 7);
    }

    #[test]
    fn next_int_accepts_swapped_bounds() {
        let mut prng = Prng::from_seed(123, 456);
        for _ in 0..64 {
            let v = prng.next_int(-3, -10);
            assert!((-10..=-3).contains(&v));
        }
    }

    #[test]
    fn next_range_stays_inside_bounds() {
        let mut prng = Prng::from_seed_u64(7);
        for _ in 0..1_000 {
            let v = prng.next_range(0.8, 1.0);
            assert!((0.8..=1.0).contains(&v), "{v} escaped [0.8, 1.0]");
        }
    }

    #[test]
    fn unit_vectors_have_unit_length() {
        let mut prng = Prng::from_seed_u64(11);
        for _ in 0..256 {
            let len = prng.next_unit_vector().length();
            assert!((len - 1.0).abs() < 1e-5, "len = {len}");
        }
    }

    #[test]
    fn identical_seeds_replay_identical_sequences() {
        let mut a = Prng::from_seed_u64(0xC0FFEE);
        let mut b = Prng::from_seed_u64(0xC0FFEE);
        for _ in 0..16 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }
}
