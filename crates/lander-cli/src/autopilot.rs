// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bang-bang descent controller.
//!
//! Fires the ascent thruster whenever the lander sinks faster than a speed
//! limit that shrinks linearly from `cruise_speed` to `touchdown_speed` over
//! the last `flare_height` units above the ground.

use lander_core::math::clamp;
use lander_physics::ControlInput;

/// Vertical speed controller for scripted descents.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Autopilot {
    /// Sink rate allowed high above the ground.
    pub cruise_speed: f32,
    /// Sink rate allowed at touchdown.
    pub touchdown_speed: f32,
    /// Height over which the limit blends between the two.
    pub flare_height: f32,
    /// Distance from the lander origin to its underside.
    pub clearance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            cruise_speed: 2.0,
            touchdown_speed: 0.3,
            flare_height: 8.0,
            clearance: 1.0,
        }
    }
}

impl Autopilot {
    /// Sink-rate limit at `altitude` above the terrain.
    pub fn speed_limit(&self, altitude: f32) -> f32 {
        let height = (altitude - self.clearance).max(0.0);
        let blend = clamp(height / self.flare_height, 0.0, 1.0);
        self.touchdown_speed + (self.cruise_speed - self.touchdown_speed) * blend
    }

    /// Input for the next frame. With no ground below, the autopilot idles.
    pub fn command(&self, altitude: Option<f32>, vertical_velocity: f32) -> ControlInput {
        let Some(altitude) = altitude else {
            return ControlInput::default();
        };
        ControlInput {
            ascend: vertical_velocity < -self.speed_limit(altitude),
            ..ControlInput::default()
        }
    }
}
