// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-step run loop.

use lander_physics::{
    ControlInput, LanderWorld, LandingOutcome, PhysicsObject, StepOutcome,
};
use tracing::{debug, info};

use crate::autopilot::Autopilot;

/// How a run ended.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames stepped.
    pub frames: u32,
    /// Simulated seconds.
    pub elapsed: f32,
    /// Outcome of the last frame.
    pub outcome: LandingOutcome,
    /// Fuel left.
    pub fuel: f32,
    /// Largest exhaust particle count seen.
    pub peak_particles: usize,
    /// Frames whose integration was skipped.
    pub skipped: u32,
}

/// Frame length for `framerate` frames per second, or `None` when the rate is
/// not a finite positive number or its reciprocal overflows.
pub fn frame_dt(framerate: f32) -> Option<f32> {
    if !framerate.is_finite() || framerate <= 0.0 {
        return None;
    }
    Some(framerate.recip()).filter(|dt| dt.is_finite())
}

/// Steps `world` for up to `frames` frames of `dt` seconds, stopping early
/// once the lander lands or crashes.
pub fn run(world: &mut LanderWorld, frames: u32, dt: f32, pilot: Option<&Autopilot>) -> RunSummary {
    let mut summary = RunSummary {
        frames: 0,
        elapsed: 0.0,
        outcome: LandingOutcome::Airborne,
        fuel: world.fuel(),
        peak_particles: 0,
        skipped: 0,
    };
    for frame in 1..=frames {
        let now = frame as f32 * dt;
        let input = pilot.map_or_else(ControlInput::default, |p| {
            p.command(world.altitude(), world.lander().velocity().y())
        });
        let report = world.step(now, dt, input);
        debug!(
            frame,
            altitude = ?report.altitude,
            vy = world.lander().velocity().y(),
            fuel = report.fuel,
            particles = report.particles,
            "frame"
        );

        summary.frames = frame;
        summary.elapsed = now;
        summary.outcome = report.outcome;
        summary.fuel = report.fuel;
        summary.peak_particles = summary.peak_particles.max(report.particles);
        if report.step == StepOutcome::Skipped {
            summary.skipped += 1;
        }
        if matches!(report.outcome, LandingOutcome::Landed | LandingOutcome::Crashed) {
            break;
        }
    }
    info!(
        frames = summary.frames,
        elapsed = summary.elapsed,
        outcome = ?summary.outcome,
        fuel = summary.fuel,
        "run finished"
    );
    summary
}
