// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! End-to-end frame stepping over a flat test terrain.

use lander_core::math::Vec3;
use lander_geom::TerrainMesh;
use lander_physics::{
    ControlInput, LanderWorld, LandingOutcome, PhysicsError, PhysicsObject, SimConfig,
    StepOutcome,
};

const DT: f32 = 1.0 / 60.0;

fn calm_config() -> SimConfig {
    let mut cfg = SimConfig::default();
    cfg.lander.turbulence_min = Vec3::ZERO;
    cfg.lander.turbulence_max = Vec3::ZERO;
    cfg
}

fn flat_ground() -> TerrainMesh {
    TerrainMesh::heightfield(21, 21, 0.5, |_, _| 0.0).expect("flat grid")
}

fn world(cfg: SimConfig) -> LanderWorld {
    LanderWorld::new(cfg, &flat_ground()).expect("world")
}

#[test]
fn empty_terrain_is_rejected() {
    let err = LanderWorld::new(SimConfig::default(), &TerrainMesh::default()).err();
    assert!(matches!(err, Some(PhysicsError::Geom(_))));
}

#[test]
fn idle_lander_falls_without_burning_fuel() {
    let mut w = world(calm_config());
    let mut report = None;
    for frame in 1..=30 {
        report = Some(w.step(frame as f32 * DT, DT, ControlInput::default()));
    }
    let report = report.expect("stepped");
    assert_eq!(report.step, StepOutcome::Advanced);
    assert_eq!(report.outcome, LandingOutcome::Airborne);
    assert_eq!(report.overlaps, 0);
    assert_eq!(report.fuel, 120.0);
    assert_eq!(report.particles, 0);
    assert!(w.lander().velocity().y() < 0.0);
    assert!(!w.exhaust().is_active());
}

#[test]
fn ascending_climbs_and_spawns_exhaust() {
    let mut w = world(calm_config());
    let up = ControlInput {
        ascend: true,
        ..ControlInput::default()
    };
    let mut spawned = 0;
    for frame in 1..=60 {
        spawned += w.step(frame as f32 * DT, DT, up).spawned;
    }
    assert!(w.lander().velocity().y() > 0.0);
    assert!(w.fuel() < 120.0 && w.fuel() > 118.9);
    assert!(w.exhaust().is_active());
    assert!(spawned > 0);
    assert!(!w.exhaust().system().is_empty());
}

#[test]
fn yaw_controls_turn_the_lander() {
    let mut w = world(calm_config());
    let left = ControlInput {
        yaw_left: true,
        ..ControlInput::default()
    };
    for frame in 1..=10 {
        let _ = w.step(frame as f32 * DT, DT, left);
    }
    assert!(w.lander().rotation() > 0.0);
}

#[test]
fn empty_tank_ignores_controls() {
    let mut cfg = calm_config();
    cfg.controls.fuel = 0.05;
    let mut w = world(cfg);
    let up = ControlInput {
        ascend: true,
        ..ControlInput::default()
    };
    let mut now = 0.0;
    for _ in 0..10 {
        now += 0.01;
        let _ = w.step(now, 0.01, up);
    }
    assert_eq!(w.fuel(), 0.0);
    assert!(!w.exhaust().is_active());
    let vy = w.lander().velocity().y();
    let _ = w.step(now + 0.01, 0.01, up);
    assert!(w.lander().velocity().y() < vy);
}

#[test]
fn altitude_measures_height_above_terrain() {
    let mut w = world(calm_config());
    let alt = w.altitude().expect("terrain below");
    assert!((alt - 20.0).abs() < 1e-5);
    w.lander_mut().set_position(Vec3::new(500.0, 20.0, 0.0));
    assert_eq!(w.altitude(), None);
}

#[test]
fn gentle_touchdown_lands() {
    let mut w = world(calm_config());
    w.lander_mut().set_position(Vec3::new(0.0, 0.5, 0.0));
    w.lander_mut().set_velocity(Vec3::new(0.0, -0.2, 0.0));
    let report = w.step(DT, DT, ControlInput::default());
    assert!(report.overlaps >= 5);
    assert_eq!(report.outcome, LandingOutcome::Landed);
    assert!(w.lander().velocity().y() > 0.0);
    assert!(!w.is_crashed());
}

#[test]
fn hard_impact_crashes_and_releases_debris() {
    let mut w = world(calm_config());
    w.lander_mut().set_position(Vec3::new(0.0, 0.5, 0.0));
    w.lander_mut().set_velocity(Vec3::new(0.0, -10.0, 0.0));
    let report = w.step(DT, DT, ControlInput::default());
    assert_eq!(report.outcome, LandingOutcome::Crashed);
    assert!(w.is_crashed());
    assert!(w.explosion().is_active());

    let after = w.step(2.0 * DT, DT, ControlInput {
        ascend: true,
        ..ControlInput::default()
    });
    assert_eq!(after.debris, w.config().explosion.group_size);
    assert_eq!(after.spawned, 0);
    assert_eq!(after.fuel, 120.0);
}

#[test]
fn unusable_dt_skips_motion() {
    let mut w = world(calm_config());
    let before = w.lander().position();
    let report = w.step(0.0, f32::NAN, ControlInput::default());
    assert_eq!(report.step, StepOutcome::Skipped);
    assert_eq!(w.lander().position(), before);
}

#[test]
fn same_seed_replays_identically() {
    let cfg = SimConfig::default();
    let mut a = world(cfg.clone());
    let mut b = world(cfg);
    let input = ControlInput {
        ascend: true,
        forward: true,
        ..ControlInput::default()
    };
    for frame in 1..=45 {
        let now = frame as f32 * DT;
        assert_eq!(a.step(now, DT, input), b.step(now, DT, input));
    }
    assert_eq!(a.lander(), b.lander());
}
