// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Support code for the `lander-sim` headless runner: a filesystem config
//! store, procedural terrain, and a descent autopilot.
#![forbid(unsafe_code)]

pub mod autopilot;
pub mod config_fs;
pub mod run;
pub mod terrain;

pub use autopilot::Autopilot;
pub use config_fs::FsConfigStore;
pub use run::{frame_dt, run, RunSummary};
