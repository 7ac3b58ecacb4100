// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for lander tools. Holds the config storage
//! port so simulation crates and runners stay independent of where configs
//! live.
#![forbid(unsafe_code)]

pub mod config;

pub use config::{ConfigError, ConfigService, ConfigStore, MemoryConfigStore};
