// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the terrain index (AABB, ray).
//!
//! Overlap semantics are inclusive on faces so a lander resting exactly on a
//! leaf boundary still registers contact.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Parametric rays for slab tests."]
pub mod ray;
