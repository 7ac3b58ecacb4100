// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Spatial indexing over static terrain.
//!
//! Query contract:
//! - Ray queries return the first intersecting leaf in child insertion order.
//! - Box queries return every overlapping leaf box; the count doubles as a
//!   cheap penetration estimate for collision response.

#[doc = "Static point octree with ray and overlap queries."]
pub mod octree;
