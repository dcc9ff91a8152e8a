// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The working body type shared by seeding and relaxation.

use kurbo::{Point, Vec2};

/// A working body in the packing relaxation.
///
/// Nodes are created by the orchestrator (one per item, sorted by descending
/// radius), positioned by [`crate::seed_positions`], and then mutated only by
/// [`crate::SolverSpec::relax`]. They are not retained between layout calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// Shape radius in canvas units.
    pub radius: f64,
    /// Center position in canvas coordinates.
    pub pos: Point,
    /// Accumulated velocity, integrated and decayed once per relaxation step.
    pub vel: Vec2,
    /// Anchored nodes never move.
    ///
    /// Exactly one node (the largest) is anchored at the canvas center so the
    /// layout has a stable reference and cannot drift as a whole.
    pub fixed: bool,
}

impl Node {
    /// Creates an unanchored node at the origin with zero velocity.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            pos: Point::ORIGIN,
            vel: Vec2::ZERO,
            fixed: false,
        }
    }
}
