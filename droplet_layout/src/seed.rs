// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic starting positions for the relaxation solver.
//!
//! Relaxation converges in a fixed number of steps only when it starts from
//! a spread-out configuration: seeding everything at the center would make
//! the collision pass spend its whole budget inflating one dense cluster.
//! The seed is a heuristic, not a layout; the solver owns final positions.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use core::f64::consts::TAU;

use kurbo::Vec2;

use crate::layout::Canvas;
use crate::node::Node;

/// How many spiral slots share a ring before the ring radius steps outward.
const RING_STEP: usize = 5;

/// First ring radius, as a fraction of the canvas's smaller side.
const BASE_RING_FRACTION: f64 = 0.25;

/// Ring radius growth per step, as a fraction of the canvas's smaller side.
const RING_GROWTH_FRACTION: f64 = 0.06;

/// Seeds starting coordinates for `nodes`, sorted by descending radius.
///
/// The first (largest) node is anchored at the canvas center. The remaining
/// nodes are placed on an expanding spiral: the angle advances by
/// `2π / (len - 1)` per node and the ring radius steps outward every
/// [`RING_STEP`] nodes, so large nodes sit close to the anchor and small
/// ones spiral outward. Every seeded position is clamped so the shape starts
/// inside the canvas.
pub fn seed_positions(nodes: &mut [Node], canvas: Canvas) {
    let Some((anchor, rest)) = nodes.split_first_mut() else {
        return;
    };
    anchor.pos = canvas.center();
    anchor.fixed = true;

    if rest.is_empty() {
        return;
    }
    let step = TAU / rest.len() as f64;
    let base = BASE_RING_FRACTION * canvas.min_side();
    let growth = RING_GROWTH_FRACTION * canvas.min_side();

    for (i, node) in rest.iter_mut().enumerate() {
        let ring = base + (i / RING_STEP) as f64 * growth;
        let angle = step * i as f64;
        let pos = canvas.center() + Vec2::new(angle.cos(), angle.sin()) * ring;
        node.pos = canvas.clamp(pos, node.radius);
        node.fixed = false;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    fn nodes(radii: &[f64]) -> Vec<Node> {
        radii.iter().map(|&r| Node::new(r)).collect()
    }

    #[test]
    fn largest_node_is_anchored_at_center() {
        let canvas = Canvas::new(600.0, 400.0);
        let mut nodes = nodes(&[50.0, 30.0, 20.0]);
        seed_positions(&mut nodes, canvas);

        assert!(nodes[0].fixed);
        assert_eq!(nodes[0].pos, canvas.center());
        assert!(!nodes[1].fixed);
        assert!(!nodes[2].fixed);
    }

    #[test]
    fn satellites_spread_out_inside_the_canvas() {
        let canvas = Canvas::new(600.0, 600.0);
        let mut nodes = nodes(&[60.0, 40.0, 30.0, 20.0, 10.0]);
        seed_positions(&mut nodes, canvas);

        for (i, node) in nodes.iter().enumerate() {
            assert!(node.pos.x >= node.radius - 1e-9, "node {i} left bound");
            assert!(node.pos.x <= 600.0 - node.radius + 1e-9, "node {i} right bound");
            assert!(node.pos.y >= node.radius - 1e-9, "node {i} top bound");
            assert!(node.pos.y <= 600.0 - node.radius + 1e-9, "node {i} bottom bound");
        }

        // No two satellites start on the same spot.
        for i in 1..nodes.len() {
            for j in (i + 1)..nodes.len() {
                assert!(
                    (nodes[i].pos - nodes[j].pos).hypot() > 1.0,
                    "nodes {i} and {j} coincide"
                );
            }
        }
    }

    #[test]
    fn single_node_layouts_are_just_the_anchor() {
        let canvas = Canvas::new(100.0, 100.0);
        let mut nodes = nodes(&[20.0]);
        seed_positions(&mut nodes, canvas);
        assert!(nodes[0].fixed);
        assert_eq!(nodes[0].pos, canvas.center());
    }
}
