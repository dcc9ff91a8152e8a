// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed-step packing relaxation.
//!
//! This is intentionally not a general n-body engine: four forces, applied
//! as plain functions over a node slice in a fixed loop, so cost and
//! behavior stay fully predictable. Per step, every non-anchored node
//! receives a weak centering pull, pairwise inverse-distance repulsion, a
//! strong pairwise collision correction, and a pull toward a target ring
//! radius; velocities are then integrated with decay and positions clamped
//! to the canvas.
//!
//! The loop runs exactly `iterations` times. There is no convergence
//! detection and no randomness: identical inputs produce identical layouts.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::Vec2;

use crate::layout::Canvas;
use crate::node::Node;

/// Two centers closer than this are treated as coincident and separated
/// along a deterministic axis.
const COINCIDENT_EPS: f64 = 1e-6;

/// Tuning for the packing relaxation.
///
/// The force strengths are empirically tuned defaults, not load-bearing
/// invariants: any combination that keeps the property tests passing
/// (containment, determinism, separation on uncrowded canvases) is valid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverSpec {
    /// Number of relaxation steps; the solver always runs all of them.
    pub iterations: usize,
    /// Strength of the pull toward the canvas center.
    pub center_strength: f64,
    /// Magnitude of the pairwise inverse-distance repulsion.
    pub repulsion_strength: f64,
    /// Fraction of a pair's overlap corrected per step.
    pub collide_strength: f64,
    /// Extra separation beyond touching, in canvas units.
    pub collide_padding: f64,
    /// Target ring radius, as a fraction of the canvas's smaller side.
    pub ring_fraction: f64,
    /// Strength of the pull toward the target ring.
    pub ring_strength: f64,
    /// Fraction of velocity retained after each step.
    pub velocity_decay: f64,
    /// Overlap depth (in canvas units) below which a pair still counts as
    /// cleanly separated when scoring quality.
    pub overlap_tolerance: f64,
}

impl Default for SolverSpec {
    fn default() -> Self {
        Self {
            iterations: 200,
            center_strength: 0.02,
            repulsion_strength: 30.0,
            collide_strength: 0.7,
            collide_padding: 2.0,
            ring_fraction: 0.3,
            ring_strength: 0.04,
            velocity_decay: 0.6,
            overlap_tolerance: 0.5,
        }
    }
}

impl SolverSpec {
    /// Creates a solver spec with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the relaxation step count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the extra pairwise separation padding.
    pub fn with_collide_padding(mut self, padding: f64) -> Self {
        self.collide_padding = padding.max(0.0);
        self
    }

    /// Sets the target ring radius as a fraction of the canvas's smaller side.
    pub fn with_ring_fraction(mut self, fraction: f64) -> Self {
        self.ring_fraction = fraction.max(0.0);
        self
    }

    /// Runs the fixed relaxation loop over `nodes`.
    ///
    /// Anchored nodes never move but still repel and collide with others.
    /// After every step each non-anchored node is clamped so its shape stays
    /// inside the canvas.
    pub fn relax(&self, nodes: &mut [Node], canvas: Canvas) {
        let center = canvas.center();
        let ring_radius = self.ring_fraction * canvas.min_side();

        for _ in 0..self.iterations {
            // Centering and radial-target forces.
            for node in nodes.iter_mut() {
                if node.fixed {
                    continue;
                }
                let to_center = center - node.pos;
                node.vel += to_center * self.center_strength;

                let dist = to_center.hypot();
                if dist > COINCIDENT_EPS {
                    let outward = -to_center / dist;
                    node.vel += outward * ((ring_radius - dist) * self.ring_strength);
                }
            }

            // Pairwise repulsion (velocity) and collision correction
            // (position, Gauss-Seidel: later pairs see earlier corrections).
            for i in 0..nodes.len() {
                let (head, tail) = nodes.split_at_mut(i + 1);
                let a = &mut head[i];
                for (k, b) in tail.iter_mut().enumerate() {
                    let j = i + 1 + k;
                    let mut delta = b.pos - a.pos;
                    let mut dist = delta.hypot();
                    if dist < COINCIDENT_EPS {
                        delta = separation_axis(i, j);
                        dist = 1.0;
                    }
                    let dir = delta / dist;

                    let push = dir * (self.repulsion_strength / dist.max(1.0));
                    if !a.fixed {
                        a.vel -= push;
                    }
                    if !b.fixed {
                        b.vel += push;
                    }

                    let min_dist = a.radius + b.radius + self.collide_padding;
                    if dist < min_dist {
                        let correction = dir * ((min_dist - dist) * self.collide_strength);
                        match (a.fixed, b.fixed) {
                            (false, false) => {
                                a.pos -= correction * 0.5;
                                b.pos += correction * 0.5;
                            }
                            (true, false) => b.pos += correction,
                            (false, true) => a.pos -= correction,
                            (true, true) => {}
                        }
                    }
                }
            }

            // Integrate and clamp.
            for node in nodes.iter_mut() {
                if node.fixed {
                    node.vel = Vec2::ZERO;
                    continue;
                }
                node.pos += node.vel;
                node.vel *= self.velocity_decay;
                node.pos = canvas.clamp(node.pos, node.radius);
            }
        }
    }

    /// Scores residual overlap after relaxation.
    ///
    /// Returns a value in `[0, 1]`: `1.0` when no pair overlaps beyond
    /// [`SolverSpec::overlap_tolerance`], shrinking toward `0.0` as overlap
    /// deepens relative to the summed pair radii. Crowded inputs that cannot
    /// be separated in the step budget yield a score below one; that is a
    /// property of the layout worth surfacing, not an error.
    pub fn quality(&self, nodes: &[Node]) -> f64 {
        let mut deficit = 0.0;
        let mut scale = 0.0;
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let min_dist = nodes[i].radius + nodes[j].radius;
                let dist = (nodes[j].pos - nodes[i].pos).hypot();
                let depth = (min_dist - dist).max(0.0);
                if depth > self.overlap_tolerance {
                    deficit += depth - self.overlap_tolerance;
                }
                scale += min_dist;
            }
        }
        if scale == 0.0 {
            1.0
        } else {
            (1.0 - deficit / scale).clamp(0.0, 1.0)
        }
    }
}

/// Deterministic direction used to separate coincident centers.
///
/// Golden-angle spacing by pair index keeps repeated coincidences from all
/// resolving along the same axis.
fn separation_axis(i: usize, j: usize) -> Vec2 {
    let a = (i * 31 + j) as f64 * 2.399_963_229_728_653;
    Vec2::new(a.cos(), a.sin())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use kurbo::Point;

    use super::*;
    use crate::seed::seed_positions;

    fn seeded(radii: &[f64], canvas: Canvas) -> Vec<Node> {
        let mut nodes: Vec<Node> = radii.iter().map(|&r| Node::new(r)).collect();
        seed_positions(&mut nodes, canvas);
        nodes
    }

    #[test]
    fn nodes_stay_inside_the_canvas() {
        let canvas = Canvas::new(500.0, 300.0);
        let spec = SolverSpec::new();
        let mut nodes = seeded(&[60.0, 45.0, 40.0, 30.0, 25.0, 20.0], canvas);
        spec.relax(&mut nodes, canvas);

        for (i, node) in nodes.iter().enumerate() {
            assert!(node.pos.x >= node.radius - 1e-9, "node {i} left bound");
            assert!(
                node.pos.x <= canvas.width - node.radius + 1e-9,
                "node {i} right bound"
            );
            assert!(node.pos.y >= node.radius - 1e-9, "node {i} top bound");
            assert!(
                node.pos.y <= canvas.height - node.radius + 1e-9,
                "node {i} bottom bound"
            );
        }
    }

    #[test]
    fn anchored_node_never_moves() {
        let canvas = Canvas::new(400.0, 400.0);
        let spec = SolverSpec::new();
        let mut nodes = seeded(&[50.0, 30.0, 20.0], canvas);
        spec.relax(&mut nodes, canvas);
        assert_eq!(nodes[0].pos, canvas.center());
    }

    #[test]
    fn relaxation_is_deterministic() {
        let canvas = Canvas::new(640.0, 480.0);
        let spec = SolverSpec::new();

        let mut a = seeded(&[40.0, 35.0, 30.0, 25.0, 20.0, 15.0], canvas);
        let mut b = a.clone();
        spec.relax(&mut a, canvas);
        spec.relax(&mut b, canvas);
        assert_eq!(a, b);
    }

    #[test]
    fn overlapping_pair_separates_when_room_allows() {
        let canvas = Canvas::new(400.0, 400.0);
        let spec = SolverSpec::new();
        let mut nodes = seeded(&[20.0, 20.0], canvas);
        // Force a deep initial overlap next to the anchor.
        nodes[1].pos = canvas.center() + Vec2::new(10.0, 0.0);
        spec.relax(&mut nodes, canvas);

        let dist = (nodes[1].pos - nodes[0].pos).hypot();
        assert!(
            dist >= 40.0 + spec.collide_padding - 1e-6,
            "pair still overlapping at distance {dist}"
        );
        assert!((spec.quality(&nodes) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_centers_are_separated_deterministically() {
        let canvas = Canvas::new(400.0, 400.0);
        let spec = SolverSpec::new();
        let mut nodes = seeded(&[20.0, 15.0, 15.0], canvas);
        nodes[1].pos = Point::new(200.0, 200.0);
        nodes[2].pos = Point::new(200.0, 200.0);
        let mut again = nodes.clone();

        spec.relax(&mut nodes, canvas);
        spec.relax(&mut again, canvas);
        assert_eq!(nodes, again);
        assert!((nodes[1].pos - nodes[2].pos).hypot() > 1.0);
    }

    #[test]
    fn quality_flags_residual_overlap() {
        let spec = SolverSpec::new();
        let mut a = Node::new(30.0);
        a.pos = Point::new(100.0, 100.0);
        let mut b = Node::new(30.0);
        b.pos = Point::new(110.0, 100.0);

        let q = spec.quality(&[a, b]);
        assert!(q < 1.0);
        assert!(q >= 0.0);

        b.pos = Point::new(200.0, 100.0);
        assert!((spec.quality(&[a, b]) - 1.0).abs() < 1e-12);
    }
}
