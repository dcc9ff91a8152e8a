// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-to-radius scaling.
//!
//! Packed shapes encode values with *area*, not radius: a shape twice the
//! value must cover twice the pixels. [`ScaleSqrt`] therefore maps values
//! along the square root of the normalized domain position, and
//! [`SizeScaleSpec`] layers an area budget on top so the shapes collectively
//! leave the solver room to separate them.

extern crate alloc;

use alloc::vec::Vec;

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::layout::Canvas;

/// How much of `max_radius` the square-root scale may actually reach.
///
/// Leaving headroom below the hard maximum keeps the largest shape from
/// dominating the canvas before the area budget is even consulted.
const TOP_RADIUS_FRACTION: f64 = 0.8;

/// A square-root mapping from a continuous domain to a radius range.
///
/// `map` interpolates the range by `sqrt(t)` where `t` is the normalized
/// domain position, so the mapped radius squared (and with it the shape's
/// area) tracks the domain value linearly. Inputs outside the domain are
/// clamped; a degenerate domain maps everything to the low end of the range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleSqrt {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleSqrt {
    /// Creates a new scale mapping `domain` values to `range` radii.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = ((x - d0) / denom).clamp(0.0, 1.0);
        r0 + t.sqrt() * (r1 - r0)
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }
}

/// Specification for mapping item values to shape radii under an area budget.
#[derive(Clone, Copy, Debug)]
pub struct SizeScaleSpec {
    /// Radius assigned to a zero-valued item, in canvas units.
    pub min_radius: f64,
    /// Hard upper radius bound; the scale tops out at 80% of this.
    pub max_radius: f64,
    /// Fraction of the canvas area the summed shape areas may occupy.
    pub area_budget: f64,
}

impl Default for SizeScaleSpec {
    fn default() -> Self {
        Self {
            min_radius: 5.0,
            max_radius: 80.0,
            area_budget: 0.5,
        }
    }
}

impl SizeScaleSpec {
    /// Creates a size scale spec with default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum and maximum radius bounds.
    pub fn with_radius_bounds(mut self, min_radius: f64, max_radius: f64) -> Self {
        self.min_radius = min_radius.max(0.0);
        self.max_radius = max_radius.max(self.min_radius);
        self
    }

    /// Sets the area budget as a fraction of the canvas area.
    pub fn with_area_budget(mut self, area_budget: f64) -> Self {
        self.area_budget = area_budget.max(0.0);
        self
    }

    /// Computes one radius per value, in input order.
    ///
    /// Values are square-root scaled from `[0, max(value)]` into
    /// `[min_radius, 0.8 * max_radius]`; non-finite or negative values are
    /// treated as zero. If the summed shape area exceeds
    /// `canvas.area() * area_budget`, every radius is multiplied by one
    /// global `sqrt(budget / total)` factor. The uniform correction keeps
    /// pairwise area ratios exact, at the cost of letting corrected radii
    /// drop below `min_radius`.
    pub fn radii(&self, values: &[f64], canvas: Canvas) -> Vec<f64> {
        let vmax = values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .fold(0.0_f64, f64::max);

        let top = self.max_radius * TOP_RADIUS_FRACTION;
        let scale = ScaleSqrt::new((0.0, vmax), (self.min_radius, top.max(self.min_radius)));
        let mut radii: Vec<f64> = values
            .iter()
            .map(|&v| {
                let v = if v.is_finite() { v.max(0.0) } else { 0.0 };
                scale.map(v)
            })
            .collect();

        let total: f64 = radii.iter().map(|r| PI * r * r).sum();
        let budget = canvas.area() * self.area_budget;
        if total > budget && total > 0.0 {
            let correction = (budget / total).sqrt();
            for r in &mut radii {
                *r *= correction;
            }
        }
        radii
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn squared_radii_track_values_when_budget_is_idle() {
        // A zero minimum makes area proportionality exact.
        let spec = SizeScaleSpec::new().with_radius_bounds(0.0, 80.0);
        let canvas = Canvas::new(10_000.0, 10_000.0);
        let radii = spec.radii(&[100.0, 50.0, 25.0], canvas);

        let ratio = |a: f64, b: f64| (a * a) / (b * b);
        assert!((ratio(radii[0], radii[1]) - 2.0).abs() < 1e-9);
        assert!((ratio(radii[1], radii[2]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn budget_correction_caps_total_area_for_any_input() {
        let spec = SizeScaleSpec::new();
        let canvas = Canvas::new(100.0, 100.0);
        let values = vec![100.0; 20];
        let radii = spec.radii(&values, canvas);

        let total: f64 = radii.iter().map(|r| PI * r * r).sum();
        assert!(total <= canvas.area() * spec.area_budget + 1e-6);

        // The correction is uniform, so equal values keep equal radii.
        for r in &radii {
            assert!((r - radii[0]).abs() < 1e-12);
        }
    }

    #[test]
    fn all_zero_values_collapse_to_min_radius() {
        let spec = SizeScaleSpec::new();
        let canvas = Canvas::new(600.0, 600.0);
        let radii = spec.radii(&[0.0, 0.0, 0.0], canvas);
        for r in radii {
            assert!((r - spec.min_radius).abs() < 1e-12);
        }
    }

    #[test]
    fn non_finite_and_negative_values_floor_to_min_radius() {
        let spec = SizeScaleSpec::new();
        let canvas = Canvas::new(600.0, 600.0);
        let radii = spec.radii(&[f64::NAN, -3.0, 100.0], canvas);
        assert!((radii[0] - spec.min_radius).abs() < 1e-12);
        assert!((radii[1] - spec.min_radius).abs() < 1e-12);
        assert!(radii[2] > radii[0]);
    }

    #[test]
    fn sqrt_scale_clamps_out_of_domain_inputs() {
        let s = ScaleSqrt::new((0.0, 100.0), (5.0, 64.0));
        assert!((s.map(-10.0) - 5.0).abs() < 1e-12);
        assert!((s.map(1000.0) - 64.0).abs() < 1e-12);
        assert!((s.map(100.0) - 64.0).abs() < 1e-12);
    }
}
