// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape silhouettes as width oracles.
//!
//! Label fitting never inspects concrete geometry; it asks a
//! [`ShapeProfile`] how much horizontal space the silhouette offers at a
//! vertical offset from the shape's center and compares measured text
//! against that budget. Concrete silhouettes (circle, teardrop, future
//! shapes) implement the same one-method-ish contract, so the fitter works
//! unchanged for all of them.
//!
//! Canvas coordinates grow downward, so negative offsets are *above* the
//! shape center.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use core::f64::consts::PI;

use kurbo::{Arc, BezPath, Circle, Point, Shape, Vec2};

/// Horizontal space available in a shape at a vertical offset from center.
///
/// Contract every implementation must satisfy:
/// - `width_at` is non-negative and symmetric about the vertical axis,
/// - zero at `|dy| >= radius()`, and
/// - non-increasing from its interior maximum toward both ends.
///
/// The last point lets callers bound the width over a vertical band by its
/// two endpoints, which is how the label fitter tests whole text lines.
pub trait ShapeProfile {
    /// Returns the shape's radius (half its vertical extent).
    fn radius(&self) -> f64;

    /// Returns the horizontal space available at vertical offset `dy` from
    /// the shape center.
    fn width_at(&self, dy: f64) -> f64;
}

/// A circular silhouette; `width_at` is the chord length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleProfile {
    radius: f64,
}

impl CircleProfile {
    /// Creates a circle profile with the given radius.
    pub fn new(radius: f64) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }
}

impl ShapeProfile for CircleProfile {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn width_at(&self, dy: f64) -> f64 {
        let r = self.radius;
        2.0 * (r * r - dy * dy).max(0.0).sqrt()
    }
}

/// How strongly the teardrop narrows toward its top tip.
///
/// At offset `-r` the width is zero regardless; this shrinks the upper half
/// *between* center and tip relative to a circle's chord.
const UPPER_TAPER: f64 = 0.45;

/// A teardrop silhouette: a circular bulb below center, tapering to a tip
/// above.
///
/// The width oracle is slightly narrower than the drawn outline in the upper
/// half, so text that passes the fit test stays inside the rendered shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeardropProfile {
    radius: f64,
}

impl TeardropProfile {
    /// Creates a teardrop profile with the given radius.
    pub fn new(radius: f64) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }
}

impl ShapeProfile for TeardropProfile {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn width_at(&self, dy: f64) -> f64 {
        let r = self.radius;
        if r <= 0.0 {
            return 0.0;
        }
        let t = dy / r;
        if t.abs() >= 1.0 {
            return 0.0;
        }
        let chord = 2.0 * r * (1.0 - t * t).sqrt();
        if t >= 0.0 {
            chord
        } else {
            chord * (1.0 - UPPER_TAPER * (-t))
        }
    }
}

/// The silhouette families the engine ships with.
///
/// This is the caller-facing selector: pick a kind in
/// [`crate::PackLayoutSpec`] and the orchestrator instantiates one profile
/// per placed node. Custom silhouettes can bypass this enum entirely by
/// implementing [`ShapeProfile`] and running the label fitter directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// A circular shape.
    #[default]
    Circle,
    /// A teardrop: narrow above center, bulbous below.
    Teardrop,
}

impl ProfileKind {
    /// Instantiates the profile for a shape of the given radius.
    pub fn for_radius(self, radius: f64) -> Silhouette {
        match self {
            Self::Circle => Silhouette::Circle(CircleProfile::new(radius)),
            Self::Teardrop => Silhouette::Teardrop(TeardropProfile::new(radius)),
        }
    }
}

/// A concrete silhouette instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Silhouette {
    /// A circle profile.
    Circle(CircleProfile),
    /// A teardrop profile.
    Teardrop(TeardropProfile),
}

impl Silhouette {
    /// Returns a closed outline path for this silhouette centered at `center`.
    ///
    /// The outline is what a renderer draws; the width oracle is what the
    /// fitter budgets against. `tolerance` is the curve flattening tolerance
    /// used when converting arcs, usually based on the target device/pixel
    /// size.
    pub fn outline(&self, center: Point, tolerance: f64) -> BezPath {
        match self {
            Self::Circle(p) => Circle::new(center, p.radius())
                .path_elements(tolerance)
                .collect(),
            Self::Teardrop(p) => teardrop_path(center, p.radius(), tolerance),
        }
    }
}

impl ShapeProfile for Silhouette {
    fn radius(&self) -> f64 {
        match self {
            Self::Circle(p) => p.radius(),
            Self::Teardrop(p) => p.radius(),
        }
    }

    fn width_at(&self, dy: f64) -> f64 {
        match self {
            Self::Circle(p) => p.width_at(dy),
            Self::Teardrop(p) => p.width_at(dy),
        }
    }
}

fn teardrop_path(center: Point, r: f64, tolerance: f64) -> BezPath {
    let tip = Point::new(center.x, center.y - r);
    let left = Point::new(center.x - r, center.y);
    let right = Point::new(center.x + r, center.y);

    let mut path = BezPath::new();
    path.move_to(tip);
    path.curve_to(
        Point::new(center.x - 0.28 * r, center.y - 0.62 * r),
        Point::new(left.x, center.y - 0.30 * r),
        left,
    );
    // Bottom bulb, left to right through the lowest point.
    let bulb = Arc::new(center, Vec2::new(r, r), PI, -PI, 0.0);
    path.extend(bulb.append_iter(tolerance));
    path.curve_to(
        Point::new(right.x, center.y - 0.30 * r),
        Point::new(center.x + 0.28 * r, center.y - 0.62 * r),
        tip,
    );
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn circle_chord_matches_geometry() {
        let p = CircleProfile::new(10.0);
        assert!((p.width_at(0.0) - 20.0).abs() < 1e-9);
        assert!((p.width_at(6.0) - 16.0).abs() < 1e-9);
        assert!((p.width_at(-6.0) - 16.0).abs() < 1e-9);
        assert_eq!(p.width_at(10.0), 0.0);
        assert_eq!(p.width_at(-11.0), 0.0);
    }

    #[test]
    fn teardrop_is_narrower_above_center_than_below() {
        let p = TeardropProfile::new(10.0);
        assert!(p.width_at(-5.0) < p.width_at(5.0));
        assert!(p.width_at(-5.0) > 0.0);
        assert_eq!(p.width_at(-10.0), 0.0);
        assert_eq!(p.width_at(10.0), 0.0);
    }

    #[test]
    fn profiles_are_non_increasing_away_from_their_maximum() {
        for kind in [ProfileKind::Circle, ProfileKind::Teardrop] {
            let p = kind.for_radius(20.0);
            let mut prev = p.width_at(0.0);
            for i in 1..=20 {
                let dy = i as f64;
                let below = p.width_at(dy);
                assert!(below <= prev + 1e-12, "{kind:?} widened below center");
                prev = below;
            }
            let mut prev = p.width_at(0.0);
            for i in 1..=20 {
                let dy = -(i as f64);
                let above = p.width_at(dy);
                assert!(above <= prev + 1e-12, "{kind:?} widened above center");
                prev = above;
            }
        }
    }

    #[test]
    fn outlines_cover_the_profile_extent() {
        let center = Point::new(50.0, 50.0);
        for kind in [ProfileKind::Circle, ProfileKind::Teardrop] {
            let outline = kind.for_radius(20.0).outline(center, 0.1);
            let bbox = outline.bounding_box();
            assert!((bbox.height() - 40.0).abs() < 0.5, "{kind:?} height");
            assert!((bbox.width() - 40.0).abs() < 0.5, "{kind:?} width");
        }
    }
}
