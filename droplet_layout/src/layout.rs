// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The packed layout orchestrator.
//!
//! [`PackLayoutSpec`] composes the component specs into a single call:
//! items in, placed/sized/labeled nodes out. It holds no state between
//! invocations; concurrent layouts over distinct inputs are independent.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use droplet_text::TextMeasurer;

use crate::errors::LayoutError;
use crate::label::{FittedLabel, LabelFitSpec};
use crate::node::Node;
use crate::profile::ProfileKind;
use crate::scale::SizeScaleSpec;
use crate::seed::seed_positions;
use crate::solver::SolverSpec;

/// The bounded region shapes are packed into.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Canvas {
    /// Width in layout coordinate units.
    pub width: f64,
    /// Height in layout coordinate units.
    pub height: f64,
}

impl Canvas {
    /// Creates a canvas of the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the canvas center point.
    pub fn center(&self) -> Point {
        Point::new(0.5 * self.width, 0.5 * self.height)
    }

    /// Returns the canvas area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns the smaller of width and height.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Returns `true` when both dimensions are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Clamps `pos` so a shape of radius `inset` stays fully inside.
    ///
    /// A shape wider than the canvas is pinned to the center line instead.
    pub fn clamp(&self, pos: Point, inset: f64) -> Point {
        let x = if 2.0 * inset >= self.width {
            0.5 * self.width
        } else {
            pos.x.clamp(inset, self.width - inset)
        };
        let y = if 2.0 * inset >= self.height {
            0.5 * self.height
        } else {
            pos.y.clamp(inset, self.height - inset)
        };
        Point::new(x, y)
    }
}

/// One weighted input item.
///
/// The engine formats nothing: `category` and `value_text` arrive as the
/// exact strings to fit, already extracted and formatted by the caller's
/// theme/config layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Identifier, unique within one layout call.
    pub id: String,
    /// Non-negative weight; drives the shape's area.
    pub value: f64,
    /// Category label text (possibly empty).
    pub category: String,
    /// Preformatted value text (possibly empty).
    pub value_text: String,
}

impl Item {
    /// Creates an item with empty label strings.
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
            category: String::new(),
            value_text: String::new(),
        }
    }

    /// Sets the category label text.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the preformatted value text.
    pub fn with_value_text(mut self, value_text: impl Into<String>) -> Self {
        self.value_text = value_text.into();
        self
    }
}

/// One placed, sized, and labeled output record.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedNode {
    /// The originating item's id.
    pub id: String,
    /// Final center position in canvas coordinates.
    pub pos: Point,
    /// Final shape radius.
    pub radius: f64,
    /// `true` for the single anchor node (the largest item).
    pub anchor: bool,
    /// The fitted text layout (possibly empty).
    pub label: FittedLabel,
}

/// The result of one layout call.
#[derive(Clone, Debug, PartialEq)]
pub struct PackLayout {
    /// One record per input item, in input order.
    pub nodes: Vec<PackedNode>,
    /// Residual-overlap score in `[0, 1]`; `1.0` means no pair overlaps
    /// beyond the solver's tolerance. See [`SolverSpec::quality`].
    pub quality: f64,
}

/// The packed-bubble layout pipeline: sizing, seeding, relaxation, and
/// label fitting behind one entry point.
///
/// All tuning lives in the component specs; there are no module-level or
/// process-wide defaults to mutate. A spec can be reused across calls and
/// threads freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct PackLayoutSpec {
    /// Value-to-radius mapping and area budget.
    pub size: SizeScaleSpec,
    /// Relaxation tuning.
    pub solver: SolverSpec,
    /// Label fitting tuning.
    pub label: LabelFitSpec,
    /// Silhouette family used for every shape.
    pub profile: ProfileKind,
}

impl PackLayoutSpec {
    /// Creates a layout spec with default tuning and circular shapes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the silhouette family.
    pub fn with_profile(mut self, profile: ProfileKind) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the minimum and maximum shape radii.
    pub fn with_radius_bounds(mut self, min_radius: f64, max_radius: f64) -> Self {
        self.size = self.size.with_radius_bounds(min_radius, max_radius);
        self
    }

    /// Sets the area budget as a fraction of the canvas area.
    pub fn with_area_budget(mut self, area_budget: f64) -> Self {
        self.size = self.size.with_area_budget(area_budget);
        self
    }

    /// Sets the relaxation step count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.solver = self.solver.with_iterations(iterations);
        self
    }

    /// Sets the minimum and maximum label font sizes.
    pub fn with_font_bounds(mut self, min_font_size: f64, max_font_size: f64) -> Self {
        self.label = self.label.with_font_bounds(min_font_size, max_font_size);
        self
    }

    /// Computes a packed, labeled layout for `items`.
    ///
    /// Returns one record per item, in input order. An empty `items` slice
    /// is a no-op yielding an empty layout; a degenerate canvas is an
    /// error. Identical inputs always produce identical output.
    pub fn layout(
        &self,
        items: &[Item],
        canvas: Canvas,
        measurer: &dyn TextMeasurer,
    ) -> Result<PackLayout, LayoutError> {
        if !canvas.is_valid() {
            return Err(LayoutError::DegenerateCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        if items.is_empty() {
            return Ok(PackLayout {
                nodes: Vec::new(),
                quality: 1.0,
            });
        }

        let values: Vec<f64> = items.iter().map(|item| item.value).collect();
        let radii = self.size.radii(&values, canvas);

        // Solver order is by descending radius; ties keep input order.
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| radii[b].total_cmp(&radii[a]));
        let mut slot_of = alloc::vec![0_usize; items.len()];
        for (slot, &item_ix) in order.iter().enumerate() {
            slot_of[item_ix] = slot;
        }

        let mut nodes: Vec<Node> = order.iter().map(|&ix| Node::new(radii[ix])).collect();
        seed_positions(&mut nodes, canvas);
        self.solver.relax(&mut nodes, canvas);
        let quality = self.solver.quality(&nodes);

        let records = items
            .iter()
            .enumerate()
            .map(|(ix, item)| {
                let node = nodes[slot_of[ix]];
                let silhouette = self.profile.for_radius(node.radius);
                let label =
                    self.label
                        .fit(&silhouette, &item.category, &item.value_text, measurer);
                PackedNode {
                    id: item.id.clone(),
                    pos: node.pos,
                    radius: node.radius,
                    anchor: node.fixed,
                    label,
                }
            })
            .collect();

        Ok(PackLayout {
            nodes: records,
            quality,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use droplet_text::HeuristicTextMeasurer;

    use super::*;

    #[test]
    fn degenerate_canvas_is_an_error() {
        let spec = PackLayoutSpec::new();
        let items = [Item::new("a", 1.0)];
        for canvas in [
            Canvas::new(0.0, 600.0),
            Canvas::new(600.0, -1.0),
            Canvas::new(f64::NAN, 600.0),
        ] {
            let err = spec
                .layout(&items, canvas, &HeuristicTextMeasurer)
                .expect_err("degenerate canvas should fail");
            assert!(matches!(err, LayoutError::DegenerateCanvas { .. }));
        }
    }

    #[test]
    fn empty_items_are_a_no_op() {
        let spec = PackLayoutSpec::new();
        let layout = spec
            .layout(&[], Canvas::new(600.0, 600.0), &HeuristicTextMeasurer)
            .expect("empty input should succeed");
        assert!(layout.nodes.is_empty());
        assert_eq!(layout.quality, 1.0);
    }

    #[test]
    fn clamp_pins_oversized_shapes_to_the_center_line() {
        let canvas = Canvas::new(100.0, 40.0);
        let p = canvas.clamp(Point::new(-50.0, 39.0), 30.0);
        assert_eq!(p.x, 30.0);
        assert_eq!(p.y, 20.0);
    }
}
