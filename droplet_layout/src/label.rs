// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-shape label fitting.
//!
//! Each packed shape wants two lines of text: the category name and its
//! value. The fitter searches for the largest font size whose stacked text
//! block fits the shape's [`ShapeProfile`], in strict fallback order: shrink
//! the font, wrap the category onto two lines, drop the category and keep
//! the value, and finally hide all text. Width growth is monotonic in font
//! size, so a simple descending search finds the optimum.
//!
//! Fitting is pure computation against an injected [`TextMeasurer`]; re-run
//! it whenever a node's radius or strings change.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use droplet_text::{TextMeasurer, TextStyle};

use crate::profile::ShapeProfile;

/// One rendered line of a fitted label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelLine {
    /// The line's text.
    pub text: String,
    /// Vertical offset of the line's center from the shape center.
    pub dy: f64,
}

/// The text layout chosen for one shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FittedLabel {
    /// Font size for the category lines.
    ///
    /// Meaningful only when `category_lines` is non-empty.
    pub category_font_size: f64,
    /// Font size for the value line.
    ///
    /// Meaningful only when `value_line` is present.
    pub value_font_size: f64,
    /// The category text, as zero, one, or two lines.
    pub category_lines: SmallVec<[LabelLine; 2]>,
    /// The value line, or `None` when it was suppressed.
    pub value_line: Option<LabelLine>,
}

impl FittedLabel {
    /// A label with all text suppressed.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Returns `true` when no text will be rendered.
    pub fn is_empty(&self) -> bool {
        self.category_lines.is_empty() && self.value_line.is_none()
    }
}

/// Tuning for label fitting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelFitSpec {
    /// Smallest legible font size; nothing below this is ever emitted.
    pub min_font_size: f64,
    /// Largest font size the search starts from.
    pub max_font_size: f64,
    /// Starting font size per unit of shape radius.
    pub font_scale: f64,
    /// Value line size relative to the category line.
    pub value_font_ratio: f64,
    /// Vertical gap between stacked lines, in canvas units.
    pub line_gap: f64,
    /// Vertical offset of the text block center, as a fraction of the
    /// radius; negative values shift the block toward the upper half.
    pub block_shift: f64,
    /// Maximum text block height as a fraction of the shape radius.
    pub max_block_ratio: f64,
}

impl Default for LabelFitSpec {
    fn default() -> Self {
        Self {
            min_font_size: 8.0,
            max_font_size: 26.0,
            font_scale: 0.35,
            value_font_ratio: 0.85,
            line_gap: 2.0,
            block_shift: -0.1,
            max_block_ratio: 1.8,
        }
    }
}

impl LabelFitSpec {
    /// Creates a label fit spec with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum and maximum font sizes.
    pub fn with_font_bounds(mut self, min_font_size: f64, max_font_size: f64) -> Self {
        self.min_font_size = min_font_size.max(0.0);
        self.max_font_size = max_font_size.max(self.min_font_size);
        self
    }

    /// Sets the starting font size per unit of radius.
    pub fn with_font_scale(mut self, font_scale: f64) -> Self {
        self.font_scale = font_scale.max(0.0);
        self
    }

    /// Sets the text block center offset as a fraction of the radius.
    pub fn with_block_shift(mut self, block_shift: f64) -> Self {
        self.block_shift = block_shift;
        self
    }

    /// Finds the largest text layout that fits `profile`.
    ///
    /// `category` may wrap onto a second line; `value_text` never wraps.
    /// Either string may be empty, meaning that line is simply not wanted.
    pub fn fit(
        &self,
        profile: &impl ShapeProfile,
        category: &str,
        value_text: &str,
        measurer: &dyn TextMeasurer,
    ) -> FittedLabel {
        let r = profile.radius();
        if r <= 0.0 {
            return FittedLabel::hidden();
        }
        let category = category.trim();
        let value_text = value_text.trim();
        let start = (r * self.font_scale)
            .max(self.min_font_size)
            .min(self.max_font_size);

        // Category (one line, then wrapped) plus value, largest font first.
        if !category.is_empty() {
            let wrapped = split_midpoint(category);
            let mut f = start;
            loop {
                let vf = self.value_font_size(f);
                if let Some(label) =
                    self.try_stack(profile, &[(category, f)], value_text, vf, measurer)
                {
                    return label;
                }
                if let Some((first, second)) = &wrapped
                    && let Some(label) = self.try_stack(
                        profile,
                        &[(first.as_str(), f), (second.as_str(), f)],
                        value_text,
                        vf,
                        measurer,
                    )
                {
                    return label;
                }
                if f <= self.min_font_size {
                    break;
                }
                f = (f - 1.0).max(self.min_font_size);
            }
        }

        // Category dropped: the value line alone, re-centered.
        if !value_text.is_empty() {
            let mut f = start;
            loop {
                let vf = self.value_font_size(f);
                if let Some(label) = self.try_value_only(profile, value_text, vf, measurer) {
                    return label;
                }
                if f <= self.min_font_size {
                    break;
                }
                f = (f - 1.0).max(self.min_font_size);
            }
        }

        FittedLabel::hidden()
    }

    fn value_font_size(&self, category_font_size: f64) -> f64 {
        (category_font_size * self.value_font_ratio)
            .max(self.min_font_size)
            .min(self.max_font_size)
    }

    /// Tries category lines stacked above the value line as one block.
    fn try_stack(
        &self,
        profile: &impl ShapeProfile,
        category_lines: &[(&str, f64)],
        value_text: &str,
        value_font_size: f64,
        measurer: &dyn TextMeasurer,
    ) -> Option<FittedLabel> {
        let r = profile.radius();

        let mut heights: Vec<f64> = category_lines
            .iter()
            .map(|(text, f)| measurer.measure(text, TextStyle::new(*f)).height())
            .collect();
        if !value_text.is_empty() {
            heights.push(
                measurer
                    .measure(value_text, TextStyle::new(value_font_size))
                    .height(),
            );
        }

        let line_count = heights.len();
        let block_h: f64 =
            heights.iter().sum::<f64>() + self.line_gap * (line_count - 1) as f64;
        if block_h > self.max_block_ratio * r {
            return None;
        }

        let mut cursor = self.block_shift * r - 0.5 * block_h;
        let mut offsets = Vec::with_capacity(line_count);
        for h in &heights {
            offsets.push(cursor + 0.5 * h);
            cursor += h + self.line_gap;
        }

        for (k, (text, f)) in category_lines.iter().enumerate() {
            if !line_fits(profile, text, *f, offsets[k], heights[k], measurer) {
                return None;
            }
        }
        let value_line = if value_text.is_empty() {
            None
        } else {
            let k = line_count - 1;
            if !line_fits(
                profile,
                value_text,
                value_font_size,
                offsets[k],
                heights[k],
                measurer,
            ) {
                return None;
            }
            Some(LabelLine {
                text: String::from(value_text),
                dy: offsets[k],
            })
        };

        let mut lines = SmallVec::new();
        for (k, (text, _)) in category_lines.iter().enumerate() {
            lines.push(LabelLine {
                text: String::from(*text),
                dy: offsets[k],
            });
        }
        Some(FittedLabel {
            category_font_size: category_lines.first().map_or(0.0, |(_, f)| *f),
            value_font_size: if value_line.is_some() {
                value_font_size
            } else {
                0.0
            },
            category_lines: lines,
            value_line,
        })
    }

    /// Tries the value line alone, centered in the shape.
    fn try_value_only(
        &self,
        profile: &impl ShapeProfile,
        value_text: &str,
        value_font_size: f64,
        measurer: &dyn TextMeasurer,
    ) -> Option<FittedLabel> {
        let r = profile.radius();
        let h = measurer
            .measure(value_text, TextStyle::new(value_font_size))
            .height();
        if h > self.max_block_ratio * r {
            return None;
        }
        if !line_fits(profile, value_text, value_font_size, 0.0, h, measurer) {
            return None;
        }
        Some(FittedLabel {
            category_font_size: 0.0,
            value_font_size,
            category_lines: SmallVec::new(),
            value_line: Some(LabelLine {
                text: String::from(value_text),
                dy: 0.0,
            }),
        })
    }
}

/// Tests one line against the profile's width budget.
///
/// The line occupies the band `[dy - h/2, dy + h/2]`; profiles are unimodal,
/// so the narrowest width over the band is at one of its ends.
fn line_fits(
    profile: &impl ShapeProfile,
    text: &str,
    font_size: f64,
    dy: f64,
    h: f64,
    measurer: &dyn TextMeasurer,
) -> bool {
    let budget = profile
        .width_at(dy - 0.5 * h)
        .min(profile.width_at(dy + 0.5 * h));
    measurer.measure(text, TextStyle::new(font_size)).advance_width <= budget
}

/// Splits text near its character midpoint for a two-line wrap.
///
/// Texts with internal spaces split at the space closest to the midpoint;
/// texts without split between characters. Returns `None` when the text is
/// too short to wrap.
fn split_midpoint(text: &str) -> Option<(String, String)> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    if n < 2 {
        return None;
    }
    let mid = n / 2;
    let nearest_space = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == ' ')
        .map(|(i, _)| i)
        .min_by_key(|&i| i.abs_diff(mid));

    match nearest_space {
        Some(i) if i > 0 && i + 1 < n => Some((
            chars[..i].iter().collect(),
            chars[i + 1..].iter().collect(),
        )),
        Some(_) => None,
        None => {
            let cut = n.div_ceil(2);
            Some((chars[..cut].iter().collect(), chars[cut..].iter().collect()))
        }
    }
}
