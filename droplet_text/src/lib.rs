// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for in-shape label fitting.
//!
//! The `droplet` layout engine decides whether (and how) a label fits inside
//! a packed shape by comparing measured line widths against the horizontal
//! space the shape offers. It never shapes or draws text itself; it only
//! asks "how wide is this string at this size?" through the small interface
//! in this crate.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (a shaping engine, web canvas metrics, or a plain
//!   heuristic can all implement the same trait).

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// A minimal text measurement interface used by label fitting.
///
/// The fitter calls this once per candidate line and font size, so
/// implementations should be cheap and, above all, deterministic: the same
/// `(text, style)` pair must always produce the same metrics, or fitting
/// results stop being reproducible.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine, or
/// - backed by web platform text measurement (e.g. HTML canvas).
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; the label fitter never passes
    /// strings containing `\n` (wrapping happens upstream of measurement).
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics;
}

/// Text styling inputs relevant to measurement.
///
/// This is just enough to make fitting decisions consistent with what the
/// renderer will eventually draw. Richer typography (attributed text,
/// shaping options, fallback, etc.) belongs to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the layout's coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (the fitter compares this against shape widths).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns `ascent + descent`, the tight vertical extent of the line.
    ///
    /// Stacked label blocks use this (plus an explicit gap) rather than
    /// `line_height`, so leading conventions of a backend don't change how
    /// many lines fit inside a shape.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// A tiny heuristic text measurer suitable for demos and tests.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
/// It is exact in the sense that matters for fitting: width grows strictly
/// with font size and with character count, so fit decisions made with it
/// are monotonic.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        let ascent = 0.8 * style.font_size;
        let descent = 0.2 * style.font_size;
        TextMetrics {
            advance_width,
            ascent,
            descent,
            leading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_width_grows_with_font_size_and_length() {
        let m = HeuristicTextMeasurer;
        let small = m.measure("total", TextStyle::new(10.0));
        let large = m.measure("total", TextStyle::new(14.0));
        assert!(large.advance_width > small.advance_width);

        let longer = m.measure("total sales", TextStyle::new(10.0));
        assert!(longer.advance_width > small.advance_width);
    }

    #[test]
    fn height_excludes_leading() {
        let metrics = TextMetrics {
            advance_width: 10.0,
            ascent: 8.0,
            descent: 2.0,
            leading: 3.0,
        };
        assert!((metrics.height() - 10.0).abs() < 1e-12);
        assert!((metrics.line_height() - 13.0).abs() < 1e-12);
    }
}
