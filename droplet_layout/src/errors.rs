// Copyright 2026 the Droplet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for packed layout.

/// Errors surfaced by [`crate::PackLayoutSpec::layout`].
///
/// Soft conditions (residual overlap, suppressed labels) are reported inside
/// [`crate::PackLayout`] instead; only inputs the engine cannot proceed from
/// become errors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    /// The canvas has a non-positive or non-finite dimension.
    DegenerateCanvas {
        /// The offending canvas width.
        width: f64,
        /// The offending canvas height.
        height: f64,
    },
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DegenerateCanvas { width, height } => {
                write!(f, "degenerate canvas: {width} x {height}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}
