// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

use piet::Color;

use crate::{FillRule, Pen};

/// The default accuracy used when flattening arcs into cubic segments.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// The baseline a painting session starts from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PenConfig {
    /// Pen and brush color installed at session begin, as rgba (alpha as
    /// least significant byte).
    pub default_rgba: u32,
    /// Pen width installed at session begin.
    pub stroke_width: f64,
    pub antialiasing: bool,
    /// Maximum distance between an arc and its cubic approximation.
    pub tolerance: f64,
    /// How accumulated paths are filled.
    pub fill_rule: FillRule,
}

impl PenConfig {
    pub fn default_color(&self) -> Color {
        Color::from_rgba32_u32(self.default_rgba)
    }

    pub fn default_pen(&self) -> Pen {
        Pen::new(self.default_color(), self.stroke_width)
    }
}

impl Default for PenConfig {
    fn default() -> Self {
        PenConfig {
            default_rgba: Color::BLACK.as_rgba_u32(),
            stroke_width: 1.0,
            antialiasing: true,
            tolerance: DEFAULT_TOLERANCE,
            fill_rule: FillRule::EvenOdd,
        }
    }
}
