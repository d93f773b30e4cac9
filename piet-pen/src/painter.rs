// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The painter seam: the stateful drawing target a pen session talks to.

use piet::kurbo::{Affine, BezPath, Point, Rect};
use piet::{util, Color, Error, FontFamily, FontStyle, FontWeight};

/// A fill rule for resolving winding numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
    /// Fill everything with a non-zero winding number.
    NonZero,
    /// Fill everything with an odd winding number.
    #[default]
    EvenOdd,
}

/// Stroke parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
}

impl Pen {
    pub fn new(color: Color, width: f64) -> Pen {
        Pen { color, width }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Pen::new(Color::BLACK, 1.0)
    }
}

/// The font used for text commands.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub size: f64,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl Font {
    pub fn new(family: FontFamily, size: f64) -> Font {
        Font {
            family,
            size,
            weight: FontWeight::REGULAR,
            style: FontStyle::Regular,
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Font {
        self.weight = weight;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Font {
        self.style = style;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new(FontFamily::SYSTEM_UI, util::DEFAULT_FONT_SIZE)
    }
}

/// Determinants below this are treated as singular.
const MIN_DETERMINANT: f64 = 1e-12;

/// Returns `true` if `xf` can be inverted without blowing up.
pub(crate) fn is_invertible(xf: Affine) -> bool {
    let det = xf.determinant();
    det.is_finite() && det.abs() > MIN_DETERMINANT
}

/// A stateful drawing target.
///
/// Unlike [`piet::RenderContext`], a painter owns its current pen, brush and
/// font, the way a script expects them to persist between commands. Draw
/// calls use whatever state is current; `None` for the pen or brush turns
/// stroking or filling off.
pub trait Painter {
    /// Push the current state (pen, brush, font, antialiasing, transform
    /// and clip) onto the state stack.
    fn save(&mut self) -> Result<(), Error>;

    /// Pop the state stack.
    ///
    /// Popping an empty stack is an [`Error::StackUnbalance`].
    fn restore(&mut self) -> Result<(), Error>;

    fn pen(&self) -> Option<Pen>;
    fn set_pen(&mut self, pen: Option<Pen>);

    fn brush(&self) -> Option<Color>;
    fn set_brush(&mut self, brush: Option<Color>);

    fn font(&self) -> Font;
    fn set_font(&mut self, font: Font);

    fn antialiasing(&self) -> bool;
    fn set_antialiasing(&mut self, antialiasing: bool);

    /// Compose `transform` into the current transform.
    ///
    /// The new transform applies first: `current = current * transform`.
    fn transform(&mut self, transform: Affine);

    /// Replace the current transform.
    ///
    /// `transform` is relative to the coordinate space the painter was
    /// handed over in, not to the device. Fails with
    /// [`Error::InvalidInput`] if the current transform is too close to
    /// singular to be undone.
    fn set_transform(&mut self, transform: Affine) -> Result<(), Error>;

    fn current_transform(&self) -> Affine;

    /// Restrict drawing to the interior of `path`.
    fn set_clip_path(&mut self, path: &BezPath);

    /// Fill, then stroke, `path` with the current brush and pen.
    fn draw_path(&mut self, path: &BezPath, fill_rule: FillRule);

    /// The ink bounds of `text` in the current font, relative to the
    /// position [`draw_text`](Painter::draw_text) would be called with.
    fn text_bounds(&mut self, text: &str) -> Result<Rect, Error>;

    /// Draw `text` with its layout origin at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point) -> Result<(), Error>;

    /// Draw `text` aligned to the top-left of `rect`, clipped to `rect`.
    fn draw_text_in_rect(&mut self, text: &str, rect: Rect) -> Result<(), Error>;
}

impl<T: Painter + ?Sized> Painter for &mut T {
    fn save(&mut self) -> Result<(), Error> {
        (**self).save()
    }

    fn restore(&mut self) -> Result<(), Error> {
        (**self).restore()
    }

    fn pen(&self) -> Option<Pen> {
        (**self).pen()
    }

    fn set_pen(&mut self, pen: Option<Pen>) {
        (**self).set_pen(pen)
    }

    fn brush(&self) -> Option<Color> {
        (**self).brush()
    }

    fn set_brush(&mut self, brush: Option<Color>) {
        (**self).set_brush(brush)
    }

    fn font(&self) -> Font {
        (**self).font()
    }

    fn set_font(&mut self, font: Font) {
        (**self).set_font(font)
    }

    fn antialiasing(&self) -> bool {
        (**self).antialiasing()
    }

    fn set_antialiasing(&mut self, antialiasing: bool) {
        (**self).set_antialiasing(antialiasing)
    }

    fn transform(&mut self, transform: Affine) {
        (**self).transform(transform)
    }

    fn set_transform(&mut self, transform: Affine) -> Result<(), Error> {
        (**self).set_transform(transform)
    }

    fn current_transform(&self) -> Affine {
        (**self).current_transform()
    }

    fn set_clip_path(&mut self, path: &BezPath) {
        (**self).set_clip_path(path)
    }

    fn draw_path(&mut self, path: &BezPath, fill_rule: FillRule) {
        (**self).draw_path(path, fill_rule)
    }

    fn text_bounds(&mut self, text: &str) -> Result<Rect, Error> {
        (**self).text_bounds(text)
    }

    fn draw_text(&mut self, text: &str, origin: Point) -> Result<(), Error> {
        (**self).draw_text(text, origin)
    }

    fn draw_text_in_rect(&mut self, text: &str, rect: Rect) -> Result<(), Error> {
        (**self).draw_text_in_rect(text, rect)
    }
}
