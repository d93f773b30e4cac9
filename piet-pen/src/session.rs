// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The painting session: one active painter and one path buffer.

use piet::kurbo::{Affine, Point, Rect, Vec2};
use piet::Color;

use crate::{Font, Painter, PathAccumulator, PenConfig, PenError};

/// How [`PenSession::draw`] renders the accumulated path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStyle {
    /// Fill with the current brush, no stroke.
    Fill,
    /// Stroke with the current pen, no fill.
    Stroke,
    /// Fill, then stroke.
    FillAndStroke,
}

impl DrawStyle {
    /// Interpret a script-level style code.
    ///
    /// `0` and `1` fill, `2` strokes, anything else does both.
    pub fn from_code(code: i64) -> DrawStyle {
        match code {
            0 | 1 => DrawStyle::Fill,
            2 => DrawStyle::Stroke,
            _ => DrawStyle::FillAndStroke,
        }
    }
}

/// A drawing session over a [`Painter`].
///
/// The session is the context every pen command runs in. Between
/// [`begin_painting`](PenSession::begin_painting) and
/// [`end_painting`](PenSession::end_painting) commands mutate the painter or
/// the path buffer; outside of it every command fails with
/// [`PenError::NoActiveSession`] and changes nothing.
pub struct PenSession<P> {
    painter: Option<P>,
    path: PathAccumulator,
    config: PenConfig,
}

impl<P: Painter> PenSession<P> {
    pub fn new() -> PenSession<P> {
        PenSession::with_config(PenConfig::default())
    }

    pub fn with_config(config: PenConfig) -> PenSession<P> {
        PenSession {
            painter: None,
            path: PathAccumulator::with_tolerance(config.tolerance),
            config,
        }
    }

    pub fn config(&self) -> &PenConfig {
        &self.config
    }

    /// Install `painter` and reset it to the configured baseline.
    ///
    /// Only one session can be active. If one already is, a warning is
    /// logged and `painter` replaces the active painter, which is returned.
    pub fn begin_painting(&mut self, mut painter: P) -> Option<P> {
        if self.painter.is_some() {
            tracing::warn!("painting already in progress");
        }
        painter.set_antialiasing(self.config.antialiasing);
        painter.set_pen(Some(self.config.default_pen()));
        painter.set_brush(Some(self.config.default_color()));
        self.path = PathAccumulator::with_tolerance(self.config.tolerance);
        tracing::debug!("begin painting");
        self.painter.replace(painter)
    }

    /// Release the active painter. Does nothing if no session is active.
    pub fn end_painting(&mut self) -> Option<P> {
        let painter = self.painter.take();
        if painter.is_some() {
            tracing::debug!("end painting");
        }
        painter
    }

    pub fn current_painter(&self) -> Option<&P> {
        self.painter.as_ref()
    }

    pub fn current_painter_mut(&mut self) -> Option<&mut P> {
        self.painter.as_mut()
    }

    pub fn is_painting(&self) -> bool {
        self.painter.is_some()
    }

    /// The path accumulated so far.
    pub fn path(&self) -> &PathAccumulator {
        &self.path
    }

    fn painter_mut(&mut self) -> Result<&mut P, PenError> {
        self.painter.as_mut().ok_or(PenError::NoActiveSession)
    }

    fn path_mut(&mut self) -> Result<&mut PathAccumulator, PenError> {
        if self.painter.is_none() {
            return Err(PenError::NoActiveSession);
        }
        Ok(&mut self.path)
    }

    // painter state

    pub fn save(&mut self) -> Result<(), PenError> {
        self.painter_mut()?.save()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), PenError> {
        self.painter_mut()?.restore()?;
        Ok(())
    }

    pub fn set_fill_color(&mut self, color: Color) -> Result<(), PenError> {
        self.painter_mut()?.set_brush(Some(color));
        Ok(())
    }

    /// Set the pen color, keeping its width.
    pub fn set_stroke_color(&mut self, color: Color) -> Result<(), PenError> {
        let painter = self.painter_mut()?;
        let mut pen = painter.pen().unwrap_or_default();
        pen.color = color;
        painter.set_pen(Some(pen));
        Ok(())
    }

    /// Set the pen width, keeping its color.
    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), PenError> {
        let painter = self.painter_mut()?;
        let mut pen = painter.pen().unwrap_or_default();
        pen.width = width;
        painter.set_pen(Some(pen));
        Ok(())
    }

    pub fn set_antialiasing(&mut self, antialiasing: bool) -> Result<(), PenError> {
        self.painter_mut()?.set_antialiasing(antialiasing);
        Ok(())
    }

    pub fn set_font(&mut self, font: Font) -> Result<(), PenError> {
        self.painter_mut()?.set_font(font);
        Ok(())
    }

    pub fn translate(&mut self, x: f64, y: f64) -> Result<(), PenError> {
        self.painter_mut()?.transform(Affine::translate((x, y)));
        Ok(())
    }

    pub fn scale(&mut self, x: f64, y: f64) -> Result<(), PenError> {
        self.painter_mut()?.transform(Affine::scale_non_uniform(x, y));
        Ok(())
    }

    /// Compose a shear: `x' = x + sx * y`, `y' = sy * x + y`.
    pub fn shear(&mut self, sx: f64, sy: f64) -> Result<(), PenError> {
        self.painter_mut()?.transform(Affine::new([1.0, sy, sx, 1.0, 0.0, 0.0]));
        Ok(())
    }

    /// Rotate by `angle` degrees (clockwise on screen) about `(cx, cy)`.
    pub fn rotate(&mut self, angle: f64, cx: f64, cy: f64) -> Result<(), PenError> {
        let painter = self.painter_mut()?;
        let pivot = Vec2::new(cx, cy);
        painter.transform(Affine::translate(pivot));
        painter.transform(Affine::rotate(angle.to_radians()));
        painter.transform(Affine::translate(-pivot));
        Ok(())
    }

    /// Replace the transform with the matrix
    /// `[scale_x, shear_y, shear_x, scale_y, translate_x, translate_y]`.
    ///
    /// Fails with [`PenError::Backend`] if the painter cannot undo its
    /// current transform, for example after `scale(0.0, 0.0)`.
    pub fn set_transform(&mut self, matrix: [f64; 6]) -> Result<(), PenError> {
        self.painter_mut()?.set_transform(Affine::new(matrix))?;
        Ok(())
    }

    // path construction

    pub fn clear_path(&mut self) -> Result<(), PenError> {
        self.path_mut()?.clear();
        Ok(())
    }

    pub fn move_to(&mut self, p: Point) -> Result<(), PenError> {
        self.path_mut()?.move_to(p);
        Ok(())
    }

    pub fn line_to(&mut self, p: Point) -> Result<(), PenError> {
        self.path_mut()?.line_to(p);
        Ok(())
    }

    /// Cubic Bézier to `end`; note the end point comes first.
    pub fn cubic_to(&mut self, end: Point, c1: Point, c2: Point) -> Result<(), PenError> {
        self.path_mut()?.cubic_to(end, c1, c2);
        Ok(())
    }

    pub fn quad_to(&mut self, end: Point, c: Point) -> Result<(), PenError> {
        self.path_mut()?.quad_to(end, c);
        Ok(())
    }

    pub fn add_rect(&mut self, rect: Rect) -> Result<(), PenError> {
        self.path_mut()?.add_rect(rect);
        Ok(())
    }

    pub fn add_rounded_rect(&mut self, rect: Rect, rx: f64, ry: f64) -> Result<(), PenError> {
        self.path_mut()?.add_rounded_rect(rect, rx, ry);
        Ok(())
    }

    pub fn add_ellipse(&mut self, rect: Rect) -> Result<(), PenError> {
        self.path_mut()?.add_ellipse(rect);
        Ok(())
    }

    pub fn add_wedge(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    ) -> Result<(), PenError> {
        self.path_mut()?.add_wedge(center, radius, start_angle, sweep);
        Ok(())
    }

    pub fn add_annular_wedge(
        &mut self,
        center: Point,
        inner: f64,
        outer: f64,
        start_angle: f64,
        sweep: f64,
    ) -> Result<(), PenError> {
        self.path_mut()?.add_annular_wedge(center, inner, outer, start_angle, sweep);
        Ok(())
    }

    // consumption

    /// Render the accumulated path and empty the buffer.
    ///
    /// The style only suppresses the pen or brush for this one draw; both
    /// are back to what they were when this returns.
    pub fn draw(&mut self, style: DrawStyle) -> Result<(), PenError> {
        let painter = self.painter.as_mut().ok_or(PenError::NoActiveSession)?;
        if self.path.is_empty() {
            self.path.clear();
            return Ok(());
        }

        let pen = painter.pen();
        let brush = painter.brush();
        match style {
            DrawStyle::Fill => painter.set_pen(None),
            DrawStyle::Stroke => painter.set_brush(None),
            DrawStyle::FillAndStroke => (),
        }

        let path = self.path.take();
        tracing::debug!(?style, elements = path.elements().len(), "draw path");
        painter.draw_path(&path, self.config.fill_rule);

        painter.set_pen(pen);
        painter.set_brush(brush);
        Ok(())
    }

    /// Clip to the accumulated path and empty the buffer.
    pub fn clip(&mut self) -> Result<(), PenError> {
        let painter = self.painter.as_mut().ok_or(PenError::NoActiveSession)?;
        let path = self.path.take();
        tracing::debug!(elements = path.elements().len(), "clip to path");
        painter.set_clip_path(&path);
        Ok(())
    }

    /// Draw `text` so that the top-left of its ink bounds lands on `point`.
    pub fn draw_string_at_point(&mut self, text: &str, point: Point) -> Result<(), PenError> {
        let painter = self.painter_mut()?;
        if text.is_empty() {
            return Ok(());
        }
        let bounds = painter.text_bounds(text)?;
        painter.draw_text(text, point - bounds.origin().to_vec2())?;
        Ok(())
    }

    /// Draw `text` at the top-left of `rect`.
    pub fn draw_string_in_rect(&mut self, text: &str, rect: Rect) -> Result<(), PenError> {
        let painter = self.painter_mut()?;
        if text.is_empty() {
            return Ok(());
        }
        painter.draw_text_in_rect(text, rect)?;
        Ok(())
    }
}

impl<P: Painter> Default for PenSession<P> {
    fn default() -> Self {
        PenSession::new()
    }
}
