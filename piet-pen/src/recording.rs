// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A painter that records instead of rendering.

use std::mem;

use piet::kurbo::{Affine, BezPath, Point, Rect};
use piet::{Color, Error};

use crate::painter::is_invertible;
use crate::{FillRule, Font, Painter, Pen};

/// One operation seen by a [`RecordingPainter`], with the state it was
/// issued under.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    DrawPath {
        path: BezPath,
        pen: Option<Pen>,
        brush: Option<Color>,
        fill_rule: FillRule,
        transform: Affine,
    },
    Clip {
        path: BezPath,
        transform: Affine,
    },
    DrawText {
        text: String,
        origin: Point,
        font: Font,
        color: Color,
        transform: Affine,
    },
    DrawTextInRect {
        text: String,
        rect: Rect,
        font: Font,
        color: Color,
        transform: Affine,
    },
}

#[derive(Clone, Debug)]
struct State {
    pen: Option<Pen>,
    brush: Option<Color>,
    font: Font,
    antialiasing: bool,
    xf: Affine,
    clip: Option<BezPath>,
}

impl Default for State {
    fn default() -> Self {
        State {
            pen: Some(Pen::default()),
            brush: None,
            font: Font::default(),
            antialiasing: false,
            xf: Affine::IDENTITY,
            clip: None,
        }
    }
}

/// A painter that doesn't paint.
///
/// Every draw, clip and text operation is appended to a log together with
/// the pen, brush, font and transform in effect. Text is measured with
/// fixed metrics: each character is half the font size wide, and the ink
/// box starts one unit right of and a quarter of the font size below the
/// layout origin.
///
/// Like a real render context, it refuses to replace a transform it could
/// not invert.
///
/// This is useful largely for tests, but is made public in case it might
/// come in handy.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    state: State,
    stack: Vec<State>,
    base: Affine,
    ops: Vec<PaintOp>,
}

impl RecordingPainter {
    pub fn new() -> RecordingPainter {
        RecordingPainter::default()
    }

    /// Start from `transform` instead of the identity, as a host that has
    /// already positioned its canvas would.
    pub fn with_transform(transform: Affine) -> RecordingPainter {
        let mut painter = RecordingPainter::default();
        painter.state.xf = transform;
        painter.base = transform;
        painter
    }

    /// The operations recorded so far.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Drain the recorded operations.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        mem::take(&mut self.ops)
    }

    pub fn clip(&self) -> Option<&BezPath> {
        self.state.clip.as_ref()
    }

    /// Depth of the state stack.
    pub fn saved_states(&self) -> usize {
        self.stack.len()
    }

    fn text_color(&self) -> Color {
        self.state.pen.map(|pen| pen.color).unwrap_or(Color::BLACK)
    }
}

impl Painter for RecordingPainter {
    fn save(&mut self) -> Result<(), Error> {
        let new = self.state.clone();
        self.stack.push(mem::replace(&mut self.state, new));
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Error> {
        self.state = self.stack.pop().ok_or(Error::StackUnbalance)?;
        Ok(())
    }

    fn pen(&self) -> Option<Pen> {
        self.state.pen
    }

    fn set_pen(&mut self, pen: Option<Pen>) {
        self.state.pen = pen;
    }

    fn brush(&self) -> Option<Color> {
        self.state.brush
    }

    fn set_brush(&mut self, brush: Option<Color>) {
        self.state.brush = brush;
    }

    fn font(&self) -> Font {
        self.state.font.clone()
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn antialiasing(&self) -> bool {
        self.state.antialiasing
    }

    fn set_antialiasing(&mut self, antialiasing: bool) {
        self.state.antialiasing = antialiasing;
    }

    fn transform(&mut self, transform: Affine) {
        self.state.xf *= transform;
    }

    fn set_transform(&mut self, transform: Affine) -> Result<(), Error> {
        if !is_invertible(self.state.xf) {
            return Err(Error::InvalidInput);
        }
        self.state.xf = self.base * transform;
        Ok(())
    }

    fn current_transform(&self) -> Affine {
        self.state.xf
    }

    fn set_clip_path(&mut self, path: &BezPath) {
        self.state.clip = Some(self.state.xf * path.clone());
        self.ops.push(PaintOp::Clip {
            path: path.clone(),
            transform: self.state.xf,
        });
    }

    fn draw_path(&mut self, path: &BezPath, fill_rule: FillRule) {
        self.ops.push(PaintOp::DrawPath {
            path: path.clone(),
            pen: self.state.pen,
            brush: self.state.brush,
            fill_rule,
            transform: self.state.xf,
        });
    }

    fn text_bounds(&mut self, text: &str) -> Result<Rect, Error> {
        let size = self.state.font.size;
        let width = text.chars().count() as f64 * size * 0.5;
        Ok(Rect::new(1.0, size * 0.25, 1.0 + width, size * 1.2))
    }

    fn draw_text(&mut self, text: &str, origin: Point) -> Result<(), Error> {
        self.ops.push(PaintOp::DrawText {
            text: text.to_owned(),
            origin,
            font: self.state.font.clone(),
            color: self.text_color(),
            transform: self.state.xf,
        });
        Ok(())
    }

    fn draw_text_in_rect(&mut self, text: &str, rect: Rect) -> Result<(), Error> {
        self.ops.push(PaintOp::DrawTextInRect {
            text: text.to_owned(),
            rect,
            font: self.state.font.clone(),
            color: self.text_color(),
            transform: self.state.xf,
        });
        Ok(())
    }
}
