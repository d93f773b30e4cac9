// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Painter`] over any piet [`RenderContext`].

use std::mem;

use piet::kurbo::{Affine, BezPath, Point, Rect};
use piet::{Color, Error, RenderContext, Text, TextAttribute, TextLayout, TextLayoutBuilder};

use crate::painter::is_invertible;
use crate::{FillRule, Font, Painter, Pen};

#[derive(Clone, Debug)]
struct State {
    pen: Option<Pen>,
    brush: Option<Color>,
    font: Font,
    antialiasing: bool,
}

impl Default for State {
    fn default() -> Self {
        State {
            pen: Some(Pen::default()),
            brush: None,
            font: Font::default(),
            antialiasing: true,
        }
    }
}

/// Drives a piet render context with pen-style state.
///
/// piet passes a brush to every fill and stroke; this keeps the current pen,
/// brush and font on a stack that is saved and restored together with the
/// render context's own transform and clip.
///
/// A few differences from a fully stateful painter:
///
/// - piet clips intersect, so [`set_clip_path`](Painter::set_clip_path)
///   narrows the current clip; wrap it in save/restore to widen it again.
/// - piet has no antialiasing switch. The flag is tracked but does not
///   change how anything renders.
pub struct PietPainter<'a, R: RenderContext> {
    rc: &'a mut R,
    state: State,
    stack: Vec<State>,
    base: Affine,
}

impl<'a, R: RenderContext> PietPainter<'a, R> {
    /// Wrap `rc`. Its transform at this point is the space
    /// [`set_transform`](Painter::set_transform) is relative to.
    pub fn new(rc: &'a mut R) -> PietPainter<'a, R> {
        let base = rc.current_transform();
        PietPainter {
            rc,
            state: State::default(),
            stack: Vec::new(),
            base,
        }
    }

    /// The wrapped render context.
    pub fn render_context(&mut self) -> &mut R {
        &mut *self.rc
    }

    fn text_color(&self) -> Color {
        self.state.pen.map(|pen| pen.color).unwrap_or(Color::BLACK)
    }

    fn layout(&mut self, text: &str) -> Result<R::TextLayout, Error> {
        let color = self.text_color();
        let font = &self.state.font;
        self.rc
            .text()
            .new_text_layout(text.to_owned())
            .font(font.family.clone(), font.size)
            .default_attribute(TextAttribute::Weight(font.weight))
            .default_attribute(TextAttribute::Style(font.style))
            .text_color(color)
            .build()
    }
}

/// The transform to compose onto `current` so that the result is
/// `base * target`.
fn replacement(current: Affine, base: Affine, target: Affine) -> Result<Affine, Error> {
    if !is_invertible(current) {
        return Err(Error::InvalidInput);
    }
    Ok(current.inverse() * base * target)
}

impl<R: RenderContext> Painter for PietPainter<'_, R> {
    fn save(&mut self) -> Result<(), Error> {
        self.rc.save()?;
        let new = self.state.clone();
        self.stack.push(mem::replace(&mut self.state, new));
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Error> {
        let state = self.stack.pop().ok_or(Error::StackUnbalance)?;
        self.rc.restore()?;
        self.state = state;
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
        self.rc.transform(transform);
    }

    fn set_transform(&mut self, transform: Affine) -> Result<(), Error> {
        let current = self.rc.current_transform();
        let delta = replacement(current, self.base, transform).map_err(|e| {
            tracing::warn!(?current, "cannot replace a degenerate transform");
            e
        })?;
        self.rc.transform(delta);
        Ok(())
    }

    fn current_transform(&self) -> Affine {
        self.rc.current_transform()
    }

    fn set_clip_path(&mut self, path: &BezPath) {
        self.rc.clip(path);
    }

    fn draw_path(&mut self, path: &BezPath, fill_rule: FillRule) {
        if let Some(color) = self.state.brush {
            let brush = self.rc.solid_brush(color);
            match fill_rule {
                FillRule::NonZero => self.rc.fill(path, &brush),
                FillRule::EvenOdd => self.rc.fill_even_odd(path, &brush),
            }
        }
        if let Some(pen) = self.state.pen {
            let brush = self.rc.solid_brush(pen.color);
            self.rc.stroke(path, &brush, pen.width);
        }
    }

    fn text_bounds(&mut self, text: &str) -> Result<Rect, Error> {
        Ok(self.layout(text)?.image_bounds())
    }

    fn draw_text(&mut self, text: &str, origin: Point) -> Result<(), Error> {
        let layout = self.layout(text)?;
        self.rc.draw_text(&layout, origin);
        Ok(())
    }

    fn draw_text_in_rect(&mut self, text: &str, rect: Rect) -> Result<(), Error> {
        let layout = self.layout(text)?;
        self.rc.save()?;
        self.rc.clip(rect);
        self.rc.draw_text(&layout, rect.origin());
        self.rc.restore()
    }
}
