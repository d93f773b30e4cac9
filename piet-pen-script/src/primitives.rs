// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The primitive table the VM dispatches pen commands through.

use std::fmt;

use piet_pen::{DrawStyle, Painter, PenSession};

use crate::conv::*;
use crate::{ScriptError, Status, Value};

type Result<T> = std::result::Result<T, ScriptError>;

/// The native side of a primitive. Arguments arrive in call order, already
/// checked for count.
pub type Handler<P> = fn(&mut PenSession<P>, &[Value]) -> Result<()>;

/// A named primitive with a fixed number of arguments.
pub struct Primitive<P> {
    pub name: &'static str,
    pub argc: usize,
    handler: Handler<P>,
}

impl<P> Clone for Primitive<P> {
    fn clone(&self) -> Self {
        Primitive {
            name: self.name,
            argc: self.argc,
            handler: self.handler,
        }
    }
}

impl<P> fmt::Debug for Primitive<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("argc", &self.argc)
            .finish()
    }
}

/// All pen primitives, looked up by name.
///
/// [`call`](Primitives::call) is the single entry point: it checks the name,
/// the argument count and that a session is active before the handler runs,
/// so a refused call never touches the painter or the path.
pub struct Primitives<P> {
    table: Vec<Primitive<P>>,
}

impl<P: Painter> Primitives<P> {
    pub fn new() -> Primitives<P> {
        let table = vec![
            entry("save", 0, save::<P>),
            entry("restore", 0, restore::<P>),
            entry("clearPath", 0, clear_path::<P>),
            entry("setFillColor", 1, set_fill_color::<P>),
            entry("setStrokeColor", 1, set_stroke_color::<P>),
            entry("setStrokeWidth", 1, set_stroke_width::<P>),
            entry("setAntialiasing", 1, set_antialiasing::<P>),
            entry("setFont", 1, set_font::<P>),
            entry("translate", 2, translate::<P>),
            entry("scale", 2, scale::<P>),
            entry("shear", 2, shear::<P>),
            entry("rotate", 3, rotate::<P>),
            entry("setTransform", 1, set_transform::<P>),
            entry("moveTo", 1, move_to::<P>),
            entry("lineTo", 1, line_to::<P>),
            entry("cubicTo", 3, cubic_to::<P>),
            entry("quadTo", 2, quad_to::<P>),
            entry("addRect", 1, add_rect::<P>),
            entry("addRoundedRect", 3, add_rounded_rect::<P>),
            entry("addEllipse", 1, add_ellipse::<P>),
            entry("addWedge", 4, add_wedge::<P>),
            entry("addAnnularWedge", 5, add_annular_wedge::<P>),
            entry("draw", 1, draw::<P>),
            entry("clip", 0, clip::<P>),
            entry("drawStringAtPoint", 2, draw_string_at_point::<P>),
            entry("drawStringInRect", 2, draw_string_in_rect::<P>),
        ];
        Primitives { table }
    }

    pub fn get(&self, name: &str) -> Option<&Primitive<P>> {
        self.table.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive<P>> {
        self.table.iter()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Run the primitive `name` with `args` against `session`.
    pub fn call(&self, session: &mut PenSession<P>, name: &str, args: &[Value]) -> Result<()> {
        let prim = self
            .get(name)
            .ok_or_else(|| ScriptError::UnknownPrimitive(name.to_owned()))?;
        if args.len() != prim.argc {
            return Err(ScriptError::WrongArgCount {
                name: name.to_owned(),
                expected: prim.argc,
                found: args.len(),
            });
        }
        if !session.is_painting() {
            tracing::warn!(primitive = name, "operation not allowed at this point");
            return Err(piet_pen::PenError::NoActiveSession.into());
        }
        tracing::trace!(primitive = name, argc = args.len(), "dispatch");
        (prim.handler)(session, args)
    }

    /// Like [`call`](Primitives::call), reporting the outcome as a status
    /// code.
    pub fn dispatch(&self, session: &mut PenSession<P>, name: &str, args: &[Value]) -> Status {
        let result = self.call(session, name, args);
        if let Err(e) = &result {
            tracing::debug!(primitive = name, status = ?e.status(), "{}", e);
        }
        Status::from(&result)
    }
}

impl<P: Painter> Default for Primitives<P> {
    fn default() -> Self {
        Primitives::new()
    }
}

fn entry<P>(name: &'static str, argc: usize, handler: Handler<P>) -> Primitive<P> {
    Primitive {
        name,
        argc,
        handler,
    }
}

fn save<P: Painter>(s: &mut PenSession<P>, _: &[Value]) -> Result<()> {
    Ok(s.save()?)
}

fn restore<P: Painter>(s: &mut PenSession<P>, _: &[Value]) -> Result<()> {
    Ok(s.restore()?)
}

fn clear_path<P: Painter>(s: &mut PenSession<P>, _: &[Value]) -> Result<()> {
    Ok(s.clear_path()?)
}

fn set_fill_color<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let color = to_color(&a[0], 0)?;
    Ok(s.set_fill_color(color)?)
}

fn set_stroke_color<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let color = to_color(&a[0], 0)?;
    Ok(s.set_stroke_color(color)?)
}

fn set_stroke_width<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let width = to_float(&a[0], 0)?;
    Ok(s.set_stroke_width(width)?)
}

fn set_antialiasing<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let on = to_bool(&a[0], 0)?;
    Ok(s.set_antialiasing(on)?)
}

fn set_font<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let font = to_font(&a[0], 0)?;
    Ok(s.set_font(font)?)
}

fn translate<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let x = to_float(&a[0], 0)?;
    let y = to_float(&a[1], 1)?;
    Ok(s.translate(x, y)?)
}

fn scale<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let x = to_float(&a[0], 0)?;
    let y = to_float(&a[1], 1)?;
    Ok(s.scale(x, y)?)
}

fn shear<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let x = to_float(&a[0], 0)?;
    let y = to_float(&a[1], 1)?;
    Ok(s.shear(x, y)?)
}

fn rotate<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let angle = to_float(&a[0], 0)?;
    let x = to_float(&a[1], 1)?;
    let y = to_float(&a[2], 2)?;
    Ok(s.rotate(angle, x, y)?)
}

fn set_transform<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let matrix = to_matrix(&a[0], 0)?;
    Ok(s.set_transform(matrix)?)
}

fn move_to<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let p = to_point(&a[0], 0)?;
    Ok(s.move_to(p)?)
}

fn line_to<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let p = to_point(&a[0], 0)?;
    Ok(s.line_to(p)?)
}

fn cubic_to<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let end = to_point(&a[0], 0)?;
    let c1 = to_point(&a[1], 1)?;
    let c2 = to_point(&a[2], 2)?;
    Ok(s.cubic_to(end, c1, c2)?)
}

fn quad_to<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let end = to_point(&a[0], 0)?;
    let c = to_point(&a[1], 1)?;
    Ok(s.quad_to(end, c)?)
}

fn add_rect<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let rect = to_rect(&a[0], 0)?;
    Ok(s.add_rect(rect)?)
}

fn add_rounded_rect<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let rect = to_rect(&a[0], 0)?;
    let rx = to_float(&a[1], 1)?;
    let ry = to_float(&a[2], 2)?;
    Ok(s.add_rounded_rect(rect, rx, ry)?)
}

fn add_ellipse<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let rect = to_rect(&a[0], 0)?;
    Ok(s.add_ellipse(rect)?)
}

fn add_wedge<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let center = to_point(&a[0], 0)?;
    let radius = to_float(&a[1], 1)?;
    let start = to_float(&a[2], 2)?;
    let sweep = to_float(&a[3], 3)?;
    Ok(s.add_wedge(center, radius, start, sweep)?)
}

fn add_annular_wedge<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let center = to_point(&a[0], 0)?;
    let inner = to_float(&a[1], 1)?;
    let outer = to_float(&a[2], 2)?;
    let start = to_float(&a[3], 3)?;
    let sweep = to_float(&a[4], 4)?;
    Ok(s.add_annular_wedge(center, inner, outer, start, sweep)?)
}

fn draw<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let style = DrawStyle::from_code(to_int(&a[0], 0)?);
    Ok(s.draw(style)?)
}

fn clip<P: Painter>(s: &mut PenSession<P>, _: &[Value]) -> Result<()> {
    Ok(s.clip()?)
}

// Empty text draws nothing, whatever the second argument holds.
fn draw_string_at_point<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let text = to_str(&a[0], 0)?;
    if text.is_empty() {
        return Ok(());
    }
    let point = to_point(&a[1], 1)?;
    Ok(s.draw_string_at_point(text, point)?)
}

fn draw_string_in_rect<P: Painter>(s: &mut PenSession<P>, a: &[Value]) -> Result<()> {
    let text = to_str(&a[0], 0)?;
    if text.is_empty() {
        return Ok(());
    }
    let rect = to_rect(&a[1], 1)?;
    Ok(s.draw_string_in_rect(text, rect)?)
}
