// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions from VM values to the types pen commands take.
//!
//! Every conversion takes the argument's position so a failure can name it.
//! Infinities and NaN are never accepted as numbers.

use piet_pen::kurbo::{Point, Rect};
use piet_pen::piet::{Color, FontFamily};
use piet_pen::Font;

use crate::{ScriptError, Value};

type Result<T> = std::result::Result<T, ScriptError>;

fn mismatch(index: usize, expected: &'static str, found: &Value) -> ScriptError {
    ScriptError::TypeMismatch {
        index,
        expected,
        found: found.type_name(),
    }
}

fn number(value: &Value) -> Option<f64> {
    match *value {
        Value::Float(f) if f.is_finite() => Some(f),
        Value::Int(i) => Some(i as f64),
        _ => None,
    }
}

/// Read exactly `N` numbers out of an array.
fn numbers<const N: usize>(items: &[Value]) -> Option<[f64; N]> {
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = number(item)?;
    }
    Some(out)
}

pub fn to_float(value: &Value, index: usize) -> Result<f64> {
    match *value {
        Value::Float(f) if !f.is_finite() => Err(ScriptError::TypeMismatch {
            index,
            expected: "Float",
            found: "non-finite Float",
        }),
        _ => number(value).ok_or_else(|| mismatch(index, "Float", value)),
    }
}

/// Integers, or floats truncated toward zero.
pub fn to_int(value: &Value, index: usize) -> Result<i64> {
    match *value {
        Value::Int(i) => Ok(i),
        Value::Float(f) => Ok(f as i64),
        _ => Err(mismatch(index, "Integer", value)),
    }
}

/// Only `true` and `false` count.
pub fn to_bool(value: &Value, index: usize) -> Result<bool> {
    match *value {
        Value::Bool(b) => Ok(b),
        _ => Err(mismatch(index, "Boolean", value)),
    }
}

pub fn to_str(value: &Value, index: usize) -> Result<&str> {
    match value {
        Value::Str(s) | Value::Symbol(s) => Ok(s.as_str()),
        _ => Err(mismatch(index, "String", value)),
    }
}

/// A point, or a two-number array `[x, y]`.
pub fn to_point(value: &Value, index: usize) -> Result<Point> {
    match value {
        Value::Point(p) if p.x.is_finite() && p.y.is_finite() => Ok(*p),
        Value::Array(items) => numbers::<2>(items)
            .map(|[x, y]| Point::new(x, y))
            .ok_or_else(|| mismatch(index, "Point", value)),
        _ => Err(mismatch(index, "Point", value)),
    }
}

/// A rect, or a four-number array `[left, top, width, height]`.
pub fn to_rect(value: &Value, index: usize) -> Result<Rect> {
    match value {
        Value::Rect(r) if [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite()) => Ok(*r),
        Value::Array(items) => numbers::<4>(items)
            .map(|[x, y, w, h]| Rect::new(x, y, x + w, y + h))
            .ok_or_else(|| mismatch(index, "Rect", value)),
        _ => Err(mismatch(index, "Rect", value)),
    }
}

/// A color, or an array of three or four components in `0.0..=1.0`.
pub fn to_color(value: &Value, index: usize) -> Result<Color> {
    match value {
        Value::Color(c) => Ok(*c),
        Value::Array(items) => {
            if let Some([r, g, b]) = numbers::<3>(items) {
                Ok(Color::rgb(r, g, b))
            } else if let Some([r, g, b, a]) = numbers::<4>(items) {
                Ok(Color::rgba(r, g, b, a))
            } else {
                Err(mismatch(index, "Color", value))
            }
        }
        _ => Err(mismatch(index, "Color", value)),
    }
}

/// A font, a family name, or `[name, size]`.
pub fn to_font(value: &Value, index: usize) -> Result<Font> {
    match value {
        Value::Font(f) => Ok(f.clone()),
        Value::Str(name) | Value::Symbol(name) => Ok(Font {
            family: family(name),
            ..Font::default()
        }),
        Value::Array(items) => match items.as_slice() {
            [Value::Str(name) | Value::Symbol(name), size] => {
                let size = number(size).ok_or_else(|| mismatch(index, "Font", value))?;
                Ok(Font {
                    family: family(name),
                    size,
                    ..Font::default()
                })
            }
            _ => Err(mismatch(index, "Font", value)),
        },
        _ => Err(mismatch(index, "Font", value)),
    }
}

/// Map a family name to a piet family, recognizing the generic names.
fn family(name: &str) -> FontFamily {
    match name {
        "serif" => FontFamily::SERIF,
        "sans-serif" => FontFamily::SANS_SERIF,
        "monospace" => FontFamily::MONOSPACE,
        "system-ui" => FontFamily::SYSTEM_UI,
        _ => FontFamily::new_unchecked(name),
    }
}

/// The first six numbers of an array, as an affine matrix.
///
/// Extra elements are ignored.
pub fn to_matrix(value: &Value, index: usize) -> Result<[f64; 6]> {
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(mismatch(index, "Array", value)),
    };
    if items.len() < 6 {
        return Err(ScriptError::MalformedSequence {
            index,
            reason: format!("expected 6 numbers, got {}", items.len()),
        });
    }
    let mut out = [0.0; 6];
    for (i, (slot, item)) in out.iter_mut().zip(items).enumerate() {
        *slot = number(item).ok_or_else(|| ScriptError::MalformedSequence {
            index,
            reason: format!("element {} is a {}", i, item.type_name()),
        })?;
    }
    Ok(out)
}
