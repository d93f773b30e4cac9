// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An imperative pen for piet.
//!
//! A [`PenSession`] turns a stream of small, independent commands (set the
//! stroke color, move to a point, add an ellipse, draw) into calls on a
//! [`Painter`]. It is meant to sit between a scripting host and a 2D
//! renderer: the host begins a session with a painter, lets script code
//! issue commands, and ends the session.
//!
//! Path commands accumulate into a single buffer that is consumed by
//! [`draw`](PenSession::draw) or [`clip`](PenSession::clip). Painter state
//! (pen, brush, font, transform, clip) lives in the painter.
//!
//! [`PietPainter`] adapts any [`piet::RenderContext`]; [`RecordingPainter`]
//! records operations instead of rendering them.

pub use piet;
pub use piet::kurbo;

mod config;
mod error;
mod painter;
mod path;
mod piet_painter;
mod recording;
mod session;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::painter::*;
pub use crate::path::*;
pub use crate::piet_painter::*;
pub use crate::recording::*;
pub use crate::session::*;
