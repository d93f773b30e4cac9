// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Script-VM primitives for [`piet_pen`].
//!
//! A VM calls into the pen through named primitives with a fixed number of
//! arguments. Arguments arrive as [`Value`]s and are converted eagerly, left
//! to right; the first one that doesn't convert aborts the call before the
//! session is touched.
//!
//! ```
//! use piet_pen::{PenSession, RecordingPainter};
//! use piet_pen_script::{Primitives, Status, Value};
//!
//! let prims = Primitives::new();
//! let mut session = PenSession::new();
//! session.begin_painting(RecordingPainter::new());
//!
//! let rect = Value::from(vec![10.0, 10.0, 80.0, 40.0]);
//! assert_eq!(prims.dispatch(&mut session, "addRect", &[rect]), Status::Ok);
//! assert_eq!(prims.dispatch(&mut session, "draw", &[Value::Int(3)]), Status::Ok);
//!
//! let painter = session.end_painting().unwrap();
//! assert_eq!(painter.ops().len(), 1);
//! ```

pub use piet_pen;

pub mod conv;
mod error;
mod primitives;
mod value;

pub use crate::error::*;
pub use crate::primitives::*;
pub use crate::value::*;
