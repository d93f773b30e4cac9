// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive failures and the status codes reported back to the VM.

use piet_pen::PenError;

/// Why a primitive call failed.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Pen(#[from] PenError),
    /// An argument could not be converted to the type the primitive needs.
    #[error("argument {index}: expected {expected}, got {found}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    /// A numeric sequence was too short or held a non-number.
    #[error("argument {index}: malformed sequence, {reason}")]
    MalformedSequence { index: usize, reason: String },
    #[error("{name} takes {expected} arguments, got {found}")]
    WrongArgCount {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("no primitive named {0}")]
    UnknownPrimitive(String),
}

impl ScriptError {
    pub fn status(&self) -> Status {
        match self {
            ScriptError::TypeMismatch { .. } | ScriptError::MalformedSequence { .. } => {
                Status::WrongType
            }
            ScriptError::Pen(_)
            | ScriptError::WrongArgCount { .. }
            | ScriptError::UnknownPrimitive(_) => Status::Failed,
        }
    }
}

/// The status code a primitive returns to the VM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    Ok = 0,
    /// The primitive refused to run or the painter failed.
    Failed = 1,
    /// An argument had the wrong type.
    WrongType = 2,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl From<&Result<(), ScriptError>> for Status {
    fn from(result: &Result<(), ScriptError>) -> Self {
        match result {
            Ok(()) => Status::Ok,
            Err(e) => e.status(),
        }
    }
}
