// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error type for pen operations.

/// An error that can occur while issuing pen commands.
#[derive(Debug, thiserror::Error)]
pub enum PenError {
    /// A command was issued outside of a painting session.
    #[error("operation not allowed at this point: no painting in progress")]
    NoActiveSession,
    /// The underlying painter refused the operation.
    #[error("painter error: {0}")]
    Backend(#[from] piet::Error),
}

impl PenError {
    /// Returns `true` if this error was raised because no session was active.
    pub fn is_no_active_session(&self) -> bool {
        matches!(self, PenError::NoActiveSession)
    }
}
