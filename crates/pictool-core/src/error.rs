// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for pictool.

use thiserror::Error;

/// Top-level error type for all pictool operations.
#[derive(Debug, Error)]
pub enum PictoolError {
    // -- Filter selection --
    #[error("unrecognized filter '{0}'")]
    UnknownFilter(String),

    // -- Parameters --
    #[error("filter '{filter}' does not recognize the option --{param}")]
    UnknownParameter { filter: String, param: String },

    #[error("filter '{filter}' requires the option --{param}")]
    MissingParameter { filter: String, param: String },

    #[error("invalid value for --{param} of filter '{filter}': {reason}")]
    InvalidParameter {
        filter: String,
        param: String,
        reason: String,
    },

    // -- Image I/O --
    #[error("could not load image: {0}")]
    ImageDecode(String),

    #[error("image has no pixels")]
    EmptyImage,

    #[error("could not save image: {0}")]
    ImageEncode(String),

    #[error(
        "filter '{filter}' corrupted the image: expected {}x{}, got {}x{}",
        expected.0, expected.1, actual.0, actual.1
    )]
    CorruptedOutput {
        filter: String,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PictoolError {
    /// Shorthand for an [`PictoolError::InvalidParameter`].
    pub fn invalid(filter: &str, param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            filter: filter.to_owned(),
            param: param.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PictoolError>;
