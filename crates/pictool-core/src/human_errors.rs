// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every technical error is mapped to a plain one-line explanation with a clear
// suggestion. The category says which part of the invocation was at fault.

use crate::error::PictoolError;

/// Which part of an invocation caused the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// The filter name or one of its options was wrong.
    Usage,
    /// The input image could not be read or decoded.
    Input,
    /// The output image could not be written.
    Output,
    /// A filter broke its own contract. Not the user's fault.
    Internal,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub category: Category,
}

/// Convert a `PictoolError` into a `HumanError` for display on stderr.
pub fn humanize_error(err: &PictoolError) -> HumanError {
    match err {
        // -- Usage --
        PictoolError::UnknownFilter(name) => HumanError {
            message: format!("There is no filter called '{name}'."),
            suggestion: "Run `pictool --help` to see the available filters.".into(),
            category: Category::Usage,
        },

        PictoolError::UnknownParameter { filter, param } => HumanError {
            message: format!("The '{filter}' filter has no --{param} option."),
            suggestion: format!("Run `pictool {filter} --help` to see its options."),
            category: Category::Usage,
        },

        PictoolError::MissingParameter { filter, param } => HumanError {
            message: format!("The '{filter}' filter needs a value for --{param}."),
            suggestion: format!("Pass it as --{param}=VALUE."),
            category: Category::Usage,
        },

        PictoolError::InvalidParameter { filter, param, reason } => HumanError {
            message: format!("The value given to --{param} is not usable: {reason}."),
            suggestion: format!("Run `pictool {filter} --help` to see what --{param} accepts."),
            category: Category::Usage,
        },

        PictoolError::Config(detail) => HumanError {
            message: "The configuration file could not be understood.".into(),
            suggestion: format!("Check that it is valid JSON. ({detail})"),
            category: Category::Usage,
        },

        // -- Input --
        PictoolError::ImageDecode(detail) => humanize_decode_error(detail),

        PictoolError::EmptyImage => HumanError {
            message: "The input image has no pixels.".into(),
            suggestion: "Use an image that is at least 1x1.".into(),
            category: Category::Input,
        },

        // -- Output --
        PictoolError::ImageEncode(detail) => HumanError {
            message: "The result could not be written.".into(),
            suggestion: format!(
                "Check that the output folder exists and is writable, and that the extension is an image format. ({detail})"
            ),
            category: Category::Output,
        },

        PictoolError::CorruptedOutput { filter, .. } => HumanError {
            message: format!("The '{filter}' filter produced an image of the wrong size."),
            suggestion: "Nothing was written. Please report this as a bug.".into(),
            category: Category::Internal,
        },

        PictoolError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "Check the path for typos.".into(),
                category: Category::Input,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied while accessing a file.".into(),
                suggestion: "Check the file permissions.".into(),
                category: Category::Output,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: format!("Try again. ({io_err})"),
                category: Category::Output,
            },
        },
    }
}

/// Decode errors arrive as text from the `image` crate; pick out the common cases.
fn humanize_decode_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("no such file") || lower.contains("not found") {
        HumanError {
            message: "The input image couldn't be found.".into(),
            suggestion: "Check the input path for typos.".into(),
            category: Category::Input,
        }
    } else if lower.contains("unsupported") || lower.contains("format") {
        HumanError {
            message: "The input file isn't an image format pictool can read.".into(),
            suggestion: "Convert it to PNG or JPEG first.".into(),
            category: Category::Input,
        }
    } else {
        HumanError {
            message: "The input image appears to be damaged.".into(),
            suggestion: format!("Try opening it in another program to check it. (Detail: {detail})"),
            category: Category::Input,
        }
    }
}
