// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pictool-filters — Image loading/saving and the built-in filter plug-ins.
//
// Provides the `Picture` wrapper (decode, apply one filter, verify, encode),
// the `Filter` trait every plug-in implements, and the registry that looks
// filters up by name.

pub mod filters;
pub mod picture;

// Re-export the primary structs so callers can use `pictool_filters::Picture` etc.
pub use filters::{Filter, FilterContext, FilterRegistry, Outcome};
pub use picture::Picture;
