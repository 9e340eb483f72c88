// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter plug-ins — the `Filter` trait, the per-invocation context, and the
// name-keyed registry of built-in filters.

mod color;
mod display;
mod geometry;
mod region;
mod registry;
mod scramble;

use std::fmt::Debug;
use std::io::Write;

use image::RgbaImage;
use pictool_core::error::Result;
use pictool_core::types::{Geometry, ParamSpec, Params};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use color::{Brighten, Dered, Mono, Vignette};
pub use display::{PixelDump, render_pixels};
pub use geometry::{Flip, Rotate, Transpose};
pub use region::{Blur, Pixellate};
pub use registry::FilterRegistry;
pub use scramble::Scramble;

/// Trait implemented by every filter plug-in.
///
/// A filter is stateless: everything it needs arrives through `params` and
/// `ctx`, and its only effect is the image it returns (plus, for `display`,
/// text written to `ctx.out`).
pub trait Filter: Debug {
    /// Name used to select the filter on the command line.
    fn name(&self) -> &'static str;

    /// One-line description for `--help`.
    fn about(&self) -> &'static str;

    /// Named options this filter accepts.
    fn params(&self) -> &'static [ParamSpec];

    /// How the output dimensions relate to the input dimensions.
    fn geometry(&self, _params: &Params) -> Geometry {
        Geometry::Preserve
    }

    fn apply(
        &self,
        image: RgbaImage,
        params: &Params,
        ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome>;
}

/// The image a filter hands back, tagged with whether it changed anything.
#[derive(Debug, Clone)]
pub enum Outcome {
    Modified(RgbaImage),
    Unchanged(RgbaImage),
}

impl Outcome {
    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified(_))
    }

    pub fn into_image(self) -> RgbaImage {
        match self {
            Self::Modified(image) | Self::Unchanged(image) => image,
        }
    }
}

/// Per-invocation resources handed to a filter.
pub struct FilterContext<'a> {
    /// Source of randomness for `scramble`.
    pub rng: StdRng,
    /// Where text-producing filters write.
    pub out: &'a mut dyn Write,
}

impl<'a> FilterContext<'a> {
    /// A context with a fixed seed, or OS entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>, out: &'a mut dyn Write) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, out }
    }
}

impl Debug for FilterContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterContext").finish_non_exhaustive()
    }
}

/// Round half to even and clamp into the channel range.
pub(crate) fn to_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}
