// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Region-averaging filters — box blur and pixellation. Both average all four
// channels over rectangular windows, read from a summed-area table built from
// the untouched input.

use image::{Rgba, RgbaImage};
use pictool_core::error::Result;
use pictool_core::types::{DefaultValue, ParamKind, ParamSpec, Params};
use tracing::{debug, instrument};

use super::{Filter, FilterContext, Outcome, to_channel};

/// Box blur with a square window of `2 * radius + 1` pixels, clipped at the
/// image border.
#[derive(Debug, Clone, Copy)]
pub struct Blur;

const BLUR_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "radius",
    kind: ParamKind::Int,
    default: DefaultValue::Int(5),
    help: "Distance in pixels averaged on each side (0 leaves the image as is)",
}];

impl Filter for Blur {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn about(&self) -> &'static str {
        "Blur the image by averaging each pixel with its neighbours"
    }

    fn params(&self) -> &'static [ParamSpec] {
        BLUR_PARAMS
    }

    #[instrument(skip_all)]
    fn apply(
        &self,
        image: RgbaImage,
        params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        let radius = params.int_at_least("radius", 0)?;
        if radius == 0 {
            debug!("Radius 0; nothing to blur");
            return Ok(Outcome::Unchanged(image));
        }

        let (width, height) = image.dimensions();
        let table = SummedArea::new(&image);
        debug!(radius, width, height, "Applying box blur");

        let blurred = RgbaImage::from_fn(width, height, |x, y| {
            let x1 = x.saturating_sub(radius);
            let y1 = y.saturating_sub(radius);
            let x2 = x.saturating_add(radius).saturating_add(1).min(width);
            let y2 = y.saturating_add(radius).saturating_add(1).min(height);
            table.mean(x1, y1, x2, y2)
        });
        Ok(Outcome::Modified(blurred))
    }
}

/// Replaces each `step x step` block with its average colour.
#[derive(Debug, Clone, Copy)]
pub struct Pixellate;

const PIXELLATE_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "step",
    kind: ParamKind::Int,
    default: DefaultValue::Int(10),
    help: "Block size in pixels (at least 1)",
}];

impl Filter for Pixellate {
    fn name(&self) -> &'static str {
        "pixellate"
    }

    fn about(&self) -> &'static str {
        "Pixellate the image into square blocks"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PIXELLATE_PARAMS
    }

    #[instrument(skip_all)]
    fn apply(
        &self,
        image: RgbaImage,
        params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        let step = params.int_at_least("step", 1)?;
        let (width, height) = image.dimensions();
        let table = SummedArea::new(&image);
        debug!(step, width, height, "Pixellating");

        // Blocks are anchored at the top-left; the last row/column of blocks may be smaller.
        let pixellated = RgbaImage::from_fn(width, height, |x, y| {
            let x1 = x - x % step;
            let y1 = y - y % step;
            let x2 = x1.saturating_add(step).min(width);
            let y2 = y1.saturating_add(step).min(height);
            table.mean(x1, y1, x2, y2)
        });
        Ok(Outcome::Modified(pixellated))
    }
}

// -- Summed-area table --------------------------------------------------------

/// Per-channel summed-area table of an RGBA image.
///
/// `sums[y * (width+1) + x]` holds the channel sums over the rectangle
/// `[0, x) x [0, y)`. The table is `(width+1) x (height+1)` with a zero border,
/// so any rectangle sum is four lookups.
struct SummedArea {
    stride: usize,
    sums: Vec<[u64; 4]>,
}

impl SummedArea {
    fn new(image: &RgbaImage) -> Self {
        let (w, h) = image.dimensions();
        let stride = w as usize + 1;
        let mut sums = vec![[0u64; 4]; stride * (h as usize + 1)];

        for y in 0..h as usize {
            let mut row_sum = [0u64; 4];
            for x in 0..w as usize {
                let pixel = image.get_pixel(x as u32, y as u32).0;
                let above = sums[y * stride + x + 1];
                let cell = &mut sums[(y + 1) * stride + x + 1];
                for c in 0..4 {
                    row_sum[c] += u64::from(pixel[c]);
                    cell[c] = row_sum[c] + above[c];
                }
            }
        }

        Self { stride, sums }
    }

    /// Sum over `[x1, x2) x [y1, y2)`.
    fn sum(&self, x1: u32, y1: u32, x2: u32, y2: u32) -> [u64; 4] {
        let at = |x: u32, y: u32| self.sums[y as usize * self.stride + x as usize];
        let (br, tr, bl, tl) = (at(x2, y2), at(x2, y1), at(x1, y2), at(x1, y1));
        std::array::from_fn(|c| br[c] + tl[c] - tr[c] - bl[c])
    }

    /// Average colour over `[x1, x2) x [y1, y2)`. The rectangle must be non-empty.
    fn mean(&self, x1: u32, y1: u32, x2: u32, y2: u32) -> Rgba<u8> {
        let count = (u64::from(x2 - x1) * u64::from(y2 - y1)) as f64;
        let sum = self.sum(x1, y1, x2, y2);
        Rgba(sum.map(|total| to_channel(total as f64 / count)))
    }
}
