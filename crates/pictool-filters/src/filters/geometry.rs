// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometric filters — flips, transpose, and quarter-turn rotation. Pixels are
// moved, never blended.

use image::RgbaImage;
use image::imageops;
use pictool_core::error::Result;
use pictool_core::types::{DefaultValue, Geometry, ParamKind, ParamSpec, Params};
use tracing::{debug, instrument};

use super::{Filter, FilterContext, Outcome};

/// Mirror the image left-to-right, or top-to-bottom with `--vertical`.
#[derive(Debug, Clone, Copy)]
pub struct Flip;

const FLIP_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "vertical",
    kind: ParamKind::Bool,
    default: DefaultValue::Bool(false),
    help: "Flip top-to-bottom instead of left-to-right",
}];

impl Filter for Flip {
    fn name(&self) -> &'static str {
        "flip"
    }

    fn about(&self) -> &'static str {
        "Flip the image horizontally or vertically"
    }

    fn params(&self) -> &'static [ParamSpec] {
        FLIP_PARAMS
    }

    #[instrument(skip_all)]
    fn apply(
        &self,
        mut image: RgbaImage,
        params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        let vertical = params.flag("vertical")?;
        debug!(vertical, "Flipping");
        if vertical {
            imageops::flip_vertical_in_place(&mut image);
        } else {
            imageops::flip_horizontal_in_place(&mut image);
        }
        Ok(Outcome::Modified(image))
    }
}

/// Swap rows and columns.
#[derive(Debug, Clone, Copy)]
pub struct Transpose;

impl Filter for Transpose {
    fn name(&self) -> &'static str {
        "transpose"
    }

    fn about(&self) -> &'static str {
        "Transpose the image (swap rows and columns)"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn geometry(&self, _params: &Params) -> Geometry {
        Geometry::Swap
    }

    fn apply(
        &self,
        image: RgbaImage,
        _params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        Ok(Outcome::Modified(transpose(&image)))
    }
}

fn transpose(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    RgbaImage::from_fn(height, width, |x, y| *image.get_pixel(y, x))
}

/// Quarter turn, counter-clockwise unless `--right` is given.
#[derive(Debug, Clone, Copy)]
pub struct Rotate;

const ROTATE_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "right",
    kind: ParamKind::Bool,
    default: DefaultValue::Bool(false),
    help: "Rotate clockwise instead of counter-clockwise",
}];

impl Filter for Rotate {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn about(&self) -> &'static str {
        "Rotate the image 90 degrees left or right"
    }

    fn params(&self) -> &'static [ParamSpec] {
        ROTATE_PARAMS
    }

    fn geometry(&self, _params: &Params) -> Geometry {
        Geometry::Swap
    }

    #[instrument(skip_all)]
    fn apply(
        &self,
        image: RgbaImage,
        params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        let right = params.flag("right")?;
        debug!(right, "Rotating a quarter turn");
        let rotated = if right {
            imageops::rotate90(&image)
        } else {
            imageops::rotate270(&image)
        };
        Ok(Outcome::Modified(rotated))
    }
}
