// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-pixel colour filters — red removal, grayscale/sepia, brightness, and
// vignette. None of these change the image dimensions, and alpha is never
// touched.

use image::{Rgba, RgbaImage};
use imageproc::map::map_colors;
use pictool_core::error::{PictoolError, Result};
use pictool_core::types::{DefaultValue, ParamKind, ParamSpec, Params};
use tracing::{debug, instrument, warn};

use super::{Filter, FilterContext, Outcome, to_channel};

/// Luma weights used by `mono`.
const RED_WEIGHT: f64 = 0.3;
const GREEN_WEIGHT: f64 = 0.6;
const BLUE_WEIGHT: f64 = 0.1;

/// Sepia tint applied to the luma value for the green and blue channels.
const SEPIA_GREEN: f64 = 0.6;
const SEPIA_BLUE: f64 = 0.4;

/// Removes all red from the image.
#[derive(Debug, Clone, Copy)]
pub struct Dered;

impl Filter for Dered {
    fn name(&self) -> &'static str {
        "dered"
    }

    fn about(&self) -> &'static str {
        "Remove all red from the image"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn apply(
        &self,
        mut image: RgbaImage,
        _params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        for pixel in image.pixels_mut() {
            pixel.0[0] = 0;
        }
        Ok(Outcome::Modified(image))
    }
}

/// Grayscale, or sepia with `--sepia`.
#[derive(Debug, Clone, Copy)]
pub struct Mono;

const MONO_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "sepia",
    kind: ParamKind::Bool,
    default: DefaultValue::Bool(false),
    help: "Tint the result brown instead of gray",
}];

impl Filter for Mono {
    fn name(&self) -> &'static str {
        "mono"
    }

    fn about(&self) -> &'static str {
        "Convert the image to grayscale or sepia"
    }

    fn params(&self) -> &'static [ParamSpec] {
        MONO_PARAMS
    }

    #[instrument(skip_all)]
    fn apply(
        &self,
        image: RgbaImage,
        params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        let sepia = params.flag("sepia")?;
        debug!(sepia, "Converting to monochrome");

        // Truncation (not rounding) keeps r >= g >= b for sepia.
        let mono = map_colors(&image, |Rgba([r, g, b, a])| {
            let luma = luma(r, g, b);
            if sepia {
                Rgba([luma as u8, (SEPIA_GREEN * luma) as u8, (SEPIA_BLUE * luma) as u8, a])
            } else {
                let gray = luma as u8;
                Rgba([gray, gray, gray, a])
            }
        });
        Ok(Outcome::Modified(mono))
    }
}

fn luma(r: u8, g: u8, b: u8) -> f64 {
    RED_WEIGHT * f64::from(r) + GREEN_WEIGHT * f64::from(g) + BLUE_WEIGHT * f64::from(b)
}

/// Multiplies every colour channel by a factor, saturating at 255.
#[derive(Debug, Clone, Copy)]
pub struct Brighten;

const BRIGHTEN_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "factor",
    kind: ParamKind::Float,
    default: DefaultValue::Float(1.25),
    help: "Multiplier for each colour channel (values below 1 darken)",
}];

impl Filter for Brighten {
    fn name(&self) -> &'static str {
        "brighten"
    }

    fn about(&self) -> &'static str {
        "Scale the brightness of every pixel by a factor"
    }

    fn params(&self) -> &'static [ParamSpec] {
        BRIGHTEN_PARAMS
    }

    #[instrument(skip_all)]
    fn apply(
        &self,
        image: RgbaImage,
        params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        let factor = params.float("factor")?;
        if !factor.is_finite() || factor < 0.0 {
            return Err(PictoolError::invalid(
                self.name(),
                "factor",
                format!("must be a non-negative number, got {factor}"),
            ));
        }
        debug!(factor, "Scaling brightness");

        let scale = |channel: u8| to_channel(f64::from(channel) * factor);
        let brightened = map_colors(&image, |Rgba([r, g, b, a])| {
            Rgba([scale(r), scale(g), scale(b), a])
        });
        Ok(Outcome::Modified(brightened))
    }
}

/// Darkens pixels by the square of their relative distance from the centre.
#[derive(Debug, Clone, Copy)]
pub struct Vignette;

impl Filter for Vignette {
    fn name(&self) -> &'static str {
        "vignette"
    }

    fn about(&self) -> &'static str {
        "Darken the corners of the image"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    #[instrument(skip_all)]
    fn apply(
        &self,
        image: RgbaImage,
        _params: &Params,
        _ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        let (width, height) = image.dimensions();
        let center_x = f64::from(width / 2);
        let center_y = f64::from(height / 2);
        let max_distance = center_x.hypot(center_y);
        if max_distance == 0.0 {
            warn!("Image is a single pixel; vignette has nothing to darken");
            return Ok(Outcome::Unchanged(image));
        }

        let vignetted = RgbaImage::from_fn(width, height, |x, y| {
            let distance = (f64::from(x) - center_x).hypot(f64::from(y) - center_y);
            let factor = (1.0 - (distance / max_distance).powi(2)).clamp(0.0, 1.0);
            let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
            let scale = |channel: u8| to_channel(f64::from(channel) * factor);
            Rgba([scale(r), scale(g), scale(b), a])
        });
        Ok(Outcome::Modified(vignetted))
    }
}
