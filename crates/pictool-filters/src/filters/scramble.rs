// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scramble — disturbs a random subset of pixels, either by permuting their
// positions or by replacing their colours with noise.

use image::{Rgba, RgbaImage};
use pictool_core::error::{PictoolError, Result};
use pictool_core::types::{DefaultValue, ParamKind, ParamSpec, Params};
use rand::Rng;
use rand::seq::{SliceRandom, index};
use tracing::{debug, instrument, warn};

use super::{Filter, FilterContext, Outcome};

const MODE_SHUFFLE: &str = "shuffle";
const MODE_NOISE: &str = "noise";

/// Randomly disturbs `amount` pixels.
///
/// * `shuffle` picks `amount` distinct positions and permutes the pixels among
///   them, so the image keeps exactly the same set of colours.
/// * `noise` picks `amount` positions (repeats allowed) and gives each a random
///   RGB colour, keeping its alpha.
#[derive(Debug, Clone, Copy)]
pub struct Scramble;

const SCRAMBLE_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "amount",
        kind: ParamKind::Int,
        default: DefaultValue::Int(500),
        help: "Number of pixels to disturb",
    },
    ParamSpec {
        name: "mode",
        kind: ParamKind::Choice(&[MODE_SHUFFLE, MODE_NOISE]),
        default: DefaultValue::Text(MODE_SHUFFLE),
        help: "shuffle: permute the chosen pixels; noise: recolour them randomly",
    },
];

impl Filter for Scramble {
    fn name(&self) -> &'static str {
        "scramble"
    }

    fn about(&self) -> &'static str {
        "Randomly scramble a number of pixels"
    }

    fn params(&self) -> &'static [ParamSpec] {
        SCRAMBLE_PARAMS
    }

    #[instrument(skip_all)]
    fn apply(
        &self,
        mut image: RgbaImage,
        params: &Params,
        ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        let amount = params.int_at_least("amount", 0)? as usize;
        let mode = params.text("mode")?;
        if amount == 0 || image.width() == 0 || image.height() == 0 {
            debug!(amount, "Nothing to scramble");
            return Ok(Outcome::Unchanged(image));
        }

        match mode {
            MODE_SHUFFLE => {
                shuffle(&mut image, amount, &mut ctx.rng);
            }
            MODE_NOISE => noise(&mut image, amount, &mut ctx.rng),
            other => {
                return Err(PictoolError::invalid(
                    self.name(),
                    "mode",
                    format!("unknown mode '{other}'"),
                ));
            }
        }
        Ok(Outcome::Modified(image))
    }
}

fn position(width: u32, index: usize) -> (u32, u32) {
    let index = index as u64;
    let width = u64::from(width);
    ((index % width) as u32, (index / width) as u32)
}

/// Permute the pixels at `amount` distinct random positions. Returns the
/// row-major indices that took part.
fn shuffle(image: &mut RgbaImage, amount: usize, rng: &mut impl Rng) -> Vec<usize> {
    let width = image.width();
    let total = image.width() as usize * image.height() as usize;
    if amount > total {
        warn!(amount, total, "Amount exceeds pixel count; shuffling every pixel");
    }
    let chosen = index::sample(rng, total, amount.min(total)).into_vec();
    debug!(count = chosen.len(), "Shuffling pixels");

    let mut pixels: Vec<Rgba<u8>> = chosen
        .iter()
        .map(|&i| {
            let (x, y) = position(width, i);
            *image.get_pixel(x, y)
        })
        .collect();
    pixels.shuffle(rng);

    for (&i, pixel) in chosen.iter().zip(pixels) {
        let (x, y) = position(width, i);
        image.put_pixel(x, y, pixel);
    }
    chosen
}

fn noise(image: &mut RgbaImage, amount: usize, rng: &mut impl Rng) {
    let (width, height) = image.dimensions();
    debug!(amount, "Recolouring random pixels");
    for _ in 0..amount {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let alpha = image.get_pixel(x, y).0[3];
        image.put_pixel(x, y, Rgba([rng.random(), rng.random(), rng.random(), alpha]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{run, run_image, sample};
    use pictool_core::types::Value;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted_pixels(image: &RgbaImage) -> Vec<[u8; 4]> {
        let mut pixels: Vec<_> = image.pixels().map(|p| p.0).collect();
        pixels.sort_unstable();
        pixels
    }

    fn scramble_with(image: RgbaImage, amount: i64, mode: &str, seed: u64) -> RgbaImage {
        let params = Params::new("scramble")
            .with("amount", Value::Int(amount))
            .with("mode", Value::Text(mode.into()));
        let mut sink = Vec::new();
        let mut ctx = FilterContext::new(Some(seed), &mut sink);
        Scramble.apply(image, &params, &mut ctx).unwrap().into_image()
    }

    #[test]
    fn shuffle_preserves_the_multiset_of_pixels() {
        let input = sample(8, 8);
        let out = run_image("scramble", input.clone(), &[("amount", Value::Int(40))]);
        assert_eq!(out.dimensions(), input.dimensions());
        assert_eq!(sorted_pixels(&out), sorted_pixels(&input));
    }

    #[test]
    fn shuffle_moves_some_chosen_pixels_and_nothing_else() {
        let input = sample(10, 10);
        let mut output = input.clone();
        let mut rng = StdRng::seed_from_u64(3);
        let chosen = shuffle(&mut output, 20, &mut rng);
        assert_eq!(chosen.len(), 20);

        let moved: Vec<usize> = input
            .pixels()
            .zip(output.pixels())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();
        assert!(!moved.is_empty(), "shuffle left every pixel in place");
        assert!(moved.len() <= 20, "moved {}", moved.len());
        assert!(moved.iter().all(|i| chosen.contains(i)), "moved outside the chosen set");
    }

    #[test]
    fn different_seeds_scramble_differently() {
        let input = sample(9, 7);
        for mode in [MODE_SHUFFLE, MODE_NOISE] {
            let a = scramble_with(input.clone(), 30, mode, 1);
            let b = scramble_with(input.clone(), 30, mode, 2);
            assert_ne!(a, input, "{mode} did nothing");
            assert_ne!(a, b, "{mode} ignored the seed");
        }
    }

    #[test]
    fn shuffle_amount_larger_than_image_is_clamped() {
        let input = sample(3, 3);
        let out = scramble_with(input.clone(), 1_000, MODE_SHUFFLE, 1);
        assert_eq!(sorted_pixels(&out), sorted_pixels(&input));
    }

    #[test]
    fn noise_keeps_alpha() {
        let input = sample(6, 6);
        let out = scramble_with(input.clone(), 200, MODE_NOISE, 11);
        for (before, after) in input.pixels().zip(out.pixels()) {
            assert_eq!(before.0[3], after.0[3]);
        }
        assert_ne!(out, input);
    }

    #[test]
    fn same_seed_same_result() {
        let input = sample(9, 7);
        for mode in [MODE_SHUFFLE, MODE_NOISE] {
            let a = scramble_with(input.clone(), 30, mode, 1234);
            let b = scramble_with(input.clone(), 30, mode, 1234);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn zero_amount_is_unchanged() {
        let input = sample(4, 4);
        let outcome = run("scramble", input.clone(), &[("amount", Value::Int(0))]);
        assert!(!outcome.is_modified());
        assert_eq!(outcome.into_image(), input);
    }

    #[test]
    fn empty_image_is_unchanged_in_both_modes() {
        for mode in [MODE_SHUFFLE, MODE_NOISE] {
            let out = scramble_with(RgbaImage::new(0, 3), 10, mode, 5);
            assert_eq!(out.dimensions(), (0, 3));
        }
    }

    #[test]
    fn position_maps_row_major() {
        assert_eq!(position(4, 0), (0, 0));
        assert_eq!(position(4, 5), (1, 1));
        assert_eq!(position(4, 11), (3, 2));
    }
}
