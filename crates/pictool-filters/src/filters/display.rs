// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display — dumps every pixel as text. Useful for inspecting tiny test images.

use std::io::{self, Write};

use image::RgbaImage;
use pictool_core::error::Result;
use pictool_core::types::{ParamSpec, Params};

use super::{Filter, FilterContext, Outcome};

/// Prints all pixels in a nested-list layout without modifying the image.
#[derive(Debug, Clone, Copy)]
pub struct PixelDump;

impl Filter for PixelDump {
    fn name(&self) -> &'static str {
        "display"
    }

    fn about(&self) -> &'static str {
        "Print every pixel as text (does not modify the image)"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn apply(
        &self,
        image: RgbaImage,
        _params: &Params,
        ctx: &mut FilterContext<'_>,
    ) -> Result<Outcome> {
        render_pixels(&image, ctx.out)?;
        Ok(Outcome::Unchanged(image))
    }
}

/// Write `image` as one pixel per line, rows bracketed:
///
/// ```text
/// [  [  RGB(0, 0, 0, 255),
///       RGB(9, 9, 9, 255) ],
///    [  RGB(1, 2, 3, 255),
///       RGB(4, 5, 6, 255) ]  ]
/// ```
pub fn render_pixels(image: &RgbaImage, out: &mut dyn Write) -> io::Result<()> {
    let (width, height) = image.dimensions();
    let label = |x: u32, y: u32| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        format!("RGB({r}, {g}, {b}, {a})")
    };
    let widest = image
        .enumerate_pixels()
        .map(|(x, y, _)| label(x, y).len())
        .max()
        .unwrap_or(0);

    writeln!(out)?;
    for y in 0..height {
        for x in 0..width {
            let text = label(x, y);
            let padding = " ".repeat(widest - text.len());

            let prefix = match (x, y) {
                (0, 0) => "[  [  ",
                (0, _) => "   [  ",
                _ => "      ",
            };
            let last_col = x == width - 1;
            let suffix = if last_col && y == height - 1 {
                format!("{padding} ]  ]")
            } else if last_col {
                format!("{padding} ],")
            } else {
                ",".to_owned()
            };
            writeln!(out, "{prefix}{text}{suffix}")?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::run;
    use image::Rgba;

    #[test]
    fn renders_nested_layout_with_padding() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        image.put_pixel(1, 0, Rgba([100, 200, 250, 255]));

        let mut buffer = Vec::new();
        render_pixels(&image, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let expected = [
            "",
            "[  [  RGB(1, 2, 3, 255),",
            "      RGB(100, 200, 250, 255) ],",
            "   [  RGB(1, 2, 3, 255),",
            "      RGB(1, 2, 3, 255)       ]  ]",
            "",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn display_reports_unchanged() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([5, 6, 7, 8]));
        let outcome = run("display", image.clone(), &[]);
        assert!(!outcome.is_modified());
        assert_eq!(outcome.into_image(), image);
    }

    #[test]
    fn display_writes_to_context_sink() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([5, 6, 7, 8]));
        let mut sink = Vec::new();
        {
            let mut ctx = FilterContext::new(Some(0), &mut sink);
            PixelDump
                .apply(image, &Params::new("display"), &mut ctx)
                .unwrap();
        }
        assert_eq!(String::from_utf8(sink).unwrap(), "\n[  [  RGB(5, 6, 7, 8) ]  ]\n");
    }
}
