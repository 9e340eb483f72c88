// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Picture — the single in-memory image a pictool invocation works on. Decodes
// with the `image` crate, runs one filter plug-in, checks that the plug-in kept
// the image well-formed, and encodes the result.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use pictool_core::error::PictoolError;
use pictool_core::types::Params;
use tracing::{debug, info, instrument};

use crate::filters::{Filter, FilterContext, Outcome};

/// An RGBA8 image plus a record of whether any filter has changed it.
///
/// Operations consume `self` and return a new `Picture`, enabling chaining:
///
/// ```ignore
/// let registry = FilterRegistry::builtin();
/// let blur = registry.get("blur")?;
/// let params = registry.resolve("blur", &[], &ToolConfig::default())?;
/// Picture::open("photo.jpg")?
///     .apply(blur, &params, &mut ctx)?
///     .save("blurred.png")?;
/// ```
#[derive(Debug, Clone)]
pub struct Picture {
    /// The current working image.
    image: RgbaImage,
    modified: bool,
}

impl Picture {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path. The format is sniffed from the content,
    /// so a misnamed extension still decodes.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PictoolError> {
        let path = path.as_ref();
        let decode_err = |err: &dyn std::fmt::Display| {
            PictoolError::ImageDecode(format!("{}: {}", path.display(), err))
        };

        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| decode_err(&err))?;
        let img = reader.decode().map_err(|err| decode_err(&err))?;
        info!(width = img.width(), height = img.height(), color = ?img.color(), "Image loaded");
        Self::from_dynamic(img)
    }

    /// Create a picture from raw encoded bytes (PNG, JPEG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, PictoolError> {
        let img = image::load_from_memory(data)
            .map_err(|err| PictoolError::ImageDecode(format!("failed to decode image: {}", err)))?;
        debug!(width = img.width(), height = img.height(), "Image decoded from bytes");
        Self::from_dynamic(img)
    }

    /// Wrap an already-decoded image of any colour type, converting to RGBA8.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, PictoolError> {
        Self::from_rgba(image.into_rgba8())
    }

    /// Wrap an RGBA8 buffer. Empty images are rejected.
    pub fn from_rgba(image: RgbaImage) -> Result<Self, PictoolError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(PictoolError::EmptyImage);
        }
        Ok(Self {
            image,
            modified: false,
        })
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether any applied filter reported a change.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Borrow the underlying buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the picture and return the underlying buffer.
    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }

    // -- Filtering ------------------------------------------------------------

    /// Run `filter` over the image.
    ///
    /// The returned buffer is checked against the filter's declared
    /// [`Geometry`](pictool_core::types::Geometry); a mismatch is reported as
    /// [`PictoolError::CorruptedOutput`] and the image is discarded.
    #[instrument(skip_all, fields(filter = filter.name()))]
    pub fn apply(
        self,
        filter: &dyn Filter,
        params: &Params,
        ctx: &mut FilterContext<'_>,
    ) -> Result<Self, PictoolError> {
        let before = self.image.dimensions();
        let expected = filter.geometry(params).output_dimensions(before);
        for (name, value) in params.iter() {
            debug!(param = name, %value, "Filter parameter");
        }

        let start = Instant::now();
        let outcome = filter.apply(self.image, params, ctx)?;
        let elapsed = start.elapsed();

        let modified = outcome.is_modified();
        let image = outcome.into_image();
        let actual = image.dimensions();
        if actual != expected {
            return Err(PictoolError::CorruptedOutput {
                filter: filter.name().to_owned(),
                expected,
                actual,
            });
        }

        info!(
            width = actual.0,
            height = actual.1,
            modified,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Filter applied"
        );
        Ok(Self {
            image,
            modified: self.modified || modified,
        })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PictoolError> {
        encode_to_format(&DynamicImage::ImageRgba8(self.image.clone()), ImageFormat::Png)
            .map_err(|err| PictoolError::ImageEncode(format!("image encoding failed: {}", err)))
    }

    /// Write the image to a file.
    ///
    /// The format is inferred from the extension, falling back to PNG when the
    /// extension is missing or unknown. The image is converted to a colour type
    /// the format can store and encoded in memory; the file is only created
    /// once encoding has succeeded.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PictoolError> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
        let bytes = encode_to_format(&storable(&self.image, format), format).map_err(|err| {
            PictoolError::ImageEncode(format!("failed to save image to {}: {}", path.display(), err))
        })?;
        std::fs::write(path, &bytes).map_err(|err| {
            PictoolError::ImageEncode(format!("failed to save image to {}: {}", path.display(), err))
        })?;
        info!(?format, width = self.width(), height = self.height(), bytes = bytes.len(), "Image saved");
        Ok(())
    }
}

/// Convert `image` to the colour type `format` can encode.
fn storable(image: &RgbaImage, format: ImageFormat) -> DynamicImage {
    let image = DynamicImage::ImageRgba8(image.clone());
    match format {
        ImageFormat::Jpeg | ImageFormat::Pnm => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::Hdr => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ImageFormat::OpenExr => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        ImageFormat::Farbfeld => DynamicImage::ImageRgba16(image.to_rgba16()),
        _ => image,
    }
}

/// Encode an image into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    image.write_to(&mut cursor, format)?;
    Ok(cursor.into_inner())
}
