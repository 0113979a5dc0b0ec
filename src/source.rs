// SPDX-License-Identifier: GPL-3.0-or-later
use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, RgbaImage};
use tracing::{debug, info, instrument};

use crate::diff::Comparison;
use crate::display::fit_within;
use crate::error::{Error, InvalidImage};
use crate::image_buffer::ColorImage;
use crate::normalize::validate;

/// Clean up a path handed over by a file dialog or drag-and-drop.
///
/// Some platforms wrap dropped paths (those containing spaces, usually) in braces, so a single
/// pair of surrounding braces is removed, as is surrounding whitespace.
pub fn clean_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let unwrapped = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(trimmed);
    PathBuf::from(unwrapped)
}

/// Decode the image file at `path` into an 8-bit RGB image.
#[instrument(level = "debug")]
pub fn load(path: &Path) -> Result<ColorImage, Error> {
    let decoded = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.into_rgb8();
    debug!(width = image.width(), height = image.height(), "decoded image");
    validate(&image)?;
    Ok(image)
}

/// Build an RGB image out of a raw, row-major buffer with 1 (gray), 3 (RGB) or 4 (RGBA) bytes
/// per pixel. Alpha is discarded.
pub fn from_raw(
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
) -> Result<ColorImage, InvalidImage> {
    if width == 0 || height == 0 {
        return Err(InvalidImage::Empty { width, height });
    }
    let expected = width as usize * height as usize * channels as usize;
    let buffer_size = |actual: usize| InvalidImage::BufferSize { expected, actual };
    if !matches!(channels, 1 | 3 | 4) {
        return Err(InvalidImage::UnsupportedChannels(channels));
    }
    if data.len() != expected {
        return Err(buffer_size(data.len()));
    }
    let actual = data.len();
    let dynamic = match channels {
        1 => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        3 => ColorImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        _ => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
    };
    dynamic
        .map(DynamicImage::into_rgb8)
        .ok_or_else(|| buffer_size(actual))
}

/// Encode an image to `path`, with the format picked from the file extension.
#[instrument(level = "debug", skip(image))]
pub fn save(image: &ColorImage, path: &Path) -> Result<(), Error> {
    image.save(path).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })
}

pub const LEFT_NAME: &str = "left.png";
pub const RIGHT_NAME: &str = "right.png";
pub const MASK_NAME: &str = "difference.png";

/// Write both annotated images and the difference mask into the `output` directory, creating it
/// if needed.
///
/// With a `preview_size`, each image is first shrunk to fit within that many pixels. The paths
/// written are returned in the order left, right, mask.
#[instrument(level = "debug", skip(comparison))]
pub fn write_comparison(
    comparison: &Comparison,
    output: &Path,
    preview_size: Option<u32>,
) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(output).map_err(|source| Error::OutputDirectory {
        path: output.to_path_buf(),
        source,
    })?;
    let outputs = [
        (&comparison.left, LEFT_NAME),
        (&comparison.right, RIGHT_NAME),
        (&comparison.mask, MASK_NAME),
    ];
    let mut written = Vec::with_capacity(outputs.len());
    for (image, name) in outputs.iter() {
        let path = output.join(name);
        match preview_size {
            Some(max_size) => {
                let (scaled, width, height) = fit_within(image, max_size);
                save(&scaled, &path)?;
                info!(path = %path.display(), width, height, "wrote preview");
            }
            None => {
                save(image, &path)?;
                info!(path = %path.display(), "wrote image");
            }
        }
        written.push(path);
    }
    Ok(written)
}
