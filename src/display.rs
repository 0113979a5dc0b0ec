// SPDX-License-Identifier: GPL-3.0-or-later
use serde::Deserialize;
use tracing::trace;

use crate::image_buffer::ColorImage;
use crate::resize::{resample, Method};

fn default_max_size() -> u32 {
    500
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DisplaySettings {
    /// The largest width or height (in pixels) an image is shown at.
    #[serde(default = "default_max_size")]
    pub max_size: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
        }
    }
}

/// Shrink an image so that it fits within a `max_size` square, keeping its aspect ratio.
///
/// Images that already fit are returned unchanged. The original width and height are returned
/// alongside the (possibly) scaled image, for showing the real resolution to the user.
pub fn fit_within(image: &ColorImage, max_size: u32) -> (ColorImage, u32, u32) {
    let (width, height) = image.dimensions();
    if width <= max_size && height <= max_size {
        return (image.clone(), width, height);
    }
    let max_size = max_size.max(1) as f64;
    let scaling_factor = (max_size / width as f64).min(max_size / height as f64);
    let new_width = ((width as f64 * scaling_factor) as u32).max(1);
    let new_height = ((height as f64 * scaling_factor) as u32).max(1);
    trace!(width, height, new_width, new_height, "scaling image for display");
    (
        resample(image, new_width, new_height, Method::Triangle),
        width,
        height,
    )
}
