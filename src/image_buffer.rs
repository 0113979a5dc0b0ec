// SPDX-License-Identifier: GPL-3.0-or-later
use image::{GrayImage, RgbImage};

/// Full color images as they're supplied to (and returned from) a comparison.
pub type ColorImage = RgbImage;

/// Single channel intensity images, used for both luma values and per-pixel differences.
pub type IntensityImage = GrayImage;

/// A single channel image where every pixel is either 0 (same) or 255 (different).
pub type DifferenceMask = GrayImage;

pub(crate) const SAME: u8 = u8::MIN;
pub(crate) const DIFFERENT: u8 = u8::MAX;
