// SPDX-License-Identifier: GPL-3.0-or-later
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use image::Luma;
use imageproc::map::map_colors;
use serde::Deserialize;
use tracing::trace;

use crate::image_buffer::{DifferenceMask, IntensityImage, DIFFERENT, SAME};

/// The cutoff applied to the per-pixel difference.
///
/// Pixels with a difference at or above the level are marked as different.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "ThresholdValue")]
pub enum Threshold {
    Static(u8),
    Automatic,
}

pub const DEFAULT_LEVEL: u8 = 30;

const AUTOMATIC_THRESHOLD_DIFFERENCE: f32 = 0.001;

// Anything lower would mark unchanged pixels (a difference of 0) as different.
const MINIMUM_AUTOMATIC_LEVEL: u8 = 1;

/// Iterative intermeans: split the pixels at the current guess, then move the guess to the
/// midpoint of the two class means until it settles.
fn automatic_threshold(image: &IntensityImage) -> f32 {
    let pixel_count = (image.width() * image.height()) as f32;
    let mut threshold = image.iter().map(|p| *p as f32).sum::<f32>() / pixel_count;
    loop {
        let (mut foreground_sum, mut foreground_count) = (0f32, 0u32);
        let (mut background_sum, mut background_count) = (0f32, 0u32);
        for pixel in image.iter().map(|p| *p as f32) {
            if pixel >= threshold {
                foreground_sum += pixel;
                foreground_count += 1;
            } else {
                background_sum += pixel;
                background_count += 1;
            }
        }
        if foreground_count == 0 || background_count == 0 {
            // Only one class left, nothing to split.
            return threshold;
        }
        let foreground_mean = foreground_sum / foreground_count as f32;
        let background_mean = background_sum / background_count as f32;
        let new_threshold = (foreground_mean + background_mean) / 2.0;
        if (new_threshold - threshold).abs() <= AUTOMATIC_THRESHOLD_DIFFERENCE {
            return threshold;
        }
        threshold = new_threshold;
    }
}

impl Threshold {
    /// The integer level this threshold resolves to for the given difference image.
    pub fn calculate_level(&self, image: &IntensityImage) -> u8 {
        match self {
            Self::Static(n) => *n,
            Self::Automatic => {
                let level = automatic_threshold(image).ceil();
                let level = level.max(MINIMUM_AUTOMATIC_LEVEL as f32).min(u8::MAX as f32);
                trace!(level, "automatic threshold level");
                level as u8
            }
        }
    }

    /// Mark every pixel at or above the level as different.
    pub fn threshold_image(&self, image: &IntensityImage) -> DifferenceMask {
        let threshold = self.calculate_level(image);
        map_colors(image, |pixel| {
            Luma([if pixel[0] < threshold { SAME } else { DIFFERENT }])
        })
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::Static(DEFAULT_LEVEL)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseThresholdError(String);

impl fmt::Display for ParseThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" is not a threshold level (0-255) or \"automatic\"",
            self.0
        )
    }
}

impl std::error::Error for ParseThresholdError {}

impl FromStr for Threshold {
    type Err = ParseThresholdError;

    fn from_str(threshold_str: &str) -> Result<Self, Self::Err> {
        let trimmed = threshold_str.trim();
        if trimmed.eq_ignore_ascii_case("automatic") || trimmed.eq_ignore_ascii_case("auto") {
            Ok(Self::Automatic)
        } else {
            trimmed
                .parse()
                .map(Self::Static)
                .map_err(|_| ParseThresholdError(threshold_str.to_string()))
        }
    }
}

/// The raw configuration value, either a number or a keyword.
#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdValue {
    Level(i64),
    Keyword(String),
}

impl TryFrom<ThresholdValue> for Threshold {
    type Error = ParseThresholdError;

    fn try_from(value: ThresholdValue) -> Result<Self, Self::Error> {
        match value {
            ThresholdValue::Level(level) => u8::try_from(level)
                .map(Self::Static)
                .map_err(|_| ParseThresholdError(level.to_string())),
            ThresholdValue::Keyword(keyword) => keyword.parse(),
        }
    }
}
