// SPDX-License-Identifier: GPL-3.0-or-later
use image::Rgb;
use imageproc::map::map_colors;
use tracing::{debug, instrument};

use crate::error::{Error, Slot};
use crate::image_buffer::{ColorImage, DifferenceMask, IntensityImage};
use crate::normalize::normalize;

mod draw;
mod intensity;
mod region;
mod settings;
mod threshold;

pub use draw::draw_regions;
pub use intensity::{absolute_difference, grayscale};
pub use region::{find_regions, Region};
pub use settings::CompareSettings;
pub use threshold::{ParseThresholdError, Threshold, DEFAULT_LEVEL};

/// Everything produced by comparing two images.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    /// The first image with the region outlines drawn on it.
    pub left: ColorImage,

    /// The (possibly resized) second image with the same outlines drawn on it.
    pub right: ColorImage,

    /// The difference mask, with the single channel copied into all three color channels.
    pub mask: ColorImage,

    /// The regions that were outlined.
    pub regions: Vec<Region>,
}

impl Comparison {
    /// Whether any pixel differed enough to be marked.
    pub fn has_differences(&self) -> bool {
        !self.regions.is_empty()
    }
}

/// The thresholded difference between two normalized images.
pub fn difference_mask(
    left: &ColorImage,
    right: &ColorImage,
    threshold: &Threshold,
) -> DifferenceMask {
    let delta: IntensityImage = absolute_difference(&grayscale(left), &grayscale(right));
    threshold.threshold_image(&delta)
}

/// Copy a single channel mask into all three channels of a color image.
pub fn expand_mask(mask: &DifferenceMask) -> ColorImage {
    map_colors(mask, |pixel| Rgb([pixel[0]; 3]))
}

/// Compare two images that may or may not have been loaded yet.
///
/// If either image is missing, [`Error::MissingInput`] is returned and nothing else happens.
/// Otherwise the second image is resized to match the first (if needed), and the outlines of
/// every region that differs are drawn onto both.
#[instrument(level = "debug", skip(left, right))]
pub fn compare(
    left: Option<ColorImage>,
    right: Option<ColorImage>,
    settings: &CompareSettings,
) -> Result<Comparison, Error> {
    let (left, right) = match (left, right) {
        (Some(left), Some(right)) => (left, right),
        (None, Some(_)) => return Err(Error::MissingInput(Slot::Left)),
        (Some(_), None) => return Err(Error::MissingInput(Slot::Right)),
        (None, None) => return Err(Error::MissingInput(Slot::Both)),
    };
    let (mut left, mut right) = normalize(left, right, settings.resize_method)?;
    let mask = difference_mask(&left, &right, &settings.threshold);
    let regions = find_regions(&mask);
    debug!(
        width = mask.width(),
        height = mask.height(),
        regions = regions.len(),
        "compared images"
    );
    draw_regions(&mut right, &regions, settings.highlight, settings.line_width);
    draw_regions(&mut left, &regions, settings.highlight, settings.line_width);
    Ok(Comparison {
        left,
        right,
        mask: expand_mask(&mask),
        regions,
    })
}

/// The two image slots of a comparison, filled in independently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImagePair {
    pub left: Option<ColorImage>,
    pub right: Option<ColorImage>,
}

impl ImagePair {
    pub fn new(left: ColorImage, right: ColorImage) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Empty both slots.
    pub fn reset(&mut self) {
        self.left = None;
        self.right = None;
    }

    /// Compare the currently loaded images. The loaded images themselves are left untouched, so
    /// the comparison can be repeated (with the same or different settings).
    pub fn compare(&self, settings: &CompareSettings) -> Result<Comparison, Error> {
        compare(self.left.clone(), self.right.clone(), settings)
    }
}
