// SPDX-License-Identifier: GPL-3.0-or-later
use image::Luma;
use imageproc::map::{map_colors, map_colors2};

use crate::color::Color;
use crate::image_buffer::{ColorImage, IntensityImage};

/// Convert a color image to luma-weighted grayscale.
pub fn grayscale(image: &ColorImage) -> IntensityImage {
    map_colors(image, |pixel| Luma([Color::from(&pixel).luma()]))
}

/// The absolute per-pixel difference between two grayscale images of the same size.
pub fn absolute_difference(left: &IntensityImage, right: &IntensityImage) -> IntensityImage {
    map_colors2(left, right, |l, r| {
        let (l, r) = (l[0], r[0]);
        Luma([if l > r { l - r } else { r - l }])
    })
}
