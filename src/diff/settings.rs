// SPDX-License-Identifier: GPL-3.0-or-later
use serde::Deserialize;

use crate::color::Color;
use crate::resize::Method;

use super::threshold::Threshold;

fn default_line_width() -> u32 {
    2
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompareSettings {
    /// The smallest change in luma that counts as a difference.
    #[serde(default)]
    pub threshold: Threshold,

    /// The color region outlines are drawn with.
    #[serde(default)]
    pub highlight: Color,

    /// How wide (in pixels) region outlines are.
    #[serde(default = "default_line_width")]
    pub line_width: u32,

    /// How the second image is resized when the dimensions don't match.
    #[serde(default)]
    pub resize_method: Method,
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            highlight: Color::default(),
            line_width: default_line_width(),
            resize_method: Method::default(),
        }
    }
}
