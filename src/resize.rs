// SPDX-License-Identifier: GPL-3.0-or-later
use std::fmt;
use std::str::FromStr;

use image::{imageops, ImageBuffer, Pixel};
use serde::Deserialize;
use tracing::trace;

/// Different resizing methods

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Nearest neighbor sampling.
    Nearest,

    /// Triangle (aka linear) sampling.
    ///
    /// When shrinking, the filter support is widened by the scale factor, so every source pixel
    /// contributes to the result (an area average).
    #[serde(alias = "linear")]
    Triangle,

    /// Catmull-Rom (aka bicubic) sampling.
    #[serde(alias = "bicubic")]
    CatmullRom,

    /// Gaussian sampling.
    Gaussian,

    /// Lanczos sampling with a window size of 3.
    #[serde(alias = "lanczos")]
    Lanczos3,
}

impl Default for Method {
    fn default() -> Self {
        Self::Triangle
    }
}

impl From<Method> for imageops::FilterType {
    fn from(method: Method) -> Self {
        match method {
            Method::Nearest => imageops::Nearest,
            Method::Triangle => imageops::Triangle,
            Method::CatmullRom => imageops::CatmullRom,
            Method::Gaussian => imageops::Gaussian,
            Method::Lanczos3 => imageops::Lanczos3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMethod(String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resize method \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "linear" => Ok(Self::Triangle),
            "catmull_rom" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Resample `source` to exactly `width` by `height` pixels.
pub(crate) fn resample<P>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    width: u32,
    height: u32,
    method: Method,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    trace!(
        source_width = source.width(),
        source_height = source.height(),
        width,
        height,
        ?method,
        "resampling image"
    );
    imageops::resize(source, width, height, method.into())
}
