// SPDX-License-Identifier: GPL-3.0-or-later
//! Find and highlight the regions where two raster images differ.
//!
//! The second image is resized to the first one's dimensions (if needed), both are converted to
//! luma, and every pixel whose luma changed by at least the threshold is marked in a difference
//! mask. The outer boundary of each connected blob in the mask is then outlined on both images.
//!
//! ```no_run
//! use visual_diff::{compare, source, CompareSettings};
//!
//! # fn main() -> Result<(), visual_diff::Error> {
//! let left = source::load("before.png".as_ref())?;
//! let right = source::load("after.png".as_ref())?;
//! let comparison = compare(Some(left), Some(right), &CompareSettings::default())?;
//! println!("{} regions differ", comparison.regions.len());
//! # Ok(())
//! # }
//! ```
pub mod batch;
pub mod color;
pub mod diff;
pub mod display;
mod error;
pub mod image_buffer;
pub mod normalize;
pub mod resize;
pub mod settings;
pub mod source;

pub use crate::color::Color;
pub use crate::diff::{compare, CompareSettings, Comparison, ImagePair, Region, Threshold};
pub use crate::error::{Error, InvalidImage, Slot};
pub use crate::normalize::normalize;
