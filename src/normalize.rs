// SPDX-License-Identifier: GPL-3.0-or-later
use image::{GenericImageView, ImageBuffer, Pixel};
use tracing::debug;

use crate::error::InvalidImage;
use crate::image_buffer::ColorImage;
use crate::resize::{resample, Method};

/// Reject images that have no pixels.
pub(crate) fn validate<I: GenericImageView>(image: &I) -> Result<(), InvalidImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        Err(InvalidImage::Empty { width, height })
    } else {
        Ok(())
    }
}

/// Make two images directly comparable.
///
/// The first image's geometry wins: if the dimensions differ, the second image is resampled to
/// exactly the first image's width and height with the given method. The first image is never
/// modified, and a second image that already matches is passed through as-is.
pub fn normalize(
    first: ColorImage,
    second: ColorImage,
    method: Method,
) -> Result<(ColorImage, ColorImage), InvalidImage> {
    let second = match_dimensions(&first, second, method)?;
    Ok((first, second))
}

pub(crate) fn match_dimensions<P>(
    reference: &ImageBuffer<P, Vec<P::Subpixel>>,
    image: ImageBuffer<P, Vec<P::Subpixel>>,
    method: Method,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, InvalidImage>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    validate(reference)?;
    validate(&image)?;
    if reference.dimensions() == image.dimensions() {
        return Ok(image);
    }
    let (width, height) = reference.dimensions();
    debug!(
        from = ?image.dimensions(),
        to = ?reference.dimensions(),
        "resizing second image to match the first"
    );
    Ok(resample(&image, width, height, method))
}

#[cfg(test)]
mod test {
    use super::normalize;
    use crate::error::InvalidImage;
    use crate::resize::Method;
    use image::{Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn matching_dimensions_untouched() {
        let first = gradient(20, 10);
        let second = gradient(20, 10);
        let (a, b) = normalize(first.clone(), second.clone(), Method::default()).unwrap();
        assert_eq!(a, first);
        assert_eq!(b, second);
    }

    #[test]
    fn second_shrunk_to_first() {
        let first = gradient(40, 30);
        let (a, b) = normalize(first.clone(), gradient(97, 61), Method::default()).unwrap();
        assert_eq!(a, first, "The first image must not be altered");
        assert_eq!(b.dimensions(), (40, 30));
    }

    #[test]
    fn second_enlarged_to_first() {
        let first = gradient(64, 48);
        for method in [
            Method::Nearest,
            Method::Triangle,
            Method::CatmullRom,
            Method::Gaussian,
            Method::Lanczos3,
        ]
        .iter()
        {
            let (a, b) = normalize(first.clone(), gradient(5, 9), *method).unwrap();
            assert_eq!(a.dimensions(), b.dimensions(), "{:?}", method);
        }
    }

    #[test]
    fn solid_color_survives_resampling() {
        let first = RgbImage::from_pixel(30, 30, Rgb([90, 90, 90]));
        let second = RgbImage::from_pixel(71, 13, Rgb([90, 90, 90]));
        let (_, b) = normalize(first, second, Method::Triangle).unwrap();
        assert!(b.pixels().all(|p| *p == Rgb([90, 90, 90])));
    }

    #[test]
    fn empty_first() {
        let result = normalize(RgbImage::new(0, 5), gradient(5, 5), Method::default());
        assert_eq!(
            result.unwrap_err(),
            InvalidImage::Empty {
                width: 0,
                height: 5
            }
        );
    }

    #[test]
    fn empty_second() {
        let result = normalize(gradient(5, 5), RgbImage::new(5, 0), Method::default());
        assert_eq!(
            result.unwrap_err(),
            InvalidImage::Empty {
                width: 5,
                height: 0
            }
        );
    }
}
