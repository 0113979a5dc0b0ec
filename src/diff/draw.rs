// SPDX-License-Identifier: GPL-3.0-or-later
use image::Rgb;
use imageproc::drawing::{draw_filled_rect_mut, BresenhamLineIter};
use imageproc::point::Point;
use imageproc::rect::Rect;
use tracing::trace;

use crate::color::Color;
use crate::image_buffer::ColorImage;

use super::region::Region;

/// Stamp a `width` pixel square onto the canvas, roughly centered on (x, y).
fn stamp(canvas: &mut ColorImage, x: i32, y: i32, width: u32, color: Rgb<u8>) {
    let offset = (width as i32 - 1) / 2;
    draw_filled_rect_mut(
        canvas,
        Rect::at(x - offset, y - offset).of_size(width, width),
        color,
    );
}

fn as_float(point: &Point<u32>) -> (f32, f32) {
    (point.x as f32, point.y as f32)
}

/// Draw the closed outline of every region onto the canvas.
pub fn draw_regions(canvas: &mut ColorImage, regions: &[Region], color: Color, width: u32) {
    let color = Rgb::from(color);
    let width = width.max(1);
    for region in regions {
        let points = region.points();
        trace!(points = points.len(), "drawing region outline");
        match points {
            [] => (),
            [single] => stamp(canvas, single.x as i32, single.y as i32, width, color),
            _ => {
                let closing = points.iter().skip(1).chain(points.first());
                for (start, end) in points.iter().zip(closing) {
                    for (x, y) in BresenhamLineIter::new(as_float(start), as_float(end)) {
                        stamp(canvas, x, y, width, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::draw_regions;
    use crate::color::Color;
    use crate::diff::region::find_regions;
    use crate::image_buffer::{ColorImage, DifferenceMask};
    use image::{Luma, Rgb};

    const BACKGROUND: Rgb<u8> = Rgb([10, 20, 30]);

    fn square_mask() -> DifferenceMask {
        DifferenceMask::from_fn(20, 20, |x, y| {
            if (5..10).contains(&x) && (5..10).contains(&y) {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }

    #[test]
    fn outline_only() {
        let regions = find_regions(&square_mask());
        let mut canvas = ColorImage::from_pixel(20, 20, BACKGROUND);
        draw_regions(&mut canvas, &regions, Color::RED, 2);
        let red = Rgb([255, 0, 0]);
        // Corners and edges of the outline
        for (x, y) in [(5, 5), (9, 5), (5, 9), (9, 9), (7, 5), (5, 7)].iter() {
            assert_eq!(*canvas.get_pixel(*x, *y), red, "({}, {})", x, y);
        }
        // The middle of the region and far away pixels are untouched
        assert_eq!(*canvas.get_pixel(7, 7), BACKGROUND);
        assert_eq!(*canvas.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*canvas.get_pixel(19, 19), BACKGROUND);
        // Nothing is drawn more than a line width away from the boundary
        for (x, y, pixel) in canvas.enumerate_pixels() {
            if *pixel == red {
                assert!((5..=10).contains(&x) && (5..=10).contains(&y));
            }
        }
    }

    #[test]
    fn line_width() {
        let regions = find_regions(&square_mask());
        let mut thin = ColorImage::from_pixel(20, 20, BACKGROUND);
        draw_regions(&mut thin, &regions, Color::BLUE, 1);
        let mut thick = ColorImage::from_pixel(20, 20, BACKGROUND);
        draw_regions(&mut thick, &regions, Color::BLUE, 2);
        let count = |image: &ColorImage| image.pixels().filter(|p| **p != BACKGROUND).count();
        // A 5x5 square outline is 16 pixels
        assert_eq!(count(&thin), 16);
        assert!(count(&thick) > count(&thin));
    }

    #[test]
    fn single_point() {
        let mut mask = DifferenceMask::new(6, 6);
        mask.put_pixel(5, 5, Luma([255]));
        let regions = find_regions(&mask);
        let mut canvas = ColorImage::from_pixel(6, 6, BACKGROUND);
        // Stamps hanging off the edge of the canvas are clipped
        draw_regions(&mut canvas, &regions, Color::GREEN, 2);
        assert_eq!(*canvas.get_pixel(5, 5), Rgb([0, 255, 0]));
        assert_eq!(canvas.pixels().filter(|p| **p != BACKGROUND).count(), 1);
    }
}
