// SPDX-License-Identifier: GPL-3.0-or-later
use std::collections::{HashMap, HashSet};

use image::{ImageBuffer, Luma};
use imageproc::point::Point;
use imageproc::region_labelling::{connected_components, Connectivity};
use tracing::{debug, trace};

use crate::image_buffer::{DifferenceMask, DIFFERENT, SAME};

type LabelImage = ImageBuffer<Luma<u32>, Vec<u32>>;

/// The eight neighbors of a pixel, in counterclockwise order (on screen, with y pointing down)
/// starting with the pixel to the east.
const NEIGHBORS: [(i64, i64); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WEST: usize = 4;

/// A connected area of differing pixels, described by its outer boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    points: Vec<Point<u32>>,
    pixel_count: u32,
}

impl Region {
    /// The closed boundary polygon. Runs of points along the same horizontal, vertical or
    /// diagonal direction are collapsed to their end points.
    pub fn points(&self) -> &[Point<u32>] {
        &self.points
    }

    /// How many pixels of the mask belong to this region.
    pub fn pixel_count(&self) -> u32 {
        self.pixel_count
    }

    /// The inclusive top-left and bottom-right corners of the region.
    pub fn bounds(&self) -> (Point<u32>, Point<u32>) {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = u32::MIN;
        let mut max_y = u32::MIN;
        for point in self.points.iter() {
            min_x = point.x.min(min_x);
            min_y = point.y.min(min_y);
            max_x = point.x.max(max_x);
            max_y = point.y.max(max_y);
        }
        (Point::new(min_x, min_y), Point::new(max_x, max_y))
    }
}

/// Where the first pixel (in raster order) of each labelled component is, and how big it is.
#[derive(Debug)]
struct Component {
    label: u32,
    start: Point<u32>,
    pixel_count: u32,
}

/// Find the outer boundary of every 8-connected blob of different pixels in the mask.
///
/// Only outermost blobs are reported: holes get no boundary of their own, and neither does a
/// blob sitting inside the hole of another blob. Regions are ordered by the raster position of
/// their top-left-most pixel.
pub fn find_regions(mask: &DifferenceMask) -> Vec<Region> {
    // The labeller's union-find forest is sized at the pixel count but labels start at 1, so a
    // single pixel image can't be labelled.
    if mask.dimensions() == (1, 1) {
        return single_pixel_region(mask);
    }
    let labels = connected_components(mask, Connectivity::Eight, Luma([SAME]));
    let components = components(&labels);
    if components.is_empty() {
        return Vec::new();
    }
    // Background areas are 4-connected when the foreground is 8-connected. Labelling them
    // separately tells the area outside every blob apart from the holes.
    let background = connected_components(mask, Connectivity::Four, Luma([DIFFERENT]));
    let outside = outside_labels(&background);
    let regions: Vec<Region> = components
        .into_iter()
        .filter(|component| {
            let Point { x, y } = component.start;
            // The pixel above the first pixel of a component can't belong to it (or to any other
            // blob), so it's part of the background area directly surrounding the component.
            let external = y == 0 || outside.contains(&background.get_pixel(x, y - 1)[0]);
            if !external {
                trace!(label = component.label, start = ?component.start, "skipping nested region");
            }
            external
        })
        .map(|component| Region {
            points: simplify(&trace_boundary(&labels, component.label, component.start)),
            pixel_count: component.pixel_count,
        })
        .collect();
    debug!(count = regions.len(), "found difference regions");
    regions
}

fn single_pixel_region(mask: &DifferenceMask) -> Vec<Region> {
    if mask.get_pixel(0, 0)[0] == SAME {
        return Vec::new();
    }
    vec![Region {
        points: vec![Point::new(0, 0)],
        pixel_count: 1,
    }]
}

fn components(labels: &LabelImage) -> Vec<Component> {
    let mut components: Vec<Component> = Vec::new();
    // Labels are assigned in raster order, but don't rely on them being dense.
    let mut index_of_label = HashMap::new();
    for (x, y, pixel) in labels.enumerate_pixels() {
        let label = pixel[0];
        if label == 0 {
            continue;
        }
        let index = *index_of_label.entry(label).or_insert_with(|| {
            components.push(Component {
                label,
                start: Point::new(x, y),
                pixel_count: 0,
            });
            components.len() - 1
        });
        components[index].pixel_count += 1;
    }
    components
}

fn outside_labels(background: &LabelImage) -> HashSet<u32> {
    let (width, height) = background.dimensions();
    let top_bottom = (0..width).flat_map(|x| vec![(x, 0), (x, height - 1)]);
    let left_right = (0..height).flat_map(|y| vec![(0, y), (width - 1, y)]);
    top_bottom
        .chain(left_right)
        .map(|(x, y)| background.get_pixel(x, y)[0])
        .filter(|label| *label != 0)
        .collect()
}

fn neighbor(labels: &LabelImage, point: Point<u32>, direction: usize) -> Option<Point<u32>> {
    let (dx, dy) = NEIGHBORS[direction % 8];
    let x = point.x as i64 + dx;
    let y = point.y as i64 + dy;
    if x < 0 || y < 0 || x >= labels.width() as i64 || y >= labels.height() as i64 {
        None
    } else {
        Some(Point::new(x as u32, y as u32))
    }
}

fn direction_between(from: Point<u32>, to: Point<u32>) -> usize {
    let delta = (
        to.x as i64 - from.x as i64,
        to.y as i64 - from.y as i64,
    );
    NEIGHBORS
        .iter()
        .position(|offset| *offset == delta)
        .expect("Consecutive boundary points are always neighbors")
}

/// Border following around the component with `label`, starting at its first pixel in raster
/// order.
fn trace_boundary(labels: &LabelImage, label: u32, start: Point<u32>) -> Vec<Point<u32>> {
    let is_member = |point: Option<Point<u32>>| -> Option<Point<u32>> {
        point.filter(|p| labels.get_pixel(p.x, p.y)[0] == label)
    };
    // Look clockwise around the start, beginning at the (never part of the component) pixel to
    // the west. The first hit is the last pixel of the boundary.
    let last = (0..8)
        .map(|step| (WEST + 8 - step) % 8)
        .find_map(|direction| is_member(neighbor(labels, start, direction)));
    let last = match last {
        Some(last) => last,
        // An isolated pixel.
        None => return vec![start],
    };
    let mut boundary = vec![start];
    let mut previous = last;
    let mut current = start;
    loop {
        // Continue counterclockwise from the pixel we arrived from.
        let back = direction_between(current, previous);
        let next = (1..=8)
            .map(|step| back + step)
            .find_map(|direction| is_member(neighbor(labels, current, direction)))
            .expect("A non-isolated pixel has at least one neighbor in its component");
        if next == start && current == last {
            break;
        }
        previous = current;
        current = next;
        boundary.push(current);
    }
    boundary
}

/// Keep only the points where the boundary changes direction.
fn simplify(boundary: &[Point<u32>]) -> Vec<Point<u32>> {
    let count = boundary.len();
    if count < 3 {
        return boundary.to_vec();
    }
    let step = |from: Point<u32>, to: Point<u32>| {
        (
            to.x as i64 - from.x as i64,
            to.y as i64 - from.y as i64,
        )
    };
    (0..count)
        .filter(|&i| {
            let previous = boundary[(i + count - 1) % count];
            let current = boundary[i];
            let next = boundary[(i + 1) % count];
            step(previous, current) != step(current, next)
        })
        .map(|i| boundary[i])
        .collect()
}
