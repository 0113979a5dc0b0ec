// SPDX-License-Identifier: GPL-3.0-or-later
use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::diff::{compare, CompareSettings, Comparison, ImagePair};
use crate::error::Error;

/// Compare many independent image pairs in parallel.
///
/// Each pair is owned by exactly one comparison, so nothing is shared between them besides the
/// settings. The results are in the same order as the pairs.
pub fn compare_all(
    pairs: Vec<ImagePair>,
    settings: &CompareSettings,
) -> Vec<Result<Comparison, Error>> {
    debug!(count = pairs.len(), "comparing image pairs");
    pairs
        .into_par_iter()
        .enumerate()
        .map(|(index, pair)| {
            let _span = debug_span!("pair", index).entered();
            compare(pair.left, pair.right, settings)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::compare_all;
    use crate::diff::{CompareSettings, ImagePair};
    use crate::error::{Error, Slot};
    use crate::image_buffer::ColorImage;
    use image::Rgb;

    fn pair_with_blocks(blocks: u32) -> ImagePair {
        let left = ColorImage::from_pixel(40, 10, Rgb([200, 200, 200]));
        let mut right = left.clone();
        for block in 0..blocks {
            let x = block * 8 + 1;
            for dx in 0..3 {
                for dy in 0..3 {
                    right.put_pixel(x + dx, 3 + dy, Rgb([0, 0, 0]));
                }
            }
        }
        ImagePair::new(left, right)
    }

    #[test]
    fn results_keep_order() {
        let pairs: Vec<ImagePair> = (0..5).map(pair_with_blocks).collect();
        let results = compare_all(pairs, &CompareSettings::default());
        assert_eq!(results.len(), 5);
        for (expected, result) in results.into_iter().enumerate() {
            let comparison = result.unwrap();
            assert_eq!(comparison.regions.len(), expected);
        }
    }

    #[test]
    fn failures_stay_with_their_pair() {
        let mut incomplete = pair_with_blocks(1);
        incomplete.right = None;
        let pairs = vec![pair_with_blocks(2), incomplete, pair_with_blocks(3)];
        let results = compare_all(pairs, &CompareSettings::default());
        assert_eq!(results[0].as_ref().unwrap().regions.len(), 2);
        assert!(matches!(results[1], Err(Error::MissingInput(Slot::Right))));
        assert_eq!(results[2].as_ref().unwrap().regions.len(), 3);
    }
}
