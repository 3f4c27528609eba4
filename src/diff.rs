use image::{GrayImage, Luma, RgbImage};

use crate::{DifferenceReport, PixelDifferences, Region};

pub struct PixelDiffer {
    max_scan: usize,
    sample_limit: usize,
}

impl PixelDiffer {
    pub fn new(max_scan: usize, sample_limit: usize) -> Self {
        Self {
            max_scan,
            sample_limit,
        }
    }

    /// Locate differing pixels between two RGB images of equal dimensions.
    ///
    /// Callers must normalize both inputs to 8-bit RGB before this point so
    /// that alpha-only edits still register as content changes. Dimension
    /// mismatch short-circuits without touching any pixel data.
    pub fn diff(&self, original: &RgbImage, suspect: &RgbImage) -> DifferenceReport {
        if original.dimensions() != suspect.dimensions() {
            log::debug!(
                "dimension mismatch {:?} vs {:?}, skipping pixel scan",
                original.dimensions(),
                suspect.dimensions()
            );
            return DifferenceReport::Incomparable {
                original: original.dimensions(),
                suspect: suspect.dimensions(),
            };
        }

        let difference_map = self.difference_map(original, suspect);
        let Some(bounding_region) = Self::bounding_region(&difference_map) else {
            log::debug!("bounding region empty, no visual difference");
            return DifferenceReport::NoVisualDiff;
        };

        let (differing_count, count_is_partial, sample) = self.scan_coordinates(original, suspect);

        DifferenceReport::Differing(PixelDifferences {
            bounding_region,
            differing_count,
            count_is_partial,
            sample,
        })
    }

    /// Dense channel-wise absolute difference, collapsed to the maximum
    /// channel delta per pixel. A zero value means the pixel triples match.
    fn difference_map(&self, original: &RgbImage, suspect: &RgbImage) -> GrayImage {
        let (width, height) = original.dimensions();
        let mut map = GrayImage::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let a = original.get_pixel(x, y);
                let b = suspect.get_pixel(x, y);

                let delta = (0..3)
                    .map(|c| a[c].abs_diff(b[c]))
                    .max()
                    .unwrap_or(0);

                map.put_pixel(x, y, Luma([delta]));
            }
        }

        map
    }

    fn bounding_region(difference_map: &GrayImage) -> Option<Region> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut any = false;

        for (x, y, pixel) in difference_map.enumerate_pixels() {
            if pixel[0] != 0 {
                any = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        if !any {
            return None;
        }

        Some(Region {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Collect differing coordinates with x as the outer loop and y as the
    /// inner loop. The scan order is fixed so truncated output is
    /// reproducible across runs.
    fn scan_coordinates(
        &self,
        original: &RgbImage,
        suspect: &RgbImage,
    ) -> (usize, bool, Vec<(u32, u32)>) {
        let (width, height) = original.dimensions();
        let mut recorded = Vec::new();
        let mut capped = false;

        'scan: for x in 0..width {
            for y in 0..height {
                if original.get_pixel(x, y) != suspect.get_pixel(x, y) {
                    recorded.push((x, y));
                    if recorded.len() >= self.max_scan {
                        capped = true;
                        break 'scan;
                    }
                }
            }
        }

        let count = recorded.len();
        recorded.truncate(self.sample_limit);

        (count, capped, recorded)
    }
}
