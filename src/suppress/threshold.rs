//! Per-box adaptive IoU thresholds.

use crate::cluster::Region;
use crate::geometry::BBox;
use crate::util::math::nearest_index;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Threshold decision for one box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdaptiveThreshold {
    /// Index of the nearest region, `None` when no region exists.
    pub region: Option<usize>,
    /// Density of that region (0 without a region).
    pub density: usize,
    /// IoU above which the box is suppressed.
    pub threshold: f32,
}

/// Computes the threshold for `bbox`: `max(base_thresh, density)`.
///
/// The density is a raw box count, so any region holding at least one box
/// center lifts the threshold to 1 or more and nothing assigned to it can be
/// suppressed. Without regions the threshold is `base_thresh`.
pub fn adaptive_threshold(bbox: &BBox, regions: &[Region], base_thresh: f32) -> AdaptiveThreshold {
    let centers: Vec<(f32, f32)> = regions.iter().map(Region::center).collect();
    threshold_with_centers(bbox, regions, &centers, base_thresh)
}

fn threshold_with_centers(
    bbox: &BBox,
    regions: &[Region],
    centers: &[(f32, f32)],
    base_thresh: f32,
) -> AdaptiveThreshold {
    match nearest_index(bbox.center(), centers) {
        Some(region) => {
            let density = regions[region].density;
            AdaptiveThreshold {
                region: Some(region),
                density,
                threshold: base_thresh.max(density as f32),
            }
        }
        None => AdaptiveThreshold {
            region: None,
            density: 0,
            threshold: base_thresh,
        },
    }
}

/// Thresholds for every box, in box order.
pub(crate) fn thresholds_for(
    boxes: &[BBox],
    regions: &[Region],
    base_thresh: f32,
    parallel: bool,
) -> Vec<AdaptiveThreshold> {
    let centers: Vec<(f32, f32)> = regions.iter().map(Region::center).collect();
    #[cfg(feature = "rayon")]
    {
        if parallel {
            return boxes
                .par_iter()
                .map(|b| threshold_with_centers(b, regions, &centers, base_thresh))
                .collect();
        }
    }
    let _ = parallel;
    boxes
        .iter()
        .map(|b| threshold_with_centers(b, regions, &centers, base_thresh))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::adaptive_threshold;
    use crate::cluster::Region;
    use crate::geometry::BBox;

    #[test]
    fn no_regions_uses_base() {
        let t = adaptive_threshold(&BBox::new(0.0, 0.0, 1.0, 1.0), &[], 0.4);
        assert_eq!(t.region, None);
        assert_eq!(t.threshold, 0.4);
    }

    #[test]
    fn raw_density_dominates_base() {
        let regions = [
            Region {
                bbox: BBox::new(0.0, 0.0, 2.0, 2.0),
                density: 0,
            },
            Region {
                bbox: BBox::new(10.0, 10.0, 12.0, 12.0),
                density: 3,
            },
        ];
        let sparse = adaptive_threshold(&BBox::new(0.0, 0.0, 2.0, 2.0), &regions, 0.5);
        assert_eq!(sparse.region, Some(0));
        assert_eq!(sparse.threshold, 0.5);

        let dense = adaptive_threshold(&BBox::new(10.0, 10.0, 13.0, 13.0), &regions, 0.5);
        assert_eq!(dense.region, Some(1));
        assert_eq!(dense.density, 3);
        assert_eq!(dense.threshold, 3.0);
    }
}
