//! Detection density per region and nearest-region lookup.
//!
//! Density is the number of input box centers inside a region's closed
//! rectangle. It is measured once against the full input population and is
//! not updated while boxes are suppressed.

mod locate;

pub use locate::nearest_region;

use crate::cluster::Region;
use crate::geometry::BBox;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Counts boxes whose center lies inside `region` (edges inclusive).
pub fn region_density(region: &BBox, boxes: &[BBox]) -> usize {
    boxes
        .iter()
        .filter(|b| {
            let (cx, cy) = b.center();
            region.contains_point(cx, cy)
        })
        .count()
}

/// Attaches a density to every region rectangle, preserving order.
pub fn estimate_densities(bounds: &[BBox], boxes: &[BBox], parallel: bool) -> Vec<Region> {
    #[cfg(feature = "rayon")]
    {
        if parallel {
            return estimate_densities_par(bounds, boxes);
        }
    }
    let _ = parallel;
    bounds
        .iter()
        .map(|&bbox| Region {
            bbox,
            density: region_density(&bbox, boxes),
        })
        .collect()
}

/// Region-parallel density estimation (rayon).
#[cfg(feature = "rayon")]
pub fn estimate_densities_par(bounds: &[BBox], boxes: &[BBox]) -> Vec<Region> {
    bounds
        .par_iter()
        .map(|&bbox| Region {
            bbox,
            density: region_density(&bbox, boxes),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{estimate_densities, region_density};
    use crate::geometry::BBox;

    #[test]
    fn counts_centers_not_corners() {
        let region = BBox::new(4.0, 4.0, 6.0, 6.0);
        let boxes = [
            BBox::new(0.0, 0.0, 10.0, 10.0), // center (5, 5)
            BBox::new(1.0, 1.0, 9.0, 9.0),   // center (5, 5)
            BBox::new(5.0, 5.0, 20.0, 20.0), // corner inside, center outside
            BBox::new(2.0, 2.0, 8.0, 10.0),  // center (5, 6) on the edge
        ];
        assert_eq!(region_density(&region, &boxes), 3);
    }

    #[test]
    fn zero_area_region_counts_coincident_centers() {
        let region = BBox::new(5.0, 5.0, 5.0, 5.0);
        let boxes = [BBox::new(0.0, 0.0, 10.0, 10.0), BBox::new(0.0, 0.0, 4.0, 4.0)];
        assert_eq!(region_density(&region, &boxes), 1);
    }

    #[test]
    fn densities_follow_region_order() {
        let bounds = [BBox::new(0.0, 0.0, 2.0, 2.0), BBox::new(10.0, 10.0, 20.0, 20.0)];
        let boxes = [
            BBox::new(12.0, 12.0, 14.0, 14.0),
            BBox::new(15.0, 15.0, 17.0, 17.0),
        ];
        let regions = estimate_densities(&bounds, &boxes, false);
        assert_eq!(regions[0].density, 0);
        assert_eq!(regions[1].density, 2);
        assert_eq!(regions[1].bbox, bounds[1]);
    }
}
