//! Nearest-region lookup by center distance.

use crate::cluster::Region;
use crate::geometry::BBox;
use crate::util::math::nearest_index;

/// Returns the index of the region whose center is closest to the box center.
///
/// Distances are Euclidean between centers; ties go to the lowest index.
/// Returns `None` when `regions` is empty.
pub fn nearest_region(bbox: &BBox, regions: &[Region]) -> Option<usize> {
    let centers: Vec<(f32, f32)> = regions.iter().map(Region::center).collect();
    nearest_index(bbox.center(), &centers)
}

#[cfg(test)]
mod tests {
    use super::nearest_region;
    use crate::cluster::Region;
    use crate::geometry::BBox;

    fn region(x1: f32, y1: f32, x2: f32, y2: f32) -> Region {
        Region {
            bbox: BBox::new(x1, y1, x2, y2),
            density: 0,
        }
    }

    #[test]
    fn picks_closest_center() {
        let regions = [region(0.0, 0.0, 2.0, 2.0), region(20.0, 20.0, 30.0, 30.0)];
        let near_second = BBox::new(18.0, 18.0, 22.0, 22.0);
        assert_eq!(nearest_region(&near_second, &regions), Some(1));
        let near_first = BBox::new(0.0, 0.0, 4.0, 4.0);
        assert_eq!(nearest_region(&near_first, &regions), Some(0));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let regions = [region(0.0, 0.0, 0.0, 0.0), region(10.0, 0.0, 10.0, 0.0)];
        let midway = BBox::new(4.0, -1.0, 6.0, 1.0);
        assert_eq!(nearest_region(&midway, &regions), Some(0));
    }

    #[test]
    fn empty_region_list_has_no_answer() {
        assert_eq!(nearest_region(&BBox::new(0.0, 0.0, 1.0, 1.0), &[]), None);
    }
}
