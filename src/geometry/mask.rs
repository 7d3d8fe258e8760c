//! Tight bounding boxes around activation masks.

use crate::geometry::BBox;
use crate::heatmap::{Activation, ActivationMap, ActivationPoint};

/// Returns the tight box around the active pixels of `map`.
///
/// Coordinates are pixel indices, so a single active pixel gives a zero-area
/// box. Returns `None` when nothing is active.
pub fn mask_to_box<T: Activation>(map: ActivationMap<'_, T>) -> Option<BBox> {
    points_bbox(&map.active_points())
}

/// Bounding box of a point set (`min`/`max` on each axis).
pub(crate) fn points_bbox(points: &[ActivationPoint]) -> Option<BBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BBox::new(
        min_x as f32,
        min_y as f32,
        max_x as f32,
        max_y as f32,
    ))
}

#[cfg(test)]
mod tests {
    use super::mask_to_box;
    use crate::geometry::BBox;
    use crate::heatmap::ActivationMap;

    #[test]
    fn mask_to_box_spans_active_pixels() {
        #[rustfmt::skip]
        let data = [
            0u8, 0, 0, 0,
            0, 1, 0, 0,
            0, 0, 0, 1,
        ];
        let map = ActivationMap::from_slice(&data, 4, 3).unwrap();
        assert_eq!(mask_to_box(map), Some(BBox::new(1.0, 1.0, 3.0, 2.0)));
    }

    #[test]
    fn empty_mask_has_no_box() {
        let data = [0u8; 6];
        let map = ActivationMap::from_slice(&data, 3, 2).unwrap();
        assert_eq!(mask_to_box(map), None);
    }
}
